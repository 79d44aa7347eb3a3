mod core;
mod gui;
mod player;

use eframe::egui;
use gui::ClassPlayerApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([360.0, 480.0])
            .with_title("Class Player"),
        ..Default::default()
    };

    eframe::run_native(
        "Class Player",
        options,
        Box::new(|cc| {
            match ClassPlayerApp::new(cc) {
                Ok(app) => Ok(Box::new(app)),
                Err(e) => {
                    eprintln!("Failed to initialize app: {}", e);
                    std::process::exit(1);
                }
            }
        }),
    ).map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}

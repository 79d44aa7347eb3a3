use eframe::egui;
use crate::player::{ControlAction, ControlView, Menu, PlayIcon, PlaybackRate, QualityRequest};

const PROGRESS_HEIGHT: f32 = 8.0;

/// Maps a pointer x position on the progress track to a 0..=1 fraction.
pub fn fraction_at(track: egui::Rect, pointer_x: f32) -> f32 {
    if track.width() <= 0.0 {
        return 0.0;
    }
    ((pointer_x - track.min.x) / track.width()).clamp(0.0, 1.0)
}

/// Placeholder for the embed mount: the widget draws no pixels of its own,
/// so the area shows what the widget is doing. Secondary clicks are always
/// consumed here; the menu only opens when `context_menu` is set.
pub fn show_video_area(
    ui: &mut egui::Ui,
    view: &ControlView,
    caption: Option<&str>,
    height: f32,
    context_menu: bool,
    has_note: bool,
) -> Option<ControlAction> {
    let width = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(egui::Vec2::new(width, height), egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        painter.rect_filled(rect, egui::Rounding::same(6.0), egui::Color32::BLACK);

        let (text, color) = if let Some(message) = &view.error_message {
            (message.clone(), egui::Color32::from_rgb(230, 90, 90))
        } else if view.loading {
            ("Loading...".to_string(), egui::Color32::GRAY)
        } else {
            (caption.unwrap_or_default().to_string(), egui::Color32::WHITE)
        };

        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::proportional(18.0),
            color,
        );
    }

    if !context_menu {
        if response.secondary_clicked() {
            log::trace!("Context menu blocked on the video area");
        }
        return None;
    }

    let mut action = None;
    response.context_menu(|ui| {
        let play_label = match view.play_icon {
            PlayIcon::Play => "Play",
            PlayIcon::Pause => "Pause",
        };
        if ui.button(play_label).clicked() {
            action = Some(ControlAction::TogglePlayPause);
            ui.close_menu();
        }
        if ui.button(if view.muted_icon { "Unmute" } else { "Mute" }).clicked() {
            action = Some(ControlAction::ToggleMute);
            ui.close_menu();
        }
        if ui.add_enabled(has_note, egui::Button::new("Open notes")).clicked() {
            action = Some(ControlAction::OpenNote);
            ui.close_menu();
        }
        if ui.button("Close player").clicked() {
            action = Some(ControlAction::Close);
            ui.close_menu();
        }
    });
    action
}

fn show_progress(ui: &mut egui::Ui, view: &ControlView) -> Option<f32> {
    let width = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(
        egui::Vec2::new(width, PROGRESS_HEIGHT),
        egui::Sense::click(),
    );

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        painter.rect_filled(rect, egui::Rounding::same(4.0), ui.visuals().extreme_bg_color);

        let filled = egui::Rect::from_min_size(
            rect.min,
            egui::Vec2::new(rect.width() * (view.progress_percent / 100.0).clamp(0.0, 1.0), rect.height()),
        );
        painter.rect_filled(filled, egui::Rounding::same(4.0), ui.visuals().selection.bg_fill);
    }

    if response.clicked() {
        response.interact_pointer_pos().map(|pos| fraction_at(rect, pos.x))
    } else {
        None
    }
}

/// Renders one control surface and returns what the user asked for.
/// Both layouts use this; the caller tags the actions with its layout.
pub fn show_controls(ui: &mut egui::Ui, view: &ControlView, has_note: bool) -> Vec<ControlAction> {
    let mut actions = Vec::new();

    if let Some(fraction) = show_progress(ui, view) {
        actions.push(ControlAction::SeekToFraction(fraction));
    }

    ui.horizontal_wrapped(|ui| {
        if ui.button("⏮").on_hover_text("Previous class").clicked() {
            actions.push(ControlAction::Previous);
        }
        if ui.button("⏪").on_hover_text("Back 10s").clicked() {
            actions.push(ControlAction::SkipBackward);
        }
        let play_label = match view.play_icon {
            PlayIcon::Play => "▶",
            PlayIcon::Pause => "⏸",
        };
        if ui.button(play_label).clicked() {
            actions.push(ControlAction::TogglePlayPause);
        }
        if ui.button("⏩").on_hover_text("Forward 10s").clicked() {
            actions.push(ControlAction::SkipForward);
        }
        if ui.button("⏭").on_hover_text("Next class").clicked() {
            actions.push(ControlAction::Next);
        }

        ui.separator();

        let mute_label = if view.muted_icon { "🔇" } else { "🔊" };
        if ui.button(mute_label).clicked() {
            actions.push(ControlAction::ToggleMute);
        }
        let mut volume = view.volume_slider;
        if ui
            .add(egui::Slider::new(&mut volume, 0..=100).show_value(false))
            .changed()
        {
            actions.push(ControlAction::SetVolume(volume));
        }

        ui.label(format!("{} / {}", view.current_time_text, view.duration_text));

        ui.separator();

        if ui.selectable_label(view.speed_menu_open, view.speed_label.as_str()).clicked() {
            actions.push(ControlAction::ToggleMenu(Menu::Speed));
        }
        if ui.selectable_label(view.quality_menu_open, view.active_quality.label()).clicked() {
            actions.push(ControlAction::ToggleMenu(Menu::Quality));
        }

        let fullscreen_label = if view.fullscreen { "🗗" } else { "⛶" };
        if ui.button(fullscreen_label).on_hover_text("Fullscreen").clicked() {
            actions.push(ControlAction::ToggleFullscreen);
        }

        if ui.add_enabled(has_note, egui::Button::new("📄 Notes")).clicked() {
            actions.push(ControlAction::OpenNote);
        }
        if ui.button("✖").on_hover_text("Close player").clicked() {
            actions.push(ControlAction::Close);
        }
    });

    if view.speed_menu_open {
        ui.horizontal_wrapped(|ui| {
            ui.label("Speed:");
            for rate in PlaybackRate::ALL {
                if ui.selectable_label(view.active_rate == rate, rate.label()).clicked() {
                    actions.push(ControlAction::SelectRate(rate));
                }
            }
        });
    }

    if view.quality_menu_open {
        ui.horizontal_wrapped(|ui| {
            ui.label("Quality:");
            for request in QualityRequest::ALL {
                if ui.selectable_label(view.active_quality == request, request.label()).clicked() {
                    actions.push(ControlAction::SelectQuality(request));
                }
            }
        });
    }

    actions
}

use eframe::egui;
use crate::core::{AccessGate, AccessOutcome, Catalog, CatalogFilter, MediaItem, SignInState};

const CARD_WIDTH: f32 = 260.0;

#[derive(Debug, Clone, PartialEq)]
pub enum SignInAction {
    SignIn(String),
    SignOut,
}

/// Adds or removes `value` so that its membership matches `selected`.
pub fn set_selected(values: &mut Vec<String>, value: &str, selected: bool) {
    let present = values.iter().any(|v| v == value);
    if selected && !present {
        values.push(value.to_string());
    } else if !selected && present {
        values.retain(|v| v != value);
    }
}

/// Grade, course and subject pickers. Returns true when the filter changed.
pub fn show_filters(ui: &mut egui::Ui, catalog: &Catalog, filter: &mut CatalogFilter) -> bool {
    let before = filter.clone();

    ui.horizontal_wrapped(|ui| {
        ui.label("Grade:");
        for grade in catalog.grades() {
            let mut selected = filter.grades.contains(&grade);
            if ui.checkbox(&mut selected, grade.as_str()).changed() {
                set_selected(&mut filter.grades, &grade, selected);
            }
        }
    });

    ui.horizontal_wrapped(|ui| {
        ui.label("Course:");
        let current = filter.course.clone().unwrap_or_else(|| "All".to_string());
        egui::ComboBox::from_id_source("course_filter")
            .selected_text(current)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filter.course, None, "All");
                for course in catalog.courses() {
                    let label = course.clone();
                    ui.selectable_value(&mut filter.course, Some(course), label);
                }
            });
    });

    ui.horizontal_wrapped(|ui| {
        ui.label("Subject:");
        for subject in catalog.subjects() {
            let mut selected = filter.subjects.contains(&subject);
            if ui.checkbox(&mut selected, subject.as_str()).changed() {
                set_selected(&mut filter.subjects, &subject, selected);
            }
        }
        if !filter.is_empty() && ui.small_button("Clear").clicked() {
            *filter = CatalogFilter::default();
        }
    });

    *filter != before
}

/// Class cards. Returns the id of the card whose play button was clicked.
pub fn show_cards(ui: &mut egui::Ui, items: &[&MediaItem], active: Option<u32>) -> Option<u32> {
    if items.is_empty() {
        ui.label("No classes match the current filters.");
        return None;
    }

    let mut clicked = None;
    egui::ScrollArea::vertical().id_source("catalog_cards").show(ui, |ui| {
        ui.horizontal_wrapped(|ui| {
            for item in items {
                let is_active = active == Some(item.id);
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(CARD_WIDTH);
                    ui.vertical(|ui| {
                        let title = egui::RichText::new(&item.title).strong();
                        ui.label(if is_active { title.color(egui::Color32::LIGHT_GREEN) } else { title });
                        ui.label(
                            egui::RichText::new(format!("{} · {} · {}", item.subject, item.grade, item.course_type))
                                .small()
                                .color(egui::Color32::GRAY),
                        );
                        ui.label(format!("⏱ {}", item.duration));
                        if ui.button(if is_active { "▶ Playing" } else { "▶ Play" }).clicked() {
                            clicked = Some(item.id);
                        }
                    });
                });
            }
        });
    });
    clicked
}

/// Email field plus sign in/out. No password: the directory only decides
/// which classes an address may see.
pub fn show_sign_in(ui: &mut egui::Ui, email: &mut String, gate: &AccessGate) -> Option<SignInAction> {
    let mut action = None;

    match gate.state() {
        SignInState::SignedOut => {
            ui.label("Email:");
            let response = ui.add(egui::TextEdit::singleline(email).desired_width(200.0));
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Sign in").clicked() || submitted {
                action = Some(SignInAction::SignIn(email.clone()));
            }
        }
        SignInState::SignedIn(user) => {
            ui.label(format!("👤 {}", user.email));
            if ui.button("Sign out").clicked() {
                action = Some(SignInAction::SignOut);
            }
        }
    }

    action
}

/// Shown instead of the cards when access was not granted.
pub fn show_access_message(ui: &mut egui::Ui, outcome: &AccessOutcome) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        let color = match outcome {
            AccessOutcome::SignedOut => ui.visuals().text_color(),
            _ => egui::Color32::from_rgb(230, 150, 80),
        };
        ui.label(egui::RichText::new(outcome.message()).size(16.0).color(color));
    });
}

#[cfg(test)]
mod tests {

    use eframe::egui;
    use crate::core::{AccessOutcome, AppConfig, Catalog, JsonAccessDirectory, SignInState};
    use crate::gui::app::{key_code, player_status, ClassPlayerApp};
    use crate::gui::catalog_view::set_selected;
    use crate::player::{
        CatalogLayout, ControlAction, ControllerState, LayoutKind, ShortcutKey, UiRequest,
    };
    use std::time::{Duration, Instant};

    fn directory() -> JsonAccessDirectory {
        JsonAccessDirectory::from_json(
            r#"{
                "physics@example.com": {"access": "Physics"},
                "free@example.com": {"access": ["free"]},
                "empty@example.com": {"access": ""}
            }"#,
        )
        .unwrap()
    }

    // Test helper to create an app without egui or config files
    fn create_test_app(with_directory: bool) -> ClassPlayerApp {
        let catalog = Catalog::builtin().expect("built-in catalog should parse");
        ClassPlayerApp::from_parts(AppConfig::default(), catalog, with_directory.then(directory))
    }

    #[test]
    fn test_without_directory_everything_is_visible() {
        let app = create_test_app(false);
        assert!(!app.access_gated());
        assert_eq!(app.visible_items().len(), app.catalog.len());
        assert_eq!(app.controller.state(), ControllerState::Idle);
        assert_eq!(app.controller.layout(), LayoutKind::Expanded);
    }

    #[test]
    fn test_directory_hides_catalog_until_sign_in() {
        let app = create_test_app(true);
        assert!(app.access_gated());
        assert!(app.visible_items().is_empty());
        assert_eq!(app.access_gate.outcome(), &AccessOutcome::SignedOut);
    }

    #[test]
    fn test_sign_in_filters_by_segment() {
        let mut app = create_test_app(true);
        app.sign_in("  Physics@Example.com ");

        assert!(!app.access_gated());
        let items = app.visible_items();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.subject == "Physics"));
        assert_eq!(app.config.last_signed_in_email.as_deref(), Some("Physics@Example.com"));
    }

    #[test]
    fn test_segment_matches_course_type() {
        let mut app = create_test_app(true);
        app.sign_in("free@example.com");
        let items = app.visible_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].course_type, "Free");
    }

    #[test]
    fn test_unknown_and_empty_access() {
        let mut app = create_test_app(true);

        app.sign_in("stranger@example.com");
        assert_eq!(app.access_gate.outcome(), &AccessOutcome::NotAuthorized);
        assert!(app.access_gated());
        assert_eq!(app.status_message, AccessOutcome::NotAuthorized.message());
        assert!(app.config.last_signed_in_email.is_none());

        app.sign_in("empty@example.com");
        assert_eq!(app.access_gate.outcome(), &AccessOutcome::NoSegments);
        assert!(app.visible_items().is_empty());
    }

    #[test]
    fn test_blank_email_is_ignored() {
        let mut app = create_test_app(true);
        app.sign_in("   ");
        assert_eq!(app.access_gate.state(), &SignInState::SignedOut);
        assert!(!app.status_message.is_empty());
    }

    #[test]
    fn test_sign_out_closes_player() {
        let mut app = create_test_app(true);
        app.sign_in("physics@example.com");
        app.open_item(2);
        assert_eq!(app.controller.state(), ControllerState::Loading);

        app.sign_out();
        assert_eq!(app.controller.state(), ControllerState::Idle);
        assert!(app.visible_items().is_empty());
        assert!(app.config.last_signed_in_email.is_none());
    }

    #[test]
    fn test_open_item_outside_access_is_refused() {
        let mut app = create_test_app(true);
        app.sign_in("physics@example.com");
        app.open_item(1);
        assert_eq!(app.controller.state(), ControllerState::Idle);
    }

    #[test]
    fn test_open_item_docks_player() {
        let mut app = create_test_app(false);
        app.open_item(3);
        assert_eq!(app.controller.state(), ControllerState::Loading);
        assert_eq!(app.controller.catalog_layout(), CatalogLayout::Docked);
        assert!(app.status_message.starts_with("Playing:"));
        assert_eq!(
            app.controller.view(LayoutKind::Expanded).title,
            "Chemistry - Organic Compounds - Part 1"
        );
    }

    #[test]
    fn test_note_action_requests_url() {
        let mut app = create_test_app(false);
        app.open_item(1);
        let request = app.dispatch(LayoutKind::Expanded, ControlAction::OpenNote);
        assert_eq!(request, Some(UiRequest::OpenUrl("https://example.com/notes/class1.pdf".to_string())));

        // Item 4 has no notes
        app.open_item(4);
        assert_eq!(app.dispatch(LayoutKind::Expanded, ControlAction::OpenNote), None);
    }

    #[test]
    fn test_filters_survive_access_changes() {
        let mut app = create_test_app(true);
        app.sign_in("physics@example.com");
        set_selected(&mut app.filter.subjects, "Physics", true);
        set_selected(&mut app.filter.grades, "HSC 26", true);
        assert_eq!(app.visible_items().len(), 1);

        app.sign_in("free@example.com");
        assert!(app.filter.subjects.is_empty());
        assert_eq!(app.filter.grades, vec!["HSC 26".to_string()]);
        assert_eq!(app.visible_items().len(), 1);
    }

    #[test]
    fn test_set_selected() {
        let mut values = Vec::new();
        set_selected(&mut values, "Physics", true);
        set_selected(&mut values, "Physics", true);
        assert_eq!(values, vec!["Physics".to_string()]);
        set_selected(&mut values, "Physics", false);
        assert!(values.is_empty());
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(ShortcutKey::from_code(&key_code(egui::Key::Space)), ShortcutKey::Space);
        assert_eq!(ShortcutKey::from_code(&key_code(egui::Key::ArrowLeft)), ShortcutKey::ArrowLeft);
        assert_eq!(ShortcutKey::from_code(&key_code(egui::Key::Escape)), ShortcutKey::Escape);
        assert_eq!(ShortcutKey::from_code(&key_code(egui::Key::M)), ShortcutKey::KeyM);
        assert_eq!(ShortcutKey::from_code(&key_code(egui::Key::F)), ShortcutKey::KeyF);
        assert_eq!(key_code(egui::Key::K), "KeyK");
    }

    #[test]
    fn test_player_status_follows_controller() {
        let mut app = create_test_app(false);
        assert_eq!(player_status(app.controller.state()), "Player idle");
        app.open_item(1);
        assert_eq!(player_status(app.controller.state()), "Player loading");
        app.controller.update(Instant::now());
        assert_eq!(player_status(app.controller.state()), "Player ready");
    }

    #[test]
    fn test_context_menu_blocked_while_playing() {
        let mut app = create_test_app(false);
        assert!(app.controller.context_menu_allowed());
        app.open_item(1);
        assert!(!app.controller.context_menu_allowed());

        let mut config = AppConfig::default();
        config.suppression.block_context_menu = false;
        let catalog = Catalog::builtin().expect("built-in catalog should parse");
        let mut app = ClassPlayerApp::from_parts(config, catalog, None);
        app.open_item(1);
        assert!(app.controller.context_menu_allowed());
    }

    #[test]
    fn test_volume_remembered_unless_muted() {
        let mut app = create_test_app(false);
        app.open_item(1);
        app.controller.update(Instant::now());

        app.controller.set_volume(35);
        app.remember_preferences();
        assert_eq!(app.config.default_volume, 35);

        app.controller.toggle_mute();
        app.remember_preferences();
        assert_eq!(app.config.default_volume, 35);
    }

    #[test]
    fn test_oversized_duration_does_not_break_playback() {
        let catalog = Catalog::from_json(
            r#"[{"id": 1, "title": "Long", "video_id": "z8xEcK-unFs", "duration": "18446744073709551615:00"}]"#,
        )
        .expect("catalog should parse");
        let mut app = ClassPlayerApp::from_parts(AppConfig::default(), catalog, None);
        app.open_item(1);
        app.controller.update(Instant::now() + Duration::from_secs(2));
        assert_eq!(app.controller.state(), ControllerState::Ready);
    }
}

use eframe::egui;
use std::time::{Duration, Instant};
use crate::core::{
    AccessGate, AccessOutcome, AppConfig, Catalog, CatalogFilter, JsonAccessDirectory, MediaItem, SignInState,
    UserIdentity,
};
use crate::gui::catalog_view::{self, SignInAction};
use crate::gui::controls;
use crate::player::{
    CatalogLayout, ControlAction, ControllerState, EmbedWidget, KeyDisposition, LayoutKind, PlayerController,
    ShortcutKey, SimulatedWidgetFactory, UiRequest,
};
use crate::player::suppression::SuppressionOutcome;

const IDLE_REPAINT: Duration = Duration::from_millis(250);

pub struct ClassPlayerApp {
    pub config: AppConfig,
    /// Everything the catalog file holds.
    pub catalog: Catalog,
    /// What the signed-in user may see; the whole catalog when no access
    /// directory is configured.
    pub visible_catalog: Catalog,
    pub filter: CatalogFilter,
    pub controller: PlayerController<SimulatedWidgetFactory>,
    pub access_gate: AccessGate,
    pub access_directory: Option<JsonAccessDirectory>,
    pub sign_in_email: String,
    pub status_message: String,
    pub fullscreen_applied: bool,
}

impl ClassPlayerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> anyhow::Result<Self> {
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::WHITE);
        cc.egui_ctx.set_visuals(visuals);

        let config = AppConfig::load()?;

        let catalog = match &config.catalog_path {
            Some(path) => match Catalog::load(path) {
                Ok(catalog) => catalog,
                Err(e) => {
                    log::error!("Failed to load catalog from {}: {}, using built-in catalog", path.display(), e);
                    Catalog::builtin()?
                }
            },
            None => Catalog::builtin()?,
        };
        if catalog.is_empty() {
            log::warn!("Catalog is empty, nothing to play");
        } else {
            log::info!("Catalog has {} classes", catalog.len());
        }

        let access_directory = match &config.access_directory_path {
            Some(path) => match JsonAccessDirectory::load(path) {
                Ok(directory) => Some(directory),
                Err(e) => {
                    log::error!("Failed to load access directory: {}", e);
                    None
                }
            },
            None => None,
        };

        let mut app = Self::from_parts(config, catalog, access_directory);

        if let Some(email) = app.config.last_signed_in_email.clone() {
            log::info!("Restoring sign-in for {}", email);
            app.sign_in(&email);
        }

        Ok(app)
    }

    /// Builds the app state without touching egui or the filesystem.
    pub fn from_parts(config: AppConfig, catalog: Catalog, access_directory: Option<JsonAccessDirectory>) -> Self {
        let factory = SimulatedWidgetFactory::from_catalog(&catalog);
        let controller = PlayerController::new(factory, config.player_settings(), config.window_size[0]);

        let mut app = Self {
            config,
            visible_catalog: Catalog::default(),
            catalog,
            filter: CatalogFilter::default(),
            controller,
            access_gate: AccessGate::new(),
            access_directory,
            sign_in_email: String::new(),
            status_message: String::new(),
            fullscreen_applied: false,
        };
        app.apply_access();
        app
    }

    pub fn sign_in(&mut self, email: &str) {
        let email = email.trim();
        if email.is_empty() {
            self.status_message = "Enter an email address to sign in".to_string();
            return;
        }

        let Some(directory) = &self.access_directory else {
            self.status_message = "No access directory configured".to_string();
            return;
        };

        let state = SignInState::SignedIn(UserIdentity { email: email.to_string() });
        let outcome = self.access_gate.observe(state, directory);
        self.status_message = outcome.message();
        if matches!(outcome, AccessOutcome::Granted(_)) {
            self.config.last_signed_in_email = Some(email.to_string());
        }
        self.apply_access();
    }

    pub fn sign_out(&mut self) {
        if let Some(directory) = &self.access_directory {
            self.access_gate.observe(SignInState::SignedOut, directory);
        }
        self.config.last_signed_in_email = None;
        self.sign_in_email.clear();
        self.status_message = "Signed out".to_string();
        self.apply_access();
    }

    /// Recomputes the visible catalog from the access outcome and closes the
    /// player if its class is no longer visible.
    pub fn apply_access(&mut self) {
        self.visible_catalog = if self.access_directory.is_none() {
            self.catalog.clone()
        } else {
            match self.access_gate.outcome().segments() {
                Some(segments) => self.catalog.filter_by_access(segments),
                None => Catalog::default(),
            }
        };

        let still_visible = self
            .controller
            .active_item()
            .map(|item| self.visible_catalog.get(item.id).is_some());
        if still_visible == Some(false) {
            log::info!("Active class is no longer accessible, closing player");
            self.controller.close();
        }

        // Drop filter values the new catalog no longer offers
        let grades = self.visible_catalog.grades();
        let subjects = self.visible_catalog.subjects();
        self.filter.grades.retain(|g| grades.contains(g));
        self.filter.subjects.retain(|s| subjects.contains(s));
        let courses = self.visible_catalog.courses();
        if !self.filter.course.as_ref().map_or(true, |c| courses.contains(c)) {
            self.filter.course = None;
        }
    }

    pub fn access_gated(&self) -> bool {
        self.access_directory.is_some() && self.access_gate.outcome().segments().is_none()
    }

    pub fn visible_items(&self) -> Vec<&MediaItem> {
        self.visible_catalog.filtered(&self.filter)
    }

    pub fn open_item(&mut self, id: u32) {
        let Some(item) = self.visible_catalog.get(id).cloned() else {
            log::warn!("Class {} is not in the visible catalog", id);
            return;
        };

        match self.controller.open(&item) {
            Ok(()) => self.status_message = format!("Playing: {}", item.title),
            Err(e) => {
                log::error!("Failed to open class {}: {}", id, e);
                self.status_message = format!("Could not open class: {}", e);
            }
        }
    }

    pub fn dispatch(&mut self, layout: LayoutKind, action: ControlAction) -> Option<UiRequest> {
        self.controller.dispatch(layout, action, &self.visible_catalog)
    }

    /// Carries the session's audio level into the saved defaults.
    pub fn remember_preferences(&mut self) {
        if !self.controller.is_muted() && self.controller.volume() > 0 {
            self.config.default_volume = self.controller.volume();
        }
    }

    pub fn persist_config(&self) {
        if let Err(e) = self.config.save() {
            log::error!("Failed to save config: {}", e);
        }
    }

    fn process_keys(&mut self, ctx: &egui::Context) {
        let text_input_focused = ctx.wants_keyboard_input();
        let pressed: Vec<egui::Key> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key { key, pressed: true, .. } => Some(*key),
                    _ => None,
                })
                .collect()
        });

        for key in pressed {
            let shortcut = ShortcutKey::from_code(&key_code(key));
            match self.controller.handle_key(&shortcut, text_input_focused) {
                KeyDisposition::Handled(action) => log::debug!("Key {:?} -> {:?}", key, action),
                KeyDisposition::Blocked => log::trace!("Key {:?} blocked while player is open", key),
                KeyDisposition::PassThrough => {}
            }
        }
    }

    fn handle_request(&mut self, ctx: &egui::Context, request: UiRequest) {
        match request {
            UiRequest::OpenUrl(url) => {
                log::info!("Opening {}", url);
                ctx.open_url(egui::OpenUrl::new_tab(url));
            }
        }
    }

    fn sync_fullscreen(&mut self, ctx: &egui::Context) {
        let wanted = self.controller.is_fullscreen();
        if wanted != self.fullscreen_applied {
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(wanted));
            self.fullscreen_applied = wanted;
        }
    }

    fn show_player(&mut self, ui: &mut egui::Ui, layout: LayoutKind) {
        let view = self.controller.view(layout).clone();
        let caption = self
            .controller
            .widget()
            .map(|widget| format!("{} · {:?}", widget.video_id(), widget.state()));
        let has_note = self.controller.note_link().is_some();

        ui.heading(&view.title);
        if !view.description.is_empty() {
            ui.label(egui::RichText::new(&view.description).color(egui::Color32::GRAY));
        }

        let height = match layout {
            LayoutKind::Compact => 200.0,
            LayoutKind::Expanded => (ui.available_width() * 9.0 / 16.0).min(360.0),
        };
        let context_menu = self.controller.context_menu_allowed();
        let menu_action = controls::show_video_area(ui, &view, caption.as_deref(), height, context_menu, has_note);
        if view.loading {
            ui.spinner();
        }
        if self.controller.suppression_outcome() == Some(SuppressionOutcome::Refused) {
            ui.label(
                egui::RichText::new("The embedded player kept its own controls.")
                    .small()
                    .color(egui::Color32::GRAY),
            );
        }

        let mut actions = controls::show_controls(ui, &view, has_note);
        actions.extend(menu_action);
        for action in actions {
            if let Some(request) = self.dispatch(layout, action) {
                self.handle_request(ui.ctx(), request);
            }
        }
    }

    fn show_catalog(&mut self, ui: &mut egui::Ui) {
        if self.access_gated() {
            catalog_view::show_access_message(ui, self.access_gate.outcome());
            return;
        }

        if catalog_view::show_filters(ui, &self.visible_catalog, &mut self.filter) {
            log::debug!("Catalog filter changed: {:?}", self.filter);
        }
        ui.separator();

        let active = self.controller.active_item().map(|item| item.id);
        let clicked = {
            let items = self.visible_catalog.filtered(&self.filter);
            catalog_view::show_cards(ui, &items, active)
        };
        if let Some(id) = clicked {
            self.open_item(id);
        }
    }

    fn show_compact_player(&mut self, ctx: &egui::Context) {
        let title = self.controller.view(LayoutKind::Compact).title.clone();
        let mut open = true;
        egui::Window::new(title)
            .id(egui::Id::new("compact_player"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                self.show_player(ui, LayoutKind::Compact);
            });

        if !open {
            self.controller.close();
        }
    }

    fn repaint_delay(&self, now: Instant) -> Duration {
        self.controller
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(IDLE_REPAINT)
            .min(self.controller.settings().progress_poll)
    }
}

pub fn player_status(state: ControllerState) -> &'static str {
    match state {
        ControllerState::Idle => "Player idle",
        ControllerState::Loading => "Player loading",
        ControllerState::Ready => "Player ready",
    }
}

/// Key codes in the form `ShortcutKey::from_code` understands.
pub fn key_code(key: egui::Key) -> String {
    match key {
        egui::Key::Space => "Space".to_string(),
        egui::Key::ArrowLeft => "ArrowLeft".to_string(),
        egui::Key::ArrowRight => "ArrowRight".to_string(),
        egui::Key::ArrowUp => "ArrowUp".to_string(),
        egui::Key::ArrowDown => "ArrowDown".to_string(),
        egui::Key::Escape => "Escape".to_string(),
        other => {
            let name = other.name();
            if name.len() == 1 && name.chars().all(|c| c.is_ascii_alphabetic()) {
                format!("Key{}", name)
            } else {
                name.to_string()
            }
        }
    }
}

impl eframe::App for ClassPlayerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.controller.set_viewport_width(ctx.screen_rect().width(), now);
        self.process_keys(ctx);
        self.controller.update(now);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.access_directory.is_none() {
                        return;
                    }
                    if let Some(action) = catalog_view::show_sign_in(ui, &mut self.sign_in_email, &self.access_gate) {
                        match action {
                            SignInAction::SignIn(email) => self.sign_in(&email),
                            SignInAction::SignOut => self.sign_out(),
                        }
                        self.persist_config();
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Status:");
                if self.status_message.is_empty() {
                    ui.label("Ready");
                } else {
                    ui.label(&self.status_message);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{} classes", self.visible_items().len()));
                    ui.separator();
                    ui.label(player_status(self.controller.state()));
                });
            });
        });

        match self.controller.catalog_layout() {
            CatalogLayout::Docked => {
                egui::SidePanel::right("catalog_side")
                    .default_width(320.0)
                    .min_width(260.0)
                    .show(ctx, |ui| {
                        ui.heading("Classes");
                        self.show_catalog(ui);
                    });

                egui::CentralPanel::default().show(ctx, |ui| {
                    self.show_player(ui, LayoutKind::Expanded);
                });
            }
            CatalogLayout::Covered => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.add_enabled_ui(false, |ui| self.show_catalog(ui));
                });
                self.show_compact_player(ctx);
            }
            CatalogLayout::Full => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Classes");
                    self.show_catalog(ui);
                });
            }
        }

        self.sync_fullscreen(ctx);

        ctx.request_repaint_after(self.repaint_delay(now));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.controller.close();
        self.remember_preferences();
        self.persist_config();
    }
}

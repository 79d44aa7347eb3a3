// =============================================================================
// PLAYER CONTROLLER
// =============================================================================
//
// Mediates between the catalog and one embedded widget instance.
//
// LIFECYCLE:
// - Idle -> Loading on open(), Loading -> Ready on the widget's ready event,
//   back to Idle on close() or when another item replaces the session
// - At most one session; teardown cancels its timers, destroys the widget and
//   drops its event receiver before anything new is created
//
// EVENT LOOP:
// - update(now) is one loop turn: drain widget events, then fire due timers
// - Widget callbacks arrive on a channel, so they never re-enter open/close
// - Timers are tagged with the session serial; a timer from a torn-down
//   session is discarded even if it fired in the same batch
//
// =============================================================================

use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use crate::core::{Catalog, MediaItem};
use crate::player::format::format_time;
use crate::player::keyboard::{shortcut_for, KeyDisposition, ShortcutAction, ShortcutKey};
use crate::player::quality::{best_available, QualityRequest};
use crate::player::suppression::{self, SuppressionConfig, SuppressionOutcome};
use crate::player::surface::{
    CatalogLayout, ControlAction, ControlSurfaces, ControlView, LayoutKind, Menu, PlayIcon, PlaybackRate,
};
use crate::player::timers::{FiredTimer, TimerKind, TimerQueue};
use crate::player::widget::{
    EmbedWidget, MountPoint, WidgetConfig, WidgetError, WidgetErrorCode, WidgetEvent, WidgetFactory, WidgetState,
};

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("invalid video id: {0:?}")]
    InvalidVideoId(String),
    #[error(transparent)]
    Widget(#[from] WidgetError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSettings {
    pub layout_breakpoint: f32,
    pub default_volume: u8,
    pub skip_seconds: f64,
    pub volume_step: u8,
    pub progress_poll: Duration,
    pub quality_check: Duration,
    pub reopen_delay: Duration,
    pub suppression: SuppressionConfig,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            layout_breakpoint: 768.0,
            default_volume: 100,
            skip_seconds: 10.0,
            volume_step: 10,
            progress_poll: Duration::from_secs(1),
            quality_check: Duration::from_secs(5),
            reopen_delay: Duration::from_millis(100),
            suppression: SuppressionConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Loading,
    Ready,
}

/// Something the UI has to do on the controller's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum UiRequest {
    OpenUrl(String),
}

/// Audio settings that outlive a session and seed the next one.
#[derive(Debug, Clone, Copy)]
struct AudioPreferences {
    volume: u8,
    muted: bool,
    last_nonzero_volume: u8,
    rate: PlaybackRate,
}

struct PlaybackSession<W: EmbedWidget> {
    serial: u64,
    item: MediaItem,
    widget: W,
    events: mpsc::UnboundedReceiver<WidgetEvent>,
    ready: bool,
    quality: QualityRequest,
    error: Option<WidgetErrorCode>,
    suppression: Option<SuppressionOutcome>,
}

impl<W: EmbedWidget> PlaybackSession<W> {
    /// Re-applies chrome suppression. Only a change of outcome is logged,
    /// since this runs on every state change and quality check.
    fn suppress_chrome(&mut self, config: &SuppressionConfig) {
        let outcome = suppression::apply(config, &mut self.widget);
        if self.suppression != Some(outcome) {
            log::debug!("Session {} chrome suppression: {:?}", self.serial, outcome);
            self.suppression = Some(outcome);
        }
    }
}

pub fn clamp_seek(target: f64, duration: f64) -> f64 {
    if !target.is_finite() {
        return 0.0;
    }
    target.clamp(0.0, duration.max(0.0))
}

fn mount_for(layout: LayoutKind) -> MountPoint {
    match layout {
        LayoutKind::Compact => MountPoint::Compact,
        LayoutKind::Expanded => MountPoint::Expanded,
    }
}

pub struct PlayerController<F: WidgetFactory> {
    factory: F,
    settings: PlayerSettings,
    session: Option<PlaybackSession<F::Widget>>,
    timers: TimerQueue,
    surfaces: ControlSurfaces,
    layout: LayoutKind,
    catalog_layout: CatalogLayout,
    audio: AudioPreferences,
    fullscreen: bool,
    pending_reopen: Option<MediaItem>,
    next_serial: u64,
}

impl<F: WidgetFactory> PlayerController<F> {
    pub fn new(factory: F, settings: PlayerSettings, viewport_width: f32) -> Self {
        let volume = settings.default_volume.min(100);
        let audio = AudioPreferences {
            volume,
            muted: false,
            last_nonzero_volume: if volume > 0 { volume } else { 100 },
            rate: PlaybackRate::default(),
        };
        let layout = LayoutKind::for_width(viewport_width, settings.layout_breakpoint);

        let mut surfaces = ControlSurfaces::new();
        surfaces.reset(audio.volume, audio.muted, audio.rate);

        Self {
            factory,
            settings,
            session: None,
            timers: TimerQueue::new(),
            surfaces,
            layout,
            catalog_layout: CatalogLayout::Full,
            audio,
            fullscreen: false,
            pending_reopen: None,
            next_serial: 0,
        }
    }

    // -------------------------------------------------------------------------
    // Session lifecycle
    // -------------------------------------------------------------------------

    pub fn open(&mut self, item: &MediaItem) -> Result<(), ControllerError> {
        if !item.has_valid_video_id() {
            log::warn!("Refusing to open {:?}: invalid video id {:?}", item.title, item.video_id);
            return Err(ControllerError::InvalidVideoId(item.video_id.clone()));
        }

        // An explicit open wins over a reopen still waiting on a layout flip
        self.pending_reopen = None;
        self.timers.cancel_kind(TimerKind::Reopen);

        if self.teardown() {
            log::debug!("Previous session torn down before opening {}", item.video_id);
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let mount = mount_for(self.layout);
        let widget = match self.factory.create(mount, &item.video_id, &WidgetConfig::chromeless(), tx) {
            Ok(widget) => widget,
            Err(e) => {
                log::error!("Failed to create widget for {}: {}", item.video_id, e);
                self.fullscreen = false;
                self.reset_views();
                self.catalog_layout = CatalogLayout::Full;
                return Err(e.into());
            }
        };

        self.next_serial += 1;
        let serial = self.next_serial;
        self.session = Some(PlaybackSession {
            serial,
            item: item.clone(),
            widget,
            events: rx,
            ready: false,
            quality: QualityRequest::Auto,
            error: None,
            suppression: None,
        });

        let title = item.title.clone();
        let description = item.description.clone().unwrap_or_default();
        let duration_text = item.duration.clone();
        let audio = self.audio;
        let fullscreen = self.fullscreen;
        self.surfaces.mirror(|view| {
            *view = ControlView {
                title: title.clone(),
                description: description.clone(),
                loading: true,
                duration_text: duration_text.clone(),
                volume_slider: if audio.muted { 0 } else { audio.volume },
                muted_icon: audio.muted || audio.volume == 0,
                active_rate: audio.rate,
                speed_label: audio.rate.label(),
                fullscreen,
                ..ControlView::default()
            };
        });

        self.catalog_layout = match self.layout {
            LayoutKind::Compact => CatalogLayout::Covered,
            LayoutKind::Expanded => CatalogLayout::Docked,
        };

        log::info!("Opened {:?} ({}) on {:?} mount, session {}", item.title, item.video_id, mount, serial);
        Ok(())
    }

    pub fn close(&mut self) {
        if self.pending_reopen.take().is_some() {
            self.timers.cancel_kind(TimerKind::Reopen);
        }
        self.close_session();
    }

    fn close_session(&mut self) {
        if self.teardown() {
            self.fullscreen = false;
            self.reset_views();
            self.catalog_layout = CatalogLayout::Full;
        }
    }

    /// Stops the session's timers, releases the widget and drops the event
    /// receiver. Returns false when there was nothing to tear down.
    fn teardown(&mut self) -> bool {
        let Some(mut session) = self.session.take() else {
            return false;
        };

        let cancelled = self.timers.cancel_owned_by(session.serial);
        session.widget.destroy();
        log::info!(
            "Closed session {} ({}), cancelled {} timer(s)",
            session.serial,
            session.item.video_id,
            cancelled
        );
        true
    }

    fn reset_views(&mut self) {
        self.surfaces.reset(self.audio.volume, self.audio.muted, self.audio.rate);
    }

    // -------------------------------------------------------------------------
    // Event loop
    // -------------------------------------------------------------------------

    pub fn update(&mut self, now: Instant) {
        self.drain_events(now);

        for fired in self.timers.fire_due(now) {
            self.on_timer(fired);
        }
    }

    fn drain_events(&mut self, now: Instant) {
        loop {
            let event = match self.session.as_mut() {
                Some(session) => match session.events.try_recv() {
                    Ok(event) => event,
                    Err(_) => break,
                },
                None => break,
            };

            match event {
                WidgetEvent::Ready => self.on_widget_ready(now),
                WidgetEvent::StateChanged(state) => self.on_widget_state_changed(state),
                WidgetEvent::Error(code) => self.on_widget_error(code),
            }
        }
    }

    fn on_timer(&mut self, fired: FiredTimer) {
        if fired.kind == TimerKind::Reopen {
            self.reopen_pending();
            return;
        }

        let live = self.session.as_ref().map(|session| session.serial);
        if fired.owner.is_none() || fired.owner != live {
            log::debug!("Discarding stale {:?} timer from session {:?}", fired.kind, fired.owner);
            return;
        }

        match fired.kind {
            TimerKind::ProgressPoll => self.poll_progress(),
            TimerKind::QualityCheck => self.check_quality(),
            TimerKind::Reopen => {}
        }
    }

    fn reopen_pending(&mut self) {
        if let Some(item) = self.pending_reopen.take() {
            log::info!("Reopening {} in {:?} layout", item.video_id, self.layout);
            if let Err(e) = self.open(&item) {
                log::error!("Failed to reopen {} after layout change: {}", item.video_id, e);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Widget callbacks
    // -------------------------------------------------------------------------

    pub fn on_widget_ready(&mut self, now: Instant) {
        let session = match self.session.as_mut() {
            Some(session) if !session.ready => session,
            Some(_) => return,
            None => {
                log::debug!("Ready event without a session");
                return;
            }
        };

        session.ready = true;
        session.error = None;

        let widget = &mut session.widget;
        widget.set_volume(self.audio.volume);
        if self.audio.muted {
            widget.mute();
        }
        widget.set_playback_rate(self.audio.rate.multiplier());

        let available = widget.available_quality_levels();
        match best_available(&available) {
            Some(best) => widget.set_playback_quality(best),
            None => log::debug!("No preferred quality tier among {:?}", available),
        }

        self.timers.every(TimerKind::ProgressPoll, self.settings.progress_poll, now, Some(session.serial));
        self.timers.every(TimerKind::QualityCheck, self.settings.quality_check, now, Some(session.serial));

        let duration_text = match widget.duration() {
            Ok(duration) if duration > 0.0 => Some(format_time(duration)),
            Ok(_) => None,
            Err(e) => {
                log::debug!("Duration not available at ready: {}", e);
                None
            }
        };

        log::info!(
            "Session {} ready (quality {:?})",
            session.serial,
            widget.playback_quality().ok()
        );
        session.suppress_chrome(&self.settings.suppression);

        self.surfaces.mirror(|view| {
            view.loading = false;
            view.error_message = None;
            if let Some(text) = &duration_text {
                view.duration_text = text.clone();
            }
        });
    }

    pub fn on_widget_state_changed(&mut self, state: WidgetState) {
        let session = match self.session.as_mut() {
            Some(session) => session,
            None => return,
        };

        log::debug!("Session {} widget state: {:?}", session.serial, state);

        let icon = if state == WidgetState::Playing { PlayIcon::Pause } else { PlayIcon::Play };
        self.surfaces.mirror(|view| view.play_icon = icon);

        // Some embeds bring their chrome back on every transition
        session.suppress_chrome(&self.settings.suppression);
    }

    pub fn on_widget_error(&mut self, code: WidgetErrorCode) {
        let session = match self.session.as_mut() {
            Some(session) => session,
            None => return,
        };

        log::error!("Widget error for {}: {:?}", session.item.video_id, code);
        session.error = Some(code);

        let message = code.user_message().to_string();
        self.surfaces.mirror(|view| {
            view.loading = false;
            view.error_message = Some(message.clone());
        });
    }

    // -------------------------------------------------------------------------
    // Controls (all no-ops until the session is ready)
    // -------------------------------------------------------------------------

    fn ready_session(&mut self) -> Option<&mut PlaybackSession<F::Widget>> {
        self.session.as_mut().filter(|session| session.ready)
    }

    pub fn toggle_play_pause(&mut self) {
        let Some(session) = self.ready_session() else {
            return;
        };

        if session.widget.state() == WidgetState::Playing {
            session.widget.pause();
        } else {
            session.widget.play();
        }
    }

    /// Returns the position that was requested, if a seek happened.
    pub fn seek_relative(&mut self, delta_seconds: f64) -> Option<f64> {
        let session = self.ready_session()?;

        let (current, duration) = match (session.widget.current_time(), session.widget.duration()) {
            (Ok(current), Ok(duration)) => (current, duration),
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("Cannot seek relative: {}", e);
                return None;
            }
        };
        if duration <= 0.0 {
            log::debug!("Seek ignored: duration not known yet");
            return None;
        }

        let target = clamp_seek(current + delta_seconds, duration);
        session.widget.seek_to(target, true);
        log::debug!("Seek {:+.0}s: {:.2}s -> {:.2}s", delta_seconds, current, target);
        Some(target)
    }

    pub fn seek_to_fraction(&mut self, fraction: f32) -> Option<f64> {
        let session = self.ready_session()?;

        let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
        let duration = match session.widget.duration() {
            Ok(duration) if duration > 0.0 => duration,
            Ok(_) => {
                log::debug!("Seek ignored: duration not known yet");
                return None;
            }
            Err(e) => {
                log::warn!("Cannot seek to fraction: {}", e);
                return None;
            }
        };

        let target = clamp_seek(fraction as f64 * duration, duration);
        session.widget.seek_to(target, true);
        Some(target)
    }

    pub fn set_volume(&mut self, level: i32) {
        let level = level.clamp(0, 100) as u8;
        let Some(session) = self.session.as_mut().filter(|session| session.ready) else {
            return;
        };

        if level > 0 && session.widget.is_muted() {
            session.widget.unmute();
        }
        session.widget.set_volume(level);

        self.audio.volume = level;
        self.audio.muted = level == 0;
        if level > 0 {
            self.audio.last_nonzero_volume = level;
        }

        self.surfaces.mirror(|view| {
            view.volume_slider = level;
            view.muted_icon = level == 0;
        });
    }

    pub fn toggle_mute(&mut self) {
        let Some(session) = self.session.as_mut().filter(|session| session.ready) else {
            return;
        };

        if self.audio.muted {
            let restored = if self.audio.last_nonzero_volume > 0 { self.audio.last_nonzero_volume } else { 100 };
            session.widget.unmute();
            session.widget.set_volume(restored);
            self.audio.volume = restored;
            self.audio.muted = false;
            self.surfaces.mirror(|view| {
                view.volume_slider = restored;
                view.muted_icon = false;
            });
        } else {
            if self.audio.volume > 0 {
                self.audio.last_nonzero_volume = self.audio.volume;
            }
            session.widget.mute();
            self.audio.muted = true;
            self.surfaces.mirror(|view| {
                view.volume_slider = 0;
                view.muted_icon = true;
            });
        }
    }

    pub fn set_playback_rate(&mut self, rate: PlaybackRate) {
        let Some(session) = self.session.as_mut().filter(|session| session.ready) else {
            return;
        };

        session.widget.set_playback_rate(rate.multiplier());
        self.audio.rate = rate;

        let label = rate.label();
        self.surfaces.mirror(|view| {
            view.active_rate = rate;
            view.speed_label = label.clone();
        });
        self.surfaces.close_menus();
    }

    pub fn set_quality(&mut self, request: QualityRequest) {
        let Some(session) = self.session.as_mut().filter(|session| session.ready) else {
            return;
        };

        let level = request.resolve(&session.widget.available_quality_levels());
        session.widget.set_playback_quality(level);
        session.quality = request;
        log::info!("Quality set to {} ({})", level.identifier(), request.label());

        self.surfaces.mirror(|view| view.active_quality = request);
        self.surfaces.close_menus();
    }

    pub fn poll_progress(&mut self) {
        let Some(session) = self.session.as_mut().filter(|session| session.ready) else {
            return;
        };

        let (current, duration) = match (session.widget.current_time(), session.widget.duration()) {
            (Ok(current), Ok(duration)) => (current, duration),
            (Err(WidgetError::NotReady), _) | (_, Err(WidgetError::NotReady)) => {
                log::debug!("Progress poll skipped: widget not answering yet");
                return;
            }
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("Progress update error: {}", e);
                return;
            }
        };

        if duration <= 0.0 {
            return;
        }

        let percent = ((current / duration) * 100.0).clamp(0.0, 100.0) as f32;
        let current_text = format_time(current);
        let duration_text = format_time(duration);
        self.surfaces.mirror(|view| {
            view.progress_percent = percent;
            view.current_time_text = current_text.clone();
            view.duration_text = duration_text.clone();
        });
    }

    /// Periodic re-assertion: keep the best tier while the user asked for
    /// `Auto`, and hide any chrome the embed brought back.
    pub fn check_quality(&mut self) {
        let Some(session) = self.session.as_mut().filter(|session| session.ready) else {
            return;
        };

        if session.quality == QualityRequest::Auto {
            if let Some(best) = best_available(&session.widget.available_quality_levels()) {
                match session.widget.playback_quality() {
                    Ok(current) if current == best => {}
                    Ok(current) => {
                        log::info!("Quality drifted to {}, forcing {}", current.identifier(), best.identifier());
                        session.widget.set_playback_quality(best);
                    }
                    Err(e) => log::debug!("Quality check skipped: {}", e),
                }
            }
        }

        session.suppress_chrome(&self.settings.suppression);
    }

    pub fn toggle_fullscreen(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        self.fullscreen = !self.fullscreen;
        let fullscreen = self.fullscreen;
        session.suppress_chrome(&self.settings.suppression);
        self.surfaces.mirror(|view| view.fullscreen = fullscreen);
    }

    // -------------------------------------------------------------------------
    // Layout, navigation, keyboard, menus
    // -------------------------------------------------------------------------

    /// Re-derives the layout from the viewport width. A live session cannot
    /// move between mount points, so it is closed and the same item is
    /// reopened after `reopen_delay`. Returns true when the layout flipped.
    pub fn set_viewport_width(&mut self, width: f32, now: Instant) -> bool {
        let layout = LayoutKind::for_width(width, self.settings.layout_breakpoint);
        if layout == self.layout {
            return false;
        }

        log::info!("Layout changed {:?} -> {:?} (width {:.0})", self.layout, layout, width);
        self.layout = layout;

        if let Some(item) = self.session.as_ref().map(|session| session.item.clone()) {
            self.close_session();
            self.pending_reopen = Some(item);
            self.timers.cancel_kind(TimerKind::Reopen);
            self.timers.once(TimerKind::Reopen, self.settings.reopen_delay, now, None);
        }
        true
    }

    pub fn open_next(&mut self, catalog: &Catalog) -> Result<bool, ControllerError> {
        let next = self
            .active_item()
            .and_then(|item| catalog.next_after(item.id))
            .cloned();
        match next {
            Some(item) => self.open(&item).map(|_| true),
            None => Ok(false),
        }
    }

    pub fn open_previous(&mut self, catalog: &Catalog) -> Result<bool, ControllerError> {
        let previous = self
            .active_item()
            .and_then(|item| catalog.previous_before(item.id))
            .cloned();
        match previous {
            Some(item) => self.open(&item).map(|_| true),
            None => Ok(false),
        }
    }

    pub fn handle_key(&mut self, key: &ShortcutKey, text_input_focused: bool) -> KeyDisposition {
        if self.session.is_none() || text_input_focused {
            return KeyDisposition::PassThrough;
        }

        let Some(action) = shortcut_for(key) else {
            let suppression = &self.settings.suppression;
            return if suppression.enabled && suppression.block_native_shortcuts {
                KeyDisposition::Blocked
            } else {
                KeyDisposition::PassThrough
            };
        };

        match action {
            ShortcutAction::TogglePlayPause => self.toggle_play_pause(),
            ShortcutAction::SkipBackward => {
                self.seek_relative(-self.settings.skip_seconds);
            }
            ShortcutAction::SkipForward => {
                self.seek_relative(self.settings.skip_seconds);
            }
            ShortcutAction::VolumeUp => self.step_volume(self.settings.volume_step as i32),
            ShortcutAction::VolumeDown => self.step_volume(-(self.settings.volume_step as i32)),
            ShortcutAction::ToggleMute => self.toggle_mute(),
            ShortcutAction::ToggleFullscreen => self.toggle_fullscreen(),
            ShortcutAction::Close => self.close(),
        }
        KeyDisposition::Handled(action)
    }

    fn step_volume(&mut self, delta: i32) {
        let fallback = self.audio.volume;
        let current = match self.session.as_ref().filter(|session| session.ready) {
            Some(session) => session.widget.volume().unwrap_or(fallback),
            None => return,
        };
        self.set_volume(current as i32 + delta);
    }

    pub fn toggle_menu(&mut self, layout: LayoutKind, menu: Menu) {
        self.surfaces.toggle_menu(layout, menu);
    }

    pub fn close_menus(&mut self) {
        self.surfaces.close_menus();
    }

    /// Applies an action from either surface; both layouts share this path.
    pub fn dispatch(&mut self, layout: LayoutKind, action: ControlAction, catalog: &Catalog) -> Option<UiRequest> {
        match action {
            ControlAction::TogglePlayPause => self.toggle_play_pause(),
            ControlAction::SkipBackward => {
                self.seek_relative(-self.settings.skip_seconds);
            }
            ControlAction::SkipForward => {
                self.seek_relative(self.settings.skip_seconds);
            }
            ControlAction::ToggleMute => self.toggle_mute(),
            ControlAction::SetVolume(level) => self.set_volume(level as i32),
            ControlAction::SeekToFraction(fraction) => {
                self.seek_to_fraction(fraction);
            }
            ControlAction::ToggleMenu(menu) => self.toggle_menu(layout, menu),
            ControlAction::SelectRate(rate) => self.set_playback_rate(rate),
            ControlAction::SelectQuality(request) => self.set_quality(request),
            ControlAction::ToggleFullscreen => self.toggle_fullscreen(),
            ControlAction::Next => {
                if let Err(e) = self.open_next(catalog) {
                    log::error!("Failed to open next item: {}", e);
                }
            }
            ControlAction::Previous => {
                if let Err(e) = self.open_previous(catalog) {
                    log::error!("Failed to open previous item: {}", e);
                }
            }
            ControlAction::OpenNote => return self.note_link().map(UiRequest::OpenUrl),
            ControlAction::Close => self.close(),
        }
        None
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn state(&self) -> ControllerState {
        match &self.session {
            None => ControllerState::Idle,
            Some(session) if session.ready => ControllerState::Ready,
            Some(_) => ControllerState::Loading,
        }
    }

    pub fn layout(&self) -> LayoutKind {
        self.layout
    }

    pub fn catalog_layout(&self) -> CatalogLayout {
        self.catalog_layout
    }

    pub fn view(&self, layout: LayoutKind) -> &ControlView {
        self.surfaces.view(layout)
    }

    pub fn active_item(&self) -> Option<&MediaItem> {
        self.session.as_ref().map(|session| &session.item)
    }

    pub fn note_link(&self) -> Option<String> {
        self.active_item().and_then(|item| item.note_link.clone())
    }

    pub fn widget(&self) -> Option<&F::Widget> {
        self.session.as_ref().map(|session| &session.widget)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn volume(&self) -> u8 {
        self.audio.volume
    }

    pub fn is_muted(&self) -> bool {
        self.audio.muted
    }

    /// The most recent chrome suppression outcome for the open session.
    pub fn suppression_outcome(&self) -> Option<SuppressionOutcome> {
        self.session.as_ref().and_then(|session| session.suppression)
    }

    pub fn context_menu_allowed(&self) -> bool {
        suppression::context_menu_allowed(&self.settings.suppression, self.session.is_some())
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }
}

// Inspection used by the controller tests
#[cfg(test)]
impl<F: WidgetFactory> PlayerController<F> {
    pub fn session_serial(&self) -> Option<u64> {
        self.session.as_ref().map(|session| session.serial)
    }

    pub fn has_pending_reopen(&self) -> bool {
        self.pending_reopen.is_some()
    }

    pub fn playback_rate(&self) -> PlaybackRate {
        self.audio.rate
    }

    pub fn quality_request(&self) -> Option<QualityRequest> {
        self.session.as_ref().map(|session| session.quality)
    }

    pub fn last_error(&self) -> Option<WidgetErrorCode> {
        self.session.as_ref().and_then(|session| session.error)
    }

    pub fn active_timers(&self, kind: TimerKind) -> usize {
        self.timers.active(kind)
    }

    pub fn surfaces(&self) -> &ControlSurfaces {
        &self.surfaces
    }
}

impl<F: WidgetFactory> Drop for PlayerController<F> {
    fn drop(&mut self) {
        log::debug!("PlayerController dropping");
        self.teardown();
    }
}

use serde::{Deserialize, Serialize};
use crate::player::quality::QualityRequest;

/// Which of the two control surfaces is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutKind {
    Compact,
    Expanded,
}

impl LayoutKind {
    /// Widths strictly below the breakpoint are compact.
    pub fn for_width(width: f32, breakpoint: f32) -> Self {
        if width < breakpoint {
            LayoutKind::Compact
        } else {
            LayoutKind::Expanded
        }
    }
}

/// How the catalog is laid out around the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogLayout {
    /// No session: full card grid.
    Full,
    /// Expanded session: catalog docked beside the player.
    Docked,
    /// Compact session: player modal covers the catalog.
    Covered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackRate {
    X0_25,
    X0_5,
    X0_75,
    #[default]
    X1,
    X1_25,
    X1_5,
    X1_75,
    X2,
}

impl PlaybackRate {
    pub const ALL: [PlaybackRate; 8] = [
        PlaybackRate::X0_25,
        PlaybackRate::X0_5,
        PlaybackRate::X0_75,
        PlaybackRate::X1,
        PlaybackRate::X1_25,
        PlaybackRate::X1_5,
        PlaybackRate::X1_75,
        PlaybackRate::X2,
    ];

    pub fn multiplier(&self) -> f32 {
        match self {
            Self::X0_25 => 0.25,
            Self::X0_5 => 0.5,
            Self::X0_75 => 0.75,
            Self::X1 => 1.0,
            Self::X1_25 => 1.25,
            Self::X1_5 => 1.5,
            Self::X1_75 => 1.75,
            Self::X2 => 2.0,
        }
    }

    pub fn label(&self) -> String {
        format!("{}x", self.multiplier())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    Play,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Speed,
    Quality,
}

/// Everything one control surface displays. Nothing here is authoritative
/// except the menu flags, which are transient per surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlView {
    pub title: String,
    pub description: String,
    pub loading: bool,
    pub error_message: Option<String>,
    pub play_icon: PlayIcon,
    pub volume_slider: u8,
    pub muted_icon: bool,
    pub progress_percent: f32,
    pub current_time_text: String,
    pub duration_text: String,
    pub active_rate: PlaybackRate,
    pub speed_label: String,
    pub active_quality: QualityRequest,
    pub fullscreen: bool,
    pub speed_menu_open: bool,
    pub quality_menu_open: bool,
}

impl Default for ControlView {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            loading: false,
            error_message: None,
            play_icon: PlayIcon::Play,
            volume_slider: 100,
            muted_icon: false,
            progress_percent: 0.0,
            current_time_text: "0:00".to_string(),
            duration_text: "0:00".to_string(),
            active_rate: PlaybackRate::default(),
            speed_label: PlaybackRate::default().label(),
            active_quality: QualityRequest::Auto,
            fullscreen: false,
            speed_menu_open: false,
            quality_menu_open: false,
        }
    }
}

impl ControlView {
    /// True when the session-derived fields match; menu flags are ignored.
    pub fn mirrors(&self, other: &ControlView) -> bool {
        let mut a = self.clone();
        let mut b = other.clone();
        a.speed_menu_open = false;
        a.quality_menu_open = false;
        b.speed_menu_open = false;
        b.quality_menu_open = false;
        a == b
    }
}

/// The two render targets. Every session mutation goes through `mirror`,
/// which applies the same update to both.
#[derive(Debug, Clone, Default)]
pub struct ControlSurfaces {
    compact: ControlView,
    expanded: ControlView,
}

impl ControlSurfaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mirror(&mut self, update: impl Fn(&mut ControlView)) {
        update(&mut self.compact);
        update(&mut self.expanded);
    }

    pub fn view(&self, layout: LayoutKind) -> &ControlView {
        match layout {
            LayoutKind::Compact => &self.compact,
            LayoutKind::Expanded => &self.expanded,
        }
    }

    fn view_mut(&mut self, layout: LayoutKind) -> &mut ControlView {
        match layout {
            LayoutKind::Compact => &mut self.compact,
            LayoutKind::Expanded => &mut self.expanded,
        }
    }

    pub fn toggle_menu(&mut self, layout: LayoutKind, menu: Menu) {
        let view = self.view_mut(layout);
        match menu {
            Menu::Speed => view.speed_menu_open = !view.speed_menu_open,
            Menu::Quality => view.quality_menu_open = !view.quality_menu_open,
        }
    }

    pub fn close_menus(&mut self) {
        self.mirror(|view| {
            view.speed_menu_open = false;
            view.quality_menu_open = false;
        });
    }

    pub fn in_sync(&self) -> bool {
        self.compact.mirrors(&self.expanded)
    }

    /// Back to the idle state, keeping the audio preferences visible.
    pub fn reset(&mut self, volume: u8, muted: bool, rate: PlaybackRate) {
        self.mirror(|view| {
            *view = ControlView {
                volume_slider: if muted { 0 } else { volume },
                muted_icon: muted || volume == 0,
                active_rate: rate,
                speed_label: rate.label(),
                ..ControlView::default()
            };
        });
    }
}

/// User intent coming from either surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    TogglePlayPause,
    SkipBackward,
    SkipForward,
    ToggleMute,
    SetVolume(u8),
    SeekToFraction(f32),
    ToggleMenu(Menu),
    SelectRate(PlaybackRate),
    SelectQuality(QualityRequest),
    ToggleFullscreen,
    Next,
    Previous,
    OpenNote,
    Close,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_breakpoint() {
        assert_eq!(LayoutKind::for_width(767.0, 768.0), LayoutKind::Compact);
        assert_eq!(LayoutKind::for_width(768.0, 768.0), LayoutKind::Expanded);
        assert_eq!(LayoutKind::for_width(1920.0, 768.0), LayoutKind::Expanded);
    }

    #[test]
    fn test_rate_labels() {
        assert_eq!(PlaybackRate::X1.label(), "1x");
        assert_eq!(PlaybackRate::X1_5.label(), "1.5x");
        assert_eq!(PlaybackRate::X0_25.label(), "0.25x");
        assert_eq!(PlaybackRate::default(), PlaybackRate::X1);
        assert_eq!(ControlView::default().speed_label, "1x");
    }

    #[test]
    fn test_mirror_updates_both_views() {
        let mut surfaces = ControlSurfaces::new();
        surfaces.mirror(|view| view.volume_slider = 42);
        assert_eq!(surfaces.view(LayoutKind::Compact).volume_slider, 42);
        assert_eq!(surfaces.view(LayoutKind::Expanded).volume_slider, 42);
        assert!(surfaces.in_sync());
    }

    #[test]
    fn test_menus_are_per_view() {
        let mut surfaces = ControlSurfaces::new();
        surfaces.toggle_menu(LayoutKind::Compact, Menu::Speed);
        assert!(surfaces.view(LayoutKind::Compact).speed_menu_open);
        assert!(!surfaces.view(LayoutKind::Expanded).speed_menu_open);
        // Menu flags do not count as divergence
        assert!(surfaces.in_sync());

        surfaces.close_menus();
        assert!(!surfaces.view(LayoutKind::Compact).speed_menu_open);
    }

    #[test]
    fn test_reset_keeps_preferences() {
        let mut surfaces = ControlSurfaces::new();
        surfaces.mirror(|view| view.title = "Lecture".to_string());
        surfaces.reset(30, true, PlaybackRate::X1_5);

        let view = surfaces.view(LayoutKind::Expanded);
        assert!(view.title.is_empty());
        assert_eq!(view.volume_slider, 0);
        assert!(view.muted_icon);
        assert_eq!(view.speed_label, "1.5x");
    }
}

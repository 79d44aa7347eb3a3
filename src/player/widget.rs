// =============================================================================
// EMBED WIDGET CONTRACT
// =============================================================================
//
// The embedded video widget is an external collaborator. The controller only
// talks to it through `EmbedWidget` (imperative commands and queries) and
// receives its callbacks as `WidgetEvent`s on a channel, never synchronously.
//
// =============================================================================

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Sender half handed to the widget at creation time.
pub type WidgetEvents = mpsc::UnboundedSender<WidgetEvent>;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum WidgetError {
    #[error("widget is not ready to answer queries yet")]
    NotReady,
    #[error("embedded content refused cross-origin access")]
    CrossOrigin,
    #[error("widget has been destroyed")]
    Destroyed,
    #[error("failed to create widget: {0}")]
    Creation(String),
}

/// Playback state reported by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

/// Error codes the widget reports through its error event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetErrorCode {
    InvalidParameter,
    Html5Playback,
    NotFound,
    EmbeddingRefused,
    Unknown(i32),
}

impl WidgetErrorCode {
    pub fn from_code(code: i32) -> Self {
        match code {
            2 => Self::InvalidParameter,
            5 => Self::Html5Playback,
            100 => Self::NotFound,
            101 | 150 => Self::EmbeddingRefused,
            other => Self::Unknown(other),
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound => "This video is unavailable.",
            Self::EmbeddingRefused => "This video cannot be played here.",
            _ => "Video failed to load. Please try again later.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    Ready,
    StateChanged(WidgetState),
    Error(WidgetErrorCode),
}

/// Internal quality identifiers understood by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    Hd1080,
    Hd720,
    Large,
    Medium,
    Small,
    Tiny,
    Auto,
}

impl QualityLevel {
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Hd1080 => "hd1080",
            Self::Hd720 => "hd720",
            Self::Large => "large",
            Self::Medium => "medium",
            Self::Small => "small",
            Self::Tiny => "tiny",
            Self::Auto => "auto",
        }
    }
}

/// Where the widget is mounted. Compact and expanded layouts use different
/// mount points, so a live widget is never migrated between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountPoint {
    Compact,
    Expanded,
}

/// Configuration bag passed to the widget constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    pub autoplay: bool,
    pub native_controls: bool,
    pub keyboard: bool,
    pub fullscreen_button: bool,
    pub annotations: bool,
    pub inline_playback: bool,
    pub related_content: bool,
    pub captions: bool,
    pub quality_hint: QualityLevel,
}

impl WidgetConfig {
    /// Every native surface turned off; only the custom controls drive playback.
    pub fn chromeless() -> Self {
        Self {
            autoplay: false,
            native_controls: false,
            keyboard: false,
            fullscreen_button: false,
            annotations: false,
            inline_playback: true,
            related_content: false,
            captions: false,
            quality_hint: QualityLevel::Hd1080,
        }
    }
}

pub trait EmbedWidget {
    fn play(&mut self);
    fn pause(&mut self);
    fn seek_to(&mut self, seconds: f64, allow_seek_ahead: bool);
    fn current_time(&self) -> Result<f64, WidgetError>;
    fn duration(&self) -> Result<f64, WidgetError>;
    fn set_volume(&mut self, volume: u8);
    fn volume(&self) -> Result<u8, WidgetError>;
    fn mute(&mut self);
    fn unmute(&mut self);
    fn is_muted(&self) -> bool;
    fn set_playback_rate(&mut self, rate: f32);
    fn set_playback_quality(&mut self, quality: QualityLevel);
    fn playback_quality(&self) -> Result<QualityLevel, WidgetError>;
    fn available_quality_levels(&self) -> Vec<QualityLevel>;
    fn state(&self) -> WidgetState;
    /// Best-effort hiding of the widget's built-in UI. Embedded content may
    /// refuse with `WidgetError::CrossOrigin`.
    fn suppress_chrome(&mut self) -> Result<(), WidgetError>;
    fn destroy(&mut self);
}

pub trait WidgetFactory {
    type Widget: EmbedWidget;

    fn create(
        &mut self,
        mount: MountPoint,
        video_id: &str,
        config: &WidgetConfig,
        events: WidgetEvents,
    ) -> Result<Self::Widget, WidgetError>;
}

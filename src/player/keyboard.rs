/// Keys the controller knows about, named by their physical key code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutKey {
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    KeyM,
    KeyF,
    Escape,
    Other(String),
}

impl ShortcutKey {
    pub fn from_code(code: &str) -> Self {
        match code {
            "Space" => Self::Space,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "KeyM" => Self::KeyM,
            "KeyF" => Self::KeyF,
            "Escape" => Self::Escape,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShortcutAction {
    TogglePlayPause,
    SkipBackward,
    SkipForward,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    ToggleFullscreen,
    Close,
}

/// What happened to a key press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyDisposition {
    /// Mapped to a custom control.
    Handled(ShortcutAction),
    /// Swallowed so it never reaches the embed.
    Blocked,
    /// Not ours; let it through.
    PassThrough,
}

pub fn shortcut_for(key: &ShortcutKey) -> Option<ShortcutAction> {
    match key {
        ShortcutKey::Space => Some(ShortcutAction::TogglePlayPause),
        ShortcutKey::ArrowLeft => Some(ShortcutAction::SkipBackward),
        ShortcutKey::ArrowRight => Some(ShortcutAction::SkipForward),
        ShortcutKey::ArrowUp => Some(ShortcutAction::VolumeUp),
        ShortcutKey::ArrowDown => Some(ShortcutAction::VolumeDown),
        ShortcutKey::KeyM => Some(ShortcutAction::ToggleMute),
        ShortcutKey::KeyF => Some(ShortcutAction::ToggleFullscreen),
        ShortcutKey::Escape => Some(ShortcutAction::Close),
        ShortcutKey::Other(_) => None,
    }
}

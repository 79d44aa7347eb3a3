// Chrome suppression hides the embed's own controls so only the custom
// surfaces are usable. It is cosmetic and best effort: embedded content can
// refuse access, and nothing here stops a determined user from reaching the
// native player.

use serde::{Deserialize, Serialize};
use crate::player::widget::{EmbedWidget, WidgetError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuppressionConfig {
    pub enabled: bool,
    /// Swallow keys the embed would otherwise bind while a session is open.
    pub block_native_shortcuts: bool,
    /// Swallow secondary clicks on the video area while a session is open.
    pub block_context_menu: bool,
}

impl Default for SuppressionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            block_native_shortcuts: true,
            block_context_menu: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressionOutcome {
    Disabled,
    Applied,
    Refused,
    Failed,
}

pub fn apply<W: EmbedWidget>(config: &SuppressionConfig, widget: &mut W) -> SuppressionOutcome {
    if !config.enabled {
        return SuppressionOutcome::Disabled;
    }

    match widget.suppress_chrome() {
        Ok(()) => {
            log::debug!("Native chrome suppressed");
            SuppressionOutcome::Applied
        }
        Err(WidgetError::CrossOrigin) => {
            log::debug!("Embedded content refused chrome suppression (cross-origin)");
            SuppressionOutcome::Refused
        }
        Err(e) => {
            log::warn!("Chrome suppression failed: {}", e);
            SuppressionOutcome::Failed
        }
    }
}

/// Whether a secondary click on the video area may open a context menu.
pub fn context_menu_allowed(config: &SuppressionConfig, session_open: bool) -> bool {
    !(session_open && config.enabled && config.block_context_menu)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_menu_blocked_only_while_open() {
        let config = SuppressionConfig::default();
        assert!(!context_menu_allowed(&config, true));
        assert!(context_menu_allowed(&config, false));
    }

    #[test]
    fn test_context_menu_follows_config() {
        let config = SuppressionConfig {
            block_context_menu: false,
            ..SuppressionConfig::default()
        };
        assert!(context_menu_allowed(&config, true));

        let config = SuppressionConfig {
            enabled: false,
            ..SuppressionConfig::default()
        };
        assert!(context_menu_allowed(&config, true));
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use crate::player::{PlayerSettings, SuppressionConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Viewport widths below this use the compact layout.
    pub layout_breakpoint: f32,
    pub default_volume: u8,
    pub skip_seconds: f64,
    pub volume_step: u8,
    pub progress_poll_ms: u64,
    pub quality_check_secs: u64,
    pub reopen_delay_ms: u64,
    pub suppression: SuppressionConfig,
    pub catalog_path: Option<PathBuf>,
    pub access_directory_path: Option<PathBuf>,
    pub last_signed_in_email: Option<String>,
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            layout_breakpoint: 768.0,
            default_volume: 100,
            skip_seconds: 10.0,
            volume_step: 10,
            progress_poll_ms: 1000,
            quality_check_secs: 5,
            reopen_delay_ms: 100,
            suppression: SuppressionConfig::default(),
            catalog_path: None,
            access_directory_path: None,
            last_signed_in_email: None,
            window_size: [1200.0, 800.0],
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| anyhow::anyhow!("Failed to read config file at {}: {}", config_path.display(), e))?;

            match serde_json::from_str::<Self>(&content) {
                Ok(config) => {
                    log::info!("Loaded existing config from {}", config_path.display());
                    Ok(config)
                }
                Err(e) => {
                    log::warn!("Config file exists but has issues ({}), creating new one with defaults", e);
                    let new_config = Self::default();
                    new_config.save()
                        .map_err(|save_err| anyhow::anyhow!("Failed to save new config: {}", save_err))?;
                    log::info!("Created new config file at {}", config_path.display());
                    Ok(new_config)
                }
            }
        } else {
            log::info!("No config file found, creating default config");
            let config = Self::default();
            config.save()
                .map_err(|e| anyhow::anyhow!("Failed to save default config: {}", e))?;
            log::info!("Created new config file at {}", config_path.display());
            Ok(config)
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("class-player")
            .join("config.json")
    }

    /// Controller tunables; out-of-range values are clamped rather than rejected.
    pub fn player_settings(&self) -> PlayerSettings {
        PlayerSettings {
            layout_breakpoint: if self.layout_breakpoint > 0.0 { self.layout_breakpoint } else { 768.0 },
            default_volume: self.default_volume.min(100),
            skip_seconds: self.skip_seconds.abs(),
            volume_step: self.volume_step.clamp(1, 100),
            progress_poll: Duration::from_millis(self.progress_poll_ms.max(100)),
            quality_check: Duration::from_secs(self.quality_check_secs.max(1)),
            reopen_delay: Duration::from_millis(self.reopen_delay_ms),
            suppression: self.suppression.clone(),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Engine behaviour: autoscroll and drag arbitration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Autoscroll interval in milliseconds (0 = disabled)
    #[serde(default = "default_autoscroll_interval")]
    pub autoscroll_interval_ms: u64,
    /// Minimum drag displacement (viewport units) that counts as a page turn
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f64,
    /// Window after a drag release during which new drags are dropped
    #[serde(default = "default_drag_cooldown")]
    pub drag_cooldown_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoscroll_interval_ms: default_autoscroll_interval(),
            drag_threshold: default_drag_threshold(),
            drag_cooldown_ms: default_drag_cooldown(),
        }
    }
}

impl CarouselConfig {
    pub fn drag_cooldown(&self) -> Duration {
        Duration::from_millis(self.drag_cooldown_ms)
    }
}

/// Velocity profile of an animated viewport move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Constant speed
    Linear,
    /// Decelerates into the target slot
    #[default]
    EaseOut,
}

/// Geometry and animation of the strip the carousel is shown in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Distance between the centers of two consecutive slots
    #[serde(default = "default_slot_extent")]
    pub slot_extent: f64,
    /// Animate moves requested with `animate = true`
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Duration of an animated move in milliseconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Frame rate while an animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    #[serde(default)]
    pub easing: EasingType,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            slot_extent: default_slot_extent(),
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            animation_fps: default_animation_fps(),
            easing: EasingType::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_autoscroll_interval() -> u64 {
    3000
}

fn default_drag_threshold() -> f64 {
    50.0
}

fn default_drag_cooldown() -> u64 {
    150
}

fn default_slot_extent() -> f64 {
    375.0
}

fn default_animation_duration() -> u64 {
    300
}

fn default_animation_fps() -> u32 {
    60
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML document
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Render configuration as a TOML document
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/bannerloop/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("bannerloop")
            .join("config.toml")
    }
}

//! Collection configuration.
//!
//! Everything a [`CollectionController`](crate::controller::CollectionController)
//! and its [`CollectionView`](crate::view::CollectionView) can be tuned with,
//! loadable from a TOML file. Every field has a default, so an empty file is
//! a valid configuration:
//!
//! ```toml
//! strategy = "identity"
//! skip_stationary_moves = false
//!
//! [layout]
//! width = 320.0
//! cell_height = 60.0
//! spacing = 0.0
//!
//! [animation]
//! duration_ms = 300
//! easing = "ease_in_out"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use horizon_reflow_core::logging::targets;

use crate::diff::DiffStrategy;
use crate::error::ConfigError;
use crate::view::{Easing, ListLayout};

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Top-level configuration of a collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Diff strategy used by updates.
    pub strategy: DiffStrategy,
    /// Drop moves whose source and destination coincide before applying.
    pub skip_stationary_moves: bool,
    /// Row geometry.
    pub layout: LayoutConfig,
    /// Batch animation timing.
    pub animation: AnimationConfig,
}

/// Row geometry of the list layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub width: f32,
    pub cell_height: f32,
    pub spacing: f32,
}

impl LayoutConfig {
    /// Builds the layout these values describe.
    pub fn to_layout(&self) -> ListLayout {
        ListLayout::new(self.width, self.cell_height, self.spacing)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: ListLayout::DEFAULT_WIDTH,
            cell_height: ListLayout::DEFAULT_CELL_HEIGHT,
            spacing: 0.0,
        }
    }
}

/// Timing of batch animations. A zero duration commits without animating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub duration_ms: u64,
    pub easing: Easing,
}

impl AnimationConfig {
    /// Default animation length in milliseconds.
    pub const DEFAULT_DURATION_MS: u64 = 300;

    /// The duration as a [`Duration`].
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: Self::DEFAULT_DURATION_MS,
            easing: Easing::default(),
        }
    }
}

impl CollectionConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            target: targets::CONFIG,
            path = %path.display(),
            strategy = config.strategy.name(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Serializes to a pretty-printed TOML document.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the configuration as TOML.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| ConfigError::io(path, e))
    }

    /// Checks values serde accepts but the layout cannot use.
    pub fn validate(&self) -> ConfigResult<()> {
        let layout = &self.layout;
        if !(layout.width.is_finite() && layout.width > 0.0) {
            return Err(ConfigError::invalid_value(
                "layout.width",
                format!("must be a positive number, got {}", layout.width),
            ));
        }
        if !(layout.cell_height.is_finite() && layout.cell_height > 0.0) {
            return Err(ConfigError::invalid_value(
                "layout.cell_height",
                format!("must be a positive number, got {}", layout.cell_height),
            ));
        }
        if !(layout.spacing.is_finite() && layout.spacing >= 0.0) {
            return Err(ConfigError::invalid_value(
                "layout.spacing",
                format!("must not be negative, got {}", layout.spacing),
            ));
        }
        Ok(())
    }
}

//! # Engine Configuration
//!
//! Everything the engine reads at startup: the known collision tags, tick
//! pacing, the clock unit, the default resolution policy, surface size and
//! logging. Files are TOML or RON, chosen by extension through [`Config`].
//!
//! ```toml
//! application_name = "sandbox"
//!
//! [engine]
//! tags = ["wall", "box"]
//! tick_interval_ms = 33
//! clock_unit = "milliseconds"
//! resolution_policy = "independent"
//! surface_width = 320.0
//! surface_height = 160.0
//! log_level = "info"
//! ```

use crate::foundation::time::ClockUnit;
use crate::physics::{ResolutionPolicy, TagSet};
use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};

/// # Engine Configuration
///
/// Core simulation settings shared by the registry, the loop driver and the
/// surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Known collision tags; `"default"` is always added
    pub tags: Vec<String>,
    /// Wall-clock interval between ticks in milliseconds
    pub tick_interval_ms: u64,
    /// Unit the engine's clock must report in; a mismatch fails `Engine::new`
    pub clock_unit: ClockUnit,
    /// Policy physics objects take when added without one of their own
    pub resolution_policy: ResolutionPolicy,
    /// Drawable width in world units
    pub surface_width: f32,
    /// Drawable height in world units
    pub surface_height: f32,
    /// Stop the loop after this many ticks
    pub max_ticks: Option<u64>,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            tags: Vec::new(),
            tick_interval_ms: 33,
            clock_unit: ClockUnit::Milliseconds,
            resolution_policy: ResolutionPolicy::Independent,
            surface_width: 320.0,
            surface_height: 160.0,
            max_ticks: None,
            log_level: "info".to_string(),
        }
    }

    /// Add known tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Set the tick interval in milliseconds
    pub fn with_tick_interval_ms(mut self, interval: u64) -> Self {
        self.tick_interval_ms = interval;
        self
    }

    /// Set the clock unit
    pub fn with_clock_unit(mut self, unit: ClockUnit) -> Self {
        self.clock_unit = unit;
        self
    }

    /// Set the default resolution policy
    pub fn with_resolution_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.resolution_policy = policy;
        self
    }

    /// Set the surface size in world units
    pub fn with_surface_size(mut self, width: f32, height: f32) -> Self {
        self.surface_width = width;
        self.surface_height = height;
        self
    }

    /// Stop after `ticks` ticks
    pub fn with_max_ticks(mut self, ticks: u64) -> Self {
        self.max_ticks = Some(ticks);
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Known tags as a [`TagSet`]
    pub fn tag_set(&self) -> TagSet {
        TagSet::new(self.tags.iter().cloned())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be at least 1".to_string()));
        }

        let valid_extent = |value: f32| value.is_finite() && value > 0.0;
        if !valid_extent(self.surface_width) || !valid_extent(self.surface_height) {
            return Err(ConfigError::Invalid(format!(
                "surface must have a positive size, got {}x{}",
                self.surface_width, self.surface_height
            )));
        }

        if let Some(tag) = self.tags.iter().find(|tag| tag.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("empty collision tag {:?}", tag)));
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration applications load from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Application name, used in log output
    pub application_name: String,
    /// Engine core configuration
    pub engine: EngineConfig,
}

impl ApplicationConfig {
    /// Create a new application configuration with defaults
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            application_name: app_name.into(),
            engine: EngineConfig::default(),
        }
    }

    /// Replace the engine configuration
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.application_name.is_empty() {
            return Err(ConfigError::Invalid("application name cannot be empty".to_string()));
        }
        self.engine.validate()
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self::new("Rect Engine Application")
    }
}

impl Config for ApplicationConfig {}

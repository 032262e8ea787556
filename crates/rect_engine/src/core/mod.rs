//! # Core Engine Module
//!
//! Shared configuration used by the engine and by applications.
//!
//! ## Organization
//!
//! - **Config**: engine and application settings, loadable from TOML or RON

pub mod config;

pub use config::{ApplicationConfig, Config, ConfigError, EngineConfig};

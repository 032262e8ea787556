//! Application trait and lifecycle management

use crate::assets::AssetError;
use crate::core::config::ConfigError;
use crate::engine::{Engine, EngineError};
use crate::physics::MaskError;
use crate::render::Surface;
use crate::scene::{RegistryError, TickStats};
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to drive a scene with [`GameLoop`](crate::GameLoop).
pub trait Application<S: Surface> {
    /// Initialize the application
    ///
    /// Called once after the engine is initialized. Register the initial
    /// objects here.
    fn initialize(&mut self, engine: &mut Engine<S>) -> Result<(), AppError>;

    /// Called after every tick, once the frame has been rendered
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `stats` - What happened during the tick
    fn on_tick(&mut self, _engine: &mut Engine<S>, _stats: &TickStats) -> Result<(), AppError> {
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called once the loop has stopped.
    fn cleanup(&mut self, _engine: &mut Engine<S>) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Registry rejected an object
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Collision mask named an unknown tag
    #[error("Mask error: {0}")]
    Mask(#[from] MaskError),

    /// Asset loading error
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}

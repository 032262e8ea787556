//! Core engine implementation
//!
//! [`Engine`] owns the registry, the surface and the clock, and turns one
//! `advance()` call into an update followed by a render. [`GameLoop`] calls
//! `advance()` at a fixed wall-clock interval until something stops it.

use crate::application::Application;
use crate::core::config::{ConfigError, EngineConfig};
use crate::foundation::time::Clock;
use crate::render::Surface;
use crate::scene::{ObjectRegistry, RegistryError, TickStats};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Main engine struct
///
/// The engine is the single owner of the registry and the surface, so update
/// and render can never interleave.
pub struct Engine<S: Surface> {
    registry: ObjectRegistry,
    surface: S,
    clock: Box<dyn Clock>,
    config: EngineConfig,
    initialized: bool,
    running: Arc<AtomicBool>,
}

impl<S: Surface> Engine<S> {
    /// Create a new engine instance
    pub fn new(config: EngineConfig, surface: S, clock: impl Clock + 'static) -> Result<Self, EngineError> {
        config.validate()?;
        if clock.unit() != config.clock_unit {
            return Err(ConfigError::Invalid(format!(
                "clock reports {:?} but clock_unit is {:?}",
                clock.unit(),
                config.clock_unit
            ))
            .into());
        }
        log::info!("Initializing engine with {} known tag(s)...", config.tag_set().len());

        Ok(Self {
            registry: ObjectRegistry::new(config.tag_set()).with_default_policy(config.resolution_policy),
            surface,
            clock: Box::new(clock),
            config,
            initialized: false,
            running: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Take the first clock sample and draw the initial frame
    ///
    /// Calling it again is a no-op.
    pub fn init(&mut self) {
        if self.initialized {
            log::debug!("Engine already initialized");
            return;
        }
        self.registry.start(self.clock.as_ref());
        self.registry.render(&mut self.surface);
        self.initialized = true;
        self.running.store(true, Ordering::SeqCst);
        log::info!("Engine initialized");
    }

    /// Run one tick: update the registry, then render it
    ///
    /// Fails with [`EngineError::Stopped`] once the engine has been stopped.
    pub fn advance(&mut self) -> Result<TickStats, EngineError> {
        if !self.initialized {
            return Err(EngineError::NotInitialized);
        }
        if !self.is_running() {
            return Err(EngineError::Stopped);
        }
        let stats = self.registry.update(self.clock.as_ref()).clone();
        self.registry.render(&mut self.surface);
        Ok(stats)
    }

    /// Request engine shutdown; no further ticks will run
    pub fn stop(&mut self) {
        if self.running.swap(false, Ordering::SeqCst) {
            log::info!("Engine shutdown requested");
        }
    }

    /// Whether the loop should keep ticking
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Whether [`Engine::init`] has run
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Handle that stops the engine from elsewhere, e.g. another thread
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            running: Arc::clone(&self.running),
        }
    }

    /// Get the object registry
    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    /// Get mutable access to the object registry
    pub fn registry_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.registry
    }

    /// Get the surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Get mutable access to the surface
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Get the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the current frame delta time
    pub fn delta_time(&self) -> f32 {
        self.registry.timer().delta_time()
    }
}

/// Cloneable, thread-safe way to stop an [`Engine`]
#[derive(Debug, Clone)]
pub struct StopHandle {
    running: Arc<AtomicBool>,
}

impl StopHandle {
    /// Stop the engine before its next tick
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Whether the engine is still running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Fixed-interval loop driver
///
/// Ticks are paced by wall time. The simulation itself uses whatever
/// `delta_time` the engine's clock reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLoop {
    interval: Duration,
    max_ticks: Option<u64>,
}

impl GameLoop {
    /// Tick every `interval`, forever
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_ticks: None,
        }
    }

    /// Pacing and tick limit from configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.tick_interval_ms),
            max_ticks: config.max_ticks,
        }
    }

    /// Stop after `ticks` ticks
    pub fn with_max_ticks(mut self, ticks: u64) -> Self {
        self.max_ticks = Some(ticks);
        self
    }

    /// Interval between ticks
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run `app` on `engine` until stopped or the tick limit is reached
    ///
    /// Returns the number of ticks run.
    pub fn run<S, A>(&self, engine: &mut Engine<S>, app: &mut A) -> Result<u64, EngineError>
    where
        S: Surface,
        A: Application<S>,
    {
        engine.init();
        app.initialize(engine)
            .map_err(|e| EngineError::Application(format!("App initialization: {}", e)))?;

        log::info!("Starting main loop at {:?} per tick...", self.interval);
        let mut ticks = 0;

        while engine.is_running() {
            if self.max_ticks.is_some_and(|max| ticks >= max) {
                engine.stop();
                break;
            }

            let started = Instant::now();
            let stats = match engine.advance() {
                Ok(stats) => stats,
                // A stop handle fired between the check and the tick.
                Err(EngineError::Stopped) => break,
                Err(e) => return Err(e),
            };
            ticks += 1;
            app.on_tick(engine, &stats)
                .map_err(|e| EngineError::Application(format!("App tick: {}", e)))?;

            if let Some(remaining) = self.interval.checked_sub(started.elapsed()) {
                std::thread::sleep(remaining);
            }
        }

        app.cleanup(engine);
        log::info!("Main loop stopped after {} tick(s)", ticks);
        Ok(ticks)
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// `advance` was called before `init`
    #[error("Engine advanced before init")]
    NotInitialized,

    /// `advance` was called after `stop`
    #[error("Engine advanced after stop")]
    Stopped,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Registry error
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Application error
    #[error("Application error: {0}")]
    Application(String),
}

//! # Rect Engine
//!
//! A small 2D object runtime: axis-aligned rectangles that move, collide and
//! draw themselves, driven one tick at a time.
//!
//! ## Features
//!
//! - **Object Registry**: owns every live object and runs the tick phases
//! - **Collision Masks**: per-object, one-sided tag filtering
//! - **Positional Correction**: axis-separated push-out using the previous position
//! - **Render Hook**: objects draw through a [`Surface`](render::Surface) with a transform stack
//! - **Pluggable Time**: any [`Clock`](foundation::time::Clock), manual clocks for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rect_engine::prelude::*;
//! use std::time::Duration;
//!
//! struct MyApp;
//!
//! impl Application<AsciiSurface> for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine<AsciiSurface>) -> Result<(), AppError> {
//!         let tags = engine.registry().tags().clone();
//!         engine
//!             .registry_mut()
//!             .add_object(PhysicsObject::new(Collider::new(0.0, 0.0, 8.0, 8.0, &tags)).with_velocity(4.0, 0.0))?;
//!         Ok(())
//!     }
//!
//!     fn on_tick(&mut self, engine: &mut Engine<AsciiSurface>, _stats: &TickStats) -> Result<(), AppError> {
//!         println!("{}", engine.surface().frame());
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default().with_max_ticks(100);
//!     let surface = AsciiSurface::new(80, 40, 4.0);
//!     let mut engine = Engine::new(config, surface, SystemClock::new())?;
//!     GameLoop::new(Duration::from_millis(33)).run(&mut engine, &mut MyApp)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::cast_precision_loss)]

// Core engine modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod assets;
pub mod physics;
pub mod objects;
pub mod render;
pub mod scene;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use engine::{Engine, EngineError, GameLoop, StopHandle};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{ImageData, ImageHandle, ImageStore},
        core::config::{ApplicationConfig, Config, EngineConfig},
        foundation::{
            math::{Rect, Transform2D, Vec2},
            time::{Clock, ClockUnit, ManualClock, SystemClock, Timer},
        },
        objects::{Collider, Commands, Entity, EntityId, GameObject, PhysicsObject, StaticBody},
        physics::{CollisionMask, ResolutionPolicy, TagSet},
        render::{Appearance, AsciiSurface, CommandSurface, SpriteImage, Surface},
        scene::{ObjectRegistry, RegistryError, TickStats},
        AppError, Application, Engine, EngineError, GameLoop,
    };
}

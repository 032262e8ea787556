//! Box sandbox demo application
//!
//! Drops a handful of random boxes into a walled pit and draws the result in
//! the terminal. Boxes stack on the floor and on each other, and collect the
//! coins scattered along the way.
//!
//! ```text
//! box_sandbox [config.toml|config.ron]
//! ```

mod actors;

use actors::{Coin, FallingBox};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rect_engine::assets::ImageData;
use rect_engine::core::config::{ApplicationConfig, Config, ConfigError, EngineConfig};
use rect_engine::foundation::logging;
use rect_engine::foundation::time::SystemClock;
use rect_engine::objects::{Collider, StaticBody};
use rect_engine::physics::TagSet;
use rect_engine::render::{Appearance, AsciiSurface, SpriteImage};
use rect_engine::scene::TickStats;
use rect_engine::{AppError, Application, Engine, EngineError, GameLoop};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const WALL: &str = "wall";
const BOX: &str = "box";
const COIN: &str = "coin";

/// Sandbox settings on top of the engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Engine and application settings
    pub application: ApplicationConfig,
    /// World units per terminal cell
    pub cell_size: f32,
    /// Boxes dropped at startup
    pub box_count: usize,
    /// Coins scattered at startup
    pub coin_count: usize,
    /// Downward acceleration in units per second squared
    pub gravity: f32,
    /// Seed for reproducible layouts
    pub seed: Option<u64>,
    /// PNG used for coins instead of a solid color
    pub coin_image: Option<String>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            application: ApplicationConfig::new("Box Sandbox").with_engine(
                EngineConfig::new()
                    .with_tags([WALL, BOX, COIN])
                    .with_surface_size(320.0, 160.0)
                    .with_max_ticks(300),
            ),
            cell_size: 4.0,
            box_count: 6,
            coin_count: 4,
            gravity: 120.0,
            seed: None,
            coin_image: None,
        }
    }
}

impl SandboxConfig {
    /// Validate the sandbox and engine settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::Invalid(format!("cell_size must be positive, got {}", self.cell_size)));
        }
        self.application.validate()
    }
}

impl Config for SandboxConfig {}

/// Sandbox errors
#[derive(Error, Debug)]
pub enum SandboxError {
    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Engine error
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

struct Sandbox {
    settings: SandboxConfig,
    collected: usize,
}

impl Sandbox {
    fn new(settings: SandboxConfig) -> Self {
        Self {
            settings,
            collected: 0,
        }
    }

    fn build_walls(engine: &mut Engine<AsciiSurface>, tags: &TagSet, thickness: f32) -> Result<(), AppError> {
        let width = engine.config().surface_width;
        let height = engine.config().surface_height;
        let walls = [
            ("floor", 0.0, height - thickness, width, thickness),
            ("left_wall", 0.0, 0.0, thickness, height - thickness),
            ("right_wall", width - thickness, 0.0, thickness, height - thickness),
        ];
        for (name, x, y, w, h) in walls {
            let wall = Collider::new(x, y, w, h, tags).with_name(name).with_tag(WALL);
            engine.registry_mut().add_object(StaticBody::new(wall))?;
        }
        Ok(())
    }
}

impl Application<AsciiSurface> for Sandbox {
    fn initialize(&mut self, engine: &mut Engine<AsciiSurface>) -> Result<(), AppError> {
        let tags = engine.registry().tags().clone();
        let thickness = self.settings.cell_size;
        let width = engine.config().surface_width;
        let height = engine.config().surface_height;

        let sprite = match &self.settings.coin_image {
            Some(path) => engine.surface_mut().images_mut().load(path)?,
            None => engine
                .surface_mut()
                .images_mut()
                .insert("coin", ImageData::solid_color(4, 4, [255, 215, 0, 255])),
        };

        Self::build_walls(engine, &tags, thickness)?;

        let mut rng = match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        for _ in 0..self.settings.box_count {
            let size = rng.gen_range(2.0_f32..4.0) * thickness;
            let x = rng.gen_range(thickness..(width - thickness - size).max(thickness + 1.0));
            let y = rng.gen_range(0.0..height * 0.4);
            let collider = Collider::new(x, y, size, size, &tags)
                .with_tag(BOX)
                .try_colliding_with(&[WALL, BOX])?;
            let falling = FallingBox::new(collider, self.settings.gravity)
                .with_velocity(rng.gen_range(-30.0..30.0), 0.0);
            engine.registry_mut().add_object(falling)?;
        }

        for index in 0..self.settings.coin_count {
            let size = thickness;
            let x = rng.gen_range(thickness..(width - 2.0 * thickness).max(thickness + 1.0));
            let y = height - thickness - size;
            let collider = Collider::new(x, y, size, size, &tags)
                .with_name(format!("coin{}", index))
                .with_tag(COIN)
                .try_colliding_with(&[BOX])?;
            let appearance = Appearance::Sprite(SpriteImage::new(sprite));
            engine.registry_mut().add_object(Coin::new(collider, appearance))?;
        }

        log::info!(
            "{} ready with {} object(s)",
            self.settings.application.application_name,
            engine.registry().len()
        );
        Ok(())
    }

    fn on_tick(&mut self, engine: &mut Engine<AsciiSurface>, stats: &TickStats) -> Result<(), AppError> {
        self.collected += stats.removed;
        let contacts = engine.registry().collisions();
        let (began, ended) = (contacts.collisions_entered().len(), contacts.collisions_exited().len());
        if began + ended > 0 {
            log::debug!("Tick {}: {} contact(s) began, {} ended", stats.tick, began, ended);
        }
        println!("\x1B[2J\x1B[H{}", engine.surface().frame());
        println!(
            "tick {:>4}  objects {:>3}  collisions {:>3}  coins {}  fps {:>5.1}",
            stats.tick,
            stats.object_count,
            stats.collisions,
            self.collected,
            engine.registry().timer().current_fps()
        );
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine<AsciiSurface>) {
        log::info!(
            "Sandbox finished after {} tick(s), {} coin(s) collected",
            engine.registry().stats().tick,
            self.collected
        );
    }
}

fn run(settings: SandboxConfig) -> Result<u64, SandboxError> {
    settings.validate()?;
    let engine_config = settings.application.engine.clone().with_tags([WALL, BOX, COIN]);

    // Whole cells only; a partial column would never be drawn.
    let columns = (engine_config.surface_width / settings.cell_size).floor() as usize;
    let rows = (engine_config.surface_height / settings.cell_size).floor() as usize;
    let surface = AsciiSurface::new(columns, rows, settings.cell_size);

    let game_loop = GameLoop::from_config(&engine_config);
    let mut engine = Engine::new(engine_config, surface, SystemClock::new())?;
    let mut sandbox = Sandbox::new(settings);
    Ok(game_loop.run(&mut engine, &mut sandbox)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = match std::env::args().nth(1) {
        Some(path) => SandboxConfig::load_from_file(&path)?,
        None => SandboxConfig::default(),
    };
    logging::init_with_level(&settings.application.engine.log_level);

    log::info!("Starting {}", settings.application.application_name);
    let ticks = run(settings)?;
    log::info!("Ran {} tick(s)", ticks);
    Ok(())
}

//! # Rendering
//!
//! The registry renders through the [`Surface`] trait and never sees pixels.
//!
//! - **Surface**: clear + draw primitives with a transform stack
//! - **TransformGuard**: scoped transform that always restores the stack
//! - **Appearance**: per-object render hook (hidden, outline, sprite)
//! - **CommandSurface**: recording surface for tests and external renderers
//! - **AsciiSurface**: terminal character grid

pub mod appearance;
pub mod ascii;
pub mod commands;
pub mod surface;

pub use appearance::{Appearance, SpriteImage};
pub use ascii::AsciiSurface;
pub use commands::{CommandSurface, DrawCommand};
pub use surface::{Surface, TransformGuard};

//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - 2D math types
//! - Handle collections
//! - Clocks and frame timing
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod time;
pub mod logging;

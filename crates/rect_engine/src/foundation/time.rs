//! Time management utilities
//!
//! The engine never reads wall time directly. It samples a [`Clock`] and
//! derives frame deltas from consecutive samples through a [`Timer`].

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Unit a [`Clock`] reports its samples in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockUnit {
    /// Samples are milliseconds
    #[default]
    Milliseconds,
    /// Samples are seconds
    Seconds,
}

impl ClockUnit {
    /// Convert a difference between two samples into seconds
    pub fn to_seconds(self, elapsed: f64) -> f64 {
        match self {
            ClockUnit::Milliseconds => elapsed / 1000.0,
            ClockUnit::Seconds => elapsed,
        }
    }
}

/// Monotonic time source
pub trait Clock {
    /// Current sample. Never decreases between calls.
    fn now(&self) -> f64;

    /// Unit of the values returned by [`Clock::now`]
    fn unit(&self) -> ClockUnit;
}

/// Clock backed by [`Instant`], reporting milliseconds since creation
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    /// Create a clock whose zero is the moment of construction
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn unit(&self) -> ClockUnit {
        ClockUnit::Milliseconds
    }
}

/// Hand-driven clock for tests and replays of recorded timings
///
/// Clones share the same time value, so a test can keep one handle while
/// the engine owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Rc<Cell<f64>>,
    unit: ClockUnit,
}

impl ManualClock {
    /// Create a clock starting at zero
    pub fn new(unit: ClockUnit) -> Self {
        Self {
            current: Rc::new(Cell::new(0.0)),
            unit,
        }
    }

    /// Move the clock forward by `amount` units. Negative amounts are ignored.
    pub fn advance(&self, amount: f64) {
        if amount > 0.0 {
            self.current.set(self.current.get() + amount);
        }
    }

    /// Jump to an absolute sample. Values earlier than the current one are ignored.
    pub fn set(&self, value: f64) {
        if value > self.current.get() {
            self.current.set(value);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.current.get()
    }

    fn unit(&self) -> ClockUnit {
        self.unit
    }
}

/// Frame timer fed by a [`Clock`]
///
/// `delta_time` is the raw difference between the last two samples, in
/// seconds. There is no clamping or smoothing.
pub struct Timer {
    last_sample: Option<f64>,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer that has not sampled yet
    pub fn new() -> Self {
        Self {
            last_sample: None,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Take the first sample without counting a frame
    pub fn start(&mut self, clock: &dyn Clock) {
        self.last_sample = Some(clock.now());
    }

    /// Sample the clock and return the elapsed seconds since the previous sample
    ///
    /// The very first sample yields zero.
    pub fn tick(&mut self, clock: &dyn Clock) -> f32 {
        let now = clock.now();
        let elapsed = self.last_sample.map_or(0.0, |last| (now - last).max(0.0));
        self.delta_time = clock.unit().to_seconds(elapsed) as f32;
        self.total_time += self.delta_time;
        self.last_sample = Some(now);
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since the first sample
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since the first sample
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }

    /// Get the current FPS (based on last frame time)
    pub fn current_fps(&self) -> f32 {
        if self.delta_time > 0.0 {
            1.0 / self.delta_time
        } else {
            0.0
        }
    }
}

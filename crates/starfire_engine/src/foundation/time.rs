//! Time management utilities
//!
//! The engine never reads a wall clock. The host feeds elapsed deltas into a
//! [`Clock`], which hands out [`GameTime`] snapshots to everything that ticks.
//! Variable deltas are allowed; nothing here assumes a fixed step.

/// Snapshot of frame timing handed to every per-frame operation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GameTime {
    /// Seconds elapsed since the previous frame
    pub delta: f32,
    /// Seconds accumulated since the clock started
    pub total: f32,
}

impl GameTime {
    /// Create a snapshot from explicit values
    pub fn new(delta: f32, total: f32) -> Self {
        Self { delta, total }
    }

    /// Create a snapshot for a single step from time zero
    pub fn from_delta(delta: f32) -> Self {
        Self { delta, total: delta }
    }
}

/// Accumulates host-provided frame deltas
#[derive(Debug, Clone, Default)]
pub struct Clock {
    total: f32,
    frame_count: u64,
    last: GameTime,
}

impl Clock {
    /// Create a new clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `delta` seconds and return the new snapshot
    ///
    /// Negative or non-finite deltas are treated as zero.
    pub fn advance(&mut self, delta: f32) -> GameTime {
        let delta = if delta.is_finite() && delta > 0.0 {
            delta
        } else {
            if delta != 0.0 {
                log::warn!("Ignoring invalid frame delta {delta}");
            }
            0.0
        };
        self.total += delta;
        self.frame_count += 1;
        self.last = GameTime::new(delta, self.total);
        self.last
    }

    /// The most recent snapshot
    pub fn now(&self) -> GameTime {
        self.last
    }

    /// Total elapsed seconds
    pub fn total_time(&self) -> f32 {
        self.total
    }

    /// Number of frames advanced so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Reset the clock to zero
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Countdown timer used by cooldowns and spawn delays
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    /// Create a countdown with `seconds` remaining
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining: seconds.max(0.0),
        }
    }

    /// Tick down by `delta`; returns `true` on the tick that reaches zero
    pub fn tick(&mut self, delta: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining = (self.remaining - delta).max(0.0);
        self.remaining <= 0.0
    }

    /// Restart the countdown
    pub fn reset(&mut self, seconds: f32) {
        self.remaining = seconds.max(0.0);
    }

    /// Whether the countdown has elapsed
    pub fn is_done(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Seconds left
    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

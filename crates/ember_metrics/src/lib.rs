//! Ember Metrics - frame and system timing
//!
//! Instrumentation used by the scheduler and the runtime loop. Everything
//! here compiles to no-op stubs unless the `metrics` feature is enabled.
//!
//! # Feature Flags
//!
//! - `metrics` - Enable metrics collection (default: disabled)
//!
//! # Usage
//!
//! ```ignore
//! use ember_metrics::{FrameTimer, SystemProfiler};
//!
//! let mut timer = FrameTimer::new(60); // Track last 60 frames
//! let mut profiler = SystemProfiler::new();
//! timer.begin();
//! profiler.time_system("physics", || step_physics());
//! timer.end();
//! println!("FPS: {:.1}", timer.stats().fps);
//! ```

#[cfg(feature = "metrics")]
mod frame_timer;
#[cfg(feature = "metrics")]
mod system_profiler;

#[cfg(feature = "metrics")]
pub use frame_timer::FrameTimer;
#[cfg(feature = "metrics")]
pub use system_profiler::SystemProfiler;

use std::time::Duration;

/// Whether this build collects metrics.
pub const ENABLED: bool = cfg!(feature = "metrics");

/// Snapshot of a [`FrameTimer`]. All zero when metrics are disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub frames: u64,
    /// Mean over the sliding window.
    pub average: Duration,
    pub window_min: Duration,
    pub window_max: Duration,
    /// Slowest frame since construction.
    pub worst: Duration,
    pub total: Duration,
    pub fps: f64,
}

// ============================================================================
// Macros for conditional compilation
// ============================================================================

/// Time a block under `$name` (plain block when metrics are disabled)
#[macro_export]
macro_rules! time_scope {
    ($profiler:expr, $name:expr, $body:block) => {
        $profiler.time_system($name, || $body)
    };
}

// ============================================================================
// No-op stubs when metrics disabled
// ============================================================================

#[cfg(not(feature = "metrics"))]
#[derive(Debug, Default)]
pub struct FrameTimer;

#[cfg(not(feature = "metrics"))]
impl FrameTimer {
    pub fn new(_window: usize) -> Self { Self }
    pub fn begin(&mut self) {}
    pub fn end(&mut self) -> Option<Duration> { None }
    pub fn record(&mut self, _frame: Duration) {}
    pub fn frames(&self) -> u64 { 0 }
    pub fn stats(&self) -> FrameStats { FrameStats::default() }
}

#[cfg(not(feature = "metrics"))]
#[derive(Debug, Default)]
pub struct SystemProfiler;

#[cfg(not(feature = "metrics"))]
impl SystemProfiler {
    pub fn new() -> Self { Self }
    pub fn time_system<F, R>(&mut self, _name: &str, f: F) -> R where F: FnOnce() -> R { f() }
    pub fn get_timing(&self, _name: &str) -> Duration { Duration::ZERO }
    pub fn last_timing(&self, _name: &str) -> Duration { Duration::ZERO }
    pub fn forget(&mut self, _name: &str) {}
    pub fn reset(&mut self) {}
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Duration)> {
        std::iter::empty()
    }
}

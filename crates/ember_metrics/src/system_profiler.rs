//! System profiler for timing named subsystems

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Accumulated and most recent wall-clock time per named system.
#[derive(Debug)]
pub struct SystemProfiler {
    timings: HashMap<String, Duration>,
    last: HashMap<String, Duration>,
}

impl SystemProfiler {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            last: HashMap::new(),
        }
    }

    pub fn time_system<F, R>(&mut self, name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        *self.timings.entry(name.to_string()).or_insert(Duration::ZERO) += elapsed;
        self.last.insert(name.to_string(), elapsed);
        result
    }

    /// Total time spent in `name` since the last reset.
    pub fn get_timing(&self, name: &str) -> Duration {
        self.timings.get(name).copied().unwrap_or(Duration::ZERO)
    }

    /// Duration of the most recent call timed under `name`.
    pub fn last_timing(&self, name: &str) -> Duration {
        self.last.get(name).copied().unwrap_or(Duration::ZERO)
    }

    /// Drop every sample recorded for `name`.
    pub fn forget(&mut self, name: &str) {
        self.timings.remove(name);
        self.last.remove(name);
    }

    pub fn reset(&mut self) {
        self.timings.clear();
        self.last.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Duration)> {
        self.timings.iter()
    }
}

impl Default for SystemProfiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_per_name() {
        let mut profiler = SystemProfiler::new();
        let out = profiler.time_system("spin", || 1 + 1);
        assert_eq!(out, 2);
        profiler.time_system("spin", || ());
        profiler.time_system("render", || ());

        assert!(profiler.get_timing("spin") >= profiler.last_timing("spin"));
        assert_eq!(profiler.iter().count(), 2);

        profiler.forget("spin");
        assert_eq!(profiler.get_timing("spin"), Duration::ZERO);
        assert_eq!(profiler.iter().count(), 1);

        profiler.reset();
        assert_eq!(profiler.iter().count(), 0);
    }
}

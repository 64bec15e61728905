//! Frame timing for the runtime loop
//!
//! Keeps a sliding window of recent frame durations for the rolling
//! average, plus whole-run totals so a headless run can report its worst
//! frame even after it has left the window.

use crate::FrameStats;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct FrameTimer {
    started: Option<Instant>,
    window: VecDeque<Duration>,
    window_len: usize,
    window_sum: Duration,
    frames: u64,
    total: Duration,
    worst: Duration,
}

impl FrameTimer {
    /// Average over the last `window` frames (at least one).
    pub fn new(window: usize) -> Self {
        let window_len = window.max(1);
        Self {
            started: None,
            window: VecDeque::with_capacity(window_len),
            window_len,
            window_sum: Duration::ZERO,
            frames: 0,
            total: Duration::ZERO,
            worst: Duration::ZERO,
        }
    }

    pub fn begin(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Close the frame opened by `begin`. Returns `None` without a `begin`.
    pub fn end(&mut self) -> Option<Duration> {
        let elapsed = self.started.take()?.elapsed();
        self.record(elapsed);
        Some(elapsed)
    }

    /// Add a frame duration measured elsewhere.
    pub fn record(&mut self, frame: Duration) {
        if self.window.len() == self.window_len {
            if let Some(oldest) = self.window.pop_front() {
                self.window_sum -= oldest;
            }
        }
        self.window.push_back(frame);
        self.window_sum += frame;

        self.frames += 1;
        self.total += frame;
        self.worst = self.worst.max(frame);
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn stats(&self) -> FrameStats {
        let average = if self.window.is_empty() {
            Duration::ZERO
        } else {
            self.window_sum / self.window.len() as u32
        };
        let fps = if average > Duration::ZERO {
            1.0 / average.as_secs_f64()
        } else {
            0.0
        };
        FrameStats {
            frames: self.frames,
            average,
            window_min: self.window.iter().min().copied().unwrap_or_default(),
            window_max: self.window.iter().max().copied().unwrap_or_default(),
            worst: self.worst,
            total: self.total,
            fps,
        }
    }
}

/// Frame timing for the variable-step update loop
///
/// Every frame the simulation is handed the wall-clock milliseconds since the
/// previous frame. A long stall (window drag, debugger break) is cut down to
/// `MAX_FRAME_MS` so one step never integrates an enormous time slice.
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Largest time slice handed to one update, in milliseconds
pub const MAX_FRAME_MS: f32 = 100.0;

/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

pub struct FrameClock {
    started: Instant,
    last_frame: Instant,
    recent: VecDeque<Duration>,
    frame_count: u64,
    paused: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_frame: now,
            recent: VecDeque::with_capacity(FPS_WINDOW),
            frame_count: 0,
            paused: false,
        }
    }

    /// Start a frame and return the milliseconds to simulate (zero while paused)
    pub fn begin_frame(&mut self) -> f32 {
        let now = Instant::now();
        let frame_time = now - self.last_frame;
        self.last_frame = now;
        self.frame_count += 1;

        if self.recent.len() == FPS_WINDOW {
            self.recent.pop_front();
        }
        self.recent.push_back(frame_time);

        if self.paused {
            0.0
        } else {
            clamp_frame_ms(frame_time)
        }
    }

    /// Average frames per second over the recent window
    pub fn fps(&self) -> f32 {
        let total: Duration = self.recent.iter().sum();
        if total.is_zero() {
            return 0.0;
        }
        self.recent.len() as f32 / total.as_secs_f32()
    }

    /// Wall-clock time since the clock was created
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    /// Resume without simulating the time spent paused
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.last_frame = Instant::now();
            log::info!("Simulation resumed");
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Frame duration in milliseconds, capped at `MAX_FRAME_MS`
pub fn clamp_frame_ms(frame_time: Duration) -> f32 {
    (frame_time.as_micros() as f32 / 1000.0).min(MAX_FRAME_MS)
}

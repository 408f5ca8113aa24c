use std::thread;
use std::time::{Duration, Instant};

/// Caps the loop at a fixed tick rate by sleeping away whatever is left of
/// each frame period.
#[derive(Debug)]
pub struct FrameClock {
    period: Duration,
    frame_start: Instant,
}

impl FrameClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            frame_start: Instant::now(),
        }
    }

    /// Time left in the current frame; zero once the frame has overrun.
    pub fn remaining(&self) -> Duration {
        self.period.saturating_sub(self.frame_start.elapsed())
    }

    /// Sleep until the current frame period is over, then start the next
    /// frame.  Returns how long it slept.
    pub fn tick(&mut self) -> Duration {
        let wait = self.remaining();
        if !wait.is_zero() {
            thread::sleep(wait);
        }
        self.frame_start = Instant::now();
        wait
    }
}

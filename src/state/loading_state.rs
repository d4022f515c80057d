//! Loading indicator animation state

use std::time::{Duration, Instant};

/// Number of pulsing dots
pub const DOT_COUNT: usize = 3;

/// Pulsing-dots animation shown while the survey is hidden
#[derive(Debug)]
pub struct LoadingAnimation {
    /// When the animation started
    pub start_time: Instant,
}

impl LoadingAnimation {
    /// Duration of one full pulse
    const CYCLE: Duration = Duration::from_millis(1200);
    /// Phase offset between neighbouring dots, as a fraction of the cycle
    const DOT_OFFSET: f32 = 0.2;

    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Restart from the first frame
    pub fn restart(&mut self) {
        self.start_time = Instant::now();
    }

    /// Current brightness of each dot, 0.0 to 1.0
    pub fn intensities(&self) -> [f32; DOT_COUNT] {
        Self::intensities_at(self.start_time.elapsed())
    }

    /// Brightness of each dot after `elapsed`
    pub fn intensities_at(elapsed: Duration) -> [f32; DOT_COUNT] {
        let cycle_progress = elapsed.as_secs_f32() / Self::CYCLE.as_secs_f32();
        let mut out = [0.0; DOT_COUNT];
        for (i, dot) in out.iter_mut().enumerate() {
            let phase = (cycle_progress - i as f32 * Self::DOT_OFFSET).rem_euclid(1.0);
            // Rise for the first half of the cycle, fall for the second
            let triangle = if phase < 0.5 {
                phase * 2.0
            } else {
                2.0 - phase * 2.0
            };
            *dot = simple_easing::sine_in_out(triangle);
        }
        out
    }
}

impl Default for LoadingAnimation {
    fn default() -> Self {
        Self::new()
    }
}

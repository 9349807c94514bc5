/// Smallest allowed tick threshold, i.e. the fastest speed.
pub const MIN_THRESHOLD: u32 = 1;

/// Gates generation advances on the render loop.
///
/// Every frame while running bumps a counter. Once the counter exceeds the
/// threshold a generation boundary fires and the counter starts over, so a
/// generation happens every `threshold + 1` frames. A higher threshold means
/// a slower simulation.
#[derive(Debug, Clone)]
pub struct SimClock {
    running: bool,
    tick: u32,
    threshold: u32,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(MIN_THRESHOLD)
    }
}

impl SimClock {
    pub fn new(threshold: u32) -> Self {
        Self {
            running: false,
            tick: 0,
            threshold: threshold.max(MIN_THRESHOLD),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Called once per frame. Returns true when a generation should advance.
    pub fn on_frame(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.tick += 1;
        if self.tick > self.threshold {
            self.tick = 0;
            true
        } else {
            false
        }
    }

    /// Shift the threshold by `-delta`. Positive deltas speed the simulation up.
    pub fn set_speed(&mut self, delta: i32) {
        let threshold = i64::from(self.threshold) - i64::from(delta);
        self.threshold = threshold.clamp(i64::from(MIN_THRESHOLD), i64::from(u32::MAX)) as u32;
    }

    pub fn start(&mut self) {
        self.running = true;
        self.tick = 0;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }
}

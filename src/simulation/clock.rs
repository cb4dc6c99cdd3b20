//! Fixed-timestep accumulator.
//!
//! The frame loop feeds elapsed wall-clock time in and gets back how many
//! physics ticks to run before drawing. Several ticks per frame are normal
//! when the tick rate is above the frame rate.

/// Converts elapsed time into whole physics ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTimestep {
    period: f64,
    accumulated: f64,
}

impl FixedTimestep {
    /// Creates an accumulator for ticks of `period` seconds.
    pub fn new(period: f64) -> Self {
        Self {
            period,
            accumulated: 0.0,
        }
    }

    /// Creates an accumulator ticking `rate_hz` times per second.
    pub fn from_rate(rate_hz: f64) -> Self {
        Self::new(1.0 / rate_hz)
    }

    /// Seconds per tick.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Time carried over that has not yet made up a full tick.
    pub fn pending(&self) -> f64 {
        self.accumulated
    }

    /// Adds `elapsed` seconds and returns the number of ticks now due.
    ///
    /// A tick is due only while the carried time strictly exceeds one period.
    pub fn advance(&mut self, elapsed: f64) -> u32 {
        if elapsed.is_finite() && elapsed > 0.0 {
            self.accumulated += elapsed;
        }

        let mut ticks = 0;
        while self.accumulated > self.period {
            self.accumulated -= self.period;
            ticks += 1;
        }
        ticks
    }

    /// Drops any carried time.
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}

/// Turns a stream of elapsed-time deltas into discrete ticks.
///
/// Time is accumulated and drained one interval at a time, so a long frame
/// produces several ticks instead of dropping them.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    accumulated: f64,
    interval: f64,
}

impl SimulationClock {
    /// `interval` must be positive; config validation guarantees it
    pub fn new(interval: f64) -> Self {
        Self {
            accumulated: 0.0,
            interval,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Change the tick interval; takes effect for the next drained tick
    pub fn set_interval(&mut self, interval: f64) {
        self.interval = interval;
    }

    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    /// Zero the accumulator and install a fresh interval
    pub fn reset(&mut self, interval: f64) {
        self.accumulated = 0.0;
        self.interval = interval;
    }

    /// Add elapsed time without draining ticks
    pub fn accumulate(&mut self, dt: f64) {
        self.accumulated += dt.max(0.0);
    }

    /// Drain one tick if a full interval has accumulated
    pub fn take_tick(&mut self) -> bool {
        if self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            true
        } else {
            false
        }
    }

    /// Accumulate `dt` and drain every tick it completes
    pub fn advance(&mut self, dt: f64) -> u32 {
        self.accumulate(dt);
        let mut ticks = 0;
        while self.take_tick() {
            ticks += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_interval() {
        let mut clock = SimulationClock::new(0.25);
        assert_eq!(clock.advance(0.125), 0);
        assert_eq!(clock.advance(0.125), 1);
        assert_eq!(clock.accumulated(), 0.0);
    }

    #[test]
    fn test_slow_frame_does_not_drop_ticks() {
        let mut clock = SimulationClock::new(0.25);
        assert_eq!(clock.advance(1.125), 4);
        assert_eq!(clock.accumulated(), 0.125);
        assert_eq!(clock.advance(0.125), 1);
    }

    #[test]
    fn test_interval_change_applies_to_remaining_time() {
        let mut clock = SimulationClock::new(0.5);
        clock.accumulate(1.0);
        assert!(clock.take_tick());
        clock.set_interval(0.25);
        assert!(clock.take_tick());
        assert!(clock.take_tick());
        assert!(!clock.take_tick());
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut clock = SimulationClock::new(0.5);
        clock.advance(0.25);
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.accumulated(), 0.25);
    }

    #[test]
    fn test_reset() {
        let mut clock = SimulationClock::new(0.5);
        clock.accumulate(0.4);
        clock.reset(0.2);
        assert_eq!(clock.accumulated(), 0.0);
        assert_eq!(clock.interval(), 0.2);
    }
}

use std::time::Duration;

use super::source::{Stopwatch, TimeSource};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds. Never negative.
    pub dt: f32,

    /// Source time sampled at the tick.
    pub elapsed: Duration,

    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// One clock per window so that multi-window applications do not share
/// delta-time state. The first tick measures against construction time; callers
/// tolerate that single outlier frame.
#[derive(Debug, Clone)]
pub struct FrameClock<T: TimeSource = Stopwatch> {
    source: T,
    last: Duration,
    last_dt: f32,
    frame_index: u64,
}

impl FrameClock<Stopwatch> {
    /// Creates a clock on a freshly started `Stopwatch`.
    pub fn new() -> Self {
        Self::with_source(Stopwatch::start())
    }
}

impl Default for FrameClock<Stopwatch> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> FrameClock<T> {
    /// Creates a clock on an arbitrary time source, baselined at the source's current time.
    pub fn with_source(source: T) -> Self {
        let last = source.elapsed();
        Self {
            source,
            last,
            last_dt: 0.0,
            frame_index: 0,
        }
    }

    /// Re-bases the clock so the next tick measures from now.
    pub fn reset(&mut self) {
        self.last = self.source.elapsed();
    }

    /// Delta produced by the most recent tick (0 before the first tick).
    pub fn last_dt(&self) -> f32 {
        self.last_dt
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = self.source.elapsed();
        let dt = now.saturating_sub(self.last);
        self.last = now;
        self.last_dt = dt.as_secs_f32();

        let ft = FrameTime {
            dt: self.last_dt,
            elapsed: now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualTime;

    #[test]
    fn deltas_match_configured_gaps() {
        let time = ManualTime::new();
        let mut clock = FrameClock::with_source(time.clone());

        let gaps_ms = [16u64, 17, 33, 0, 250, 1];
        for (i, gap) in gaps_ms.iter().enumerate() {
            time.advance(Duration::from_millis(*gap));
            let ft = clock.tick();
            assert_eq!(ft.dt, Duration::from_millis(*gap).as_secs_f32());
            assert_eq!(ft.frame_index, i as u64);
            assert!(ft.dt >= 0.0);
        }
    }

    #[test]
    fn first_tick_measures_from_construction() {
        let time = ManualTime::new();
        time.advance(Duration::from_secs(5));
        let mut clock = FrameClock::with_source(time.clone());

        time.advance(Duration::from_millis(20));
        assert_eq!(clock.tick().dt, Duration::from_millis(20).as_secs_f32());
    }

    #[test]
    fn reset_rebases() {
        let time = ManualTime::new();
        let mut clock = FrameClock::with_source(time.clone());

        time.advance(Duration::from_secs(3));
        clock.reset();
        time.advance(Duration::from_millis(10));

        assert_eq!(clock.tick().dt, Duration::from_millis(10).as_secs_f32());
        assert_eq!(clock.last_dt(), Duration::from_millis(10).as_secs_f32());
    }

    #[test]
    fn manual_time_never_goes_back() {
        let time = ManualTime::new();
        time.set(Duration::from_secs(2));
        time.set(Duration::from_secs(1));
        assert_eq!(time.elapsed(), Duration::from_secs(2));
    }

    #[test]
    fn stopwatch_clock_is_non_negative() {
        let mut clock = FrameClock::new();
        for _ in 0..3 {
            assert!(clock.tick().dt >= 0.0);
        }
    }
}

//! Fixed-timestep ticker using an accumulator pattern.
//!
//! `draw_web()` calls at ~60fps with variable delta. A `Ticker` converts
//! wall-clock timestamps into a whole number of ticks at a fixed interval,
//! so game logic never reads the clock itself and tests can drive it with
//! made-up timestamps. Unlike a browser `setInterval`, the ticker can be
//! stopped; once stopped it never yields another tick.
//!
//! Two flavours share the accumulator. Animation clocks clamp each frame
//! delta so a backgrounded tab doesn't replay seconds of animation.
//! Income clocks keep the whole gap (the browser pauses animation frames in
//! hidden tabs) and only bound how many ticks one frame may catch up.

pub struct Ticker {
    /// Milliseconds per tick (1000 = one passive payout per second).
    ms_per_tick: f64,
    /// Largest frame delta accepted; anything beyond it is dropped.
    max_frame_ms: f64,
    /// Accumulated milliseconds not yet consumed as ticks.
    accumulator: f64,
    /// Total ticks yielded since creation.
    pub total_ticks: u64,
    /// Timestamp of the last update (ms), None until the first frame.
    last_timestamp: Option<f64>,
    running: bool,
}

impl Ticker {
    /// A running ticker that fires once every `interval_ms`.
    pub fn every(interval_ms: u32, max_frame_ms: u32) -> Self {
        Self {
            ms_per_tick: interval_ms.max(1) as f64,
            max_frame_ms: max_frame_ms as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
            running: true,
        }
    }

    /// A running ticker that never loses elapsed time to slow frames. A
    /// single frame pays out at most `max_catchup_ticks` ticks.
    pub fn catching_up(interval_ms: u32, max_catchup_ticks: u32) -> Self {
        let interval_ms = interval_ms.max(1);
        Self::every(interval_ms, interval_ms.saturating_mul(max_catchup_ticks.max(1)))
    }

    /// A running ticker at `ticks_per_sec` with the default 500ms frame clamp.
    pub fn per_second(ticks_per_sec: u32) -> Self {
        Self::every(1000 / ticks_per_sec.max(1), 500)
    }

    /// (Re)start ticking. The next `update` is treated as a first frame.
    pub fn start(&mut self) {
        self.running = true;
        self.last_timestamp = None;
        self.accumulator = 0.0;
    }

    /// Cancel all future ticks. Returns true if the ticker was running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        self.accumulator = 0.0;
        was_running
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed a wall-clock timestamp (from `performance.now()` or similar).
    /// Returns the number of ticks due this frame; always 0 once stopped.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        if !self.running {
            return 0;
        }
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, self.max_frame_ms),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_returns_zero_ticks() {
        let mut t = Ticker::every(1000, 500);
        assert_eq!(t.update(12_345.0), 0);
    }

    #[test]
    fn one_tick_per_interval() {
        let mut t = Ticker::every(1000, 500);
        t.update(0.0);
        assert_eq!(t.update(500.0), 0);
        assert_eq!(t.update(1000.0), 1);
        assert_eq!(t.total_ticks, 1);
    }

    #[test]
    fn remainder_carried_over() {
        let mut t = Ticker::per_second(10);
        t.update(0.0);
        assert_eq!(t.update(150.0), 1);
        // 50ms left over + 50ms delta = one more tick
        assert_eq!(t.update(200.0), 1);
        assert_eq!(t.total_ticks, 2);
    }

    #[test]
    fn large_gap_is_clamped() {
        let mut t = Ticker::per_second(10);
        t.update(0.0);
        assert_eq!(t.update(10_000.0), 5);
    }

    #[test]
    fn steady_60fps_for_three_seconds() {
        let mut t = Ticker::every(1000, 500);
        t.update(0.0);
        let mut total = 0u32;
        for i in 1..=180 {
            total += t.update(i as f64 * 16.667);
        }
        assert!((2..=3).contains(&total), "expected ~3 ticks, got {}", total);
    }

    #[test]
    fn catching_up_keeps_slow_frames() {
        let mut t = Ticker::catching_up(1000, 3600);
        t.update(0.0);
        let mut total = 0;
        for s in 1..=10 {
            total += t.update(s as f64 * 1000.0);
        }
        assert_eq!(total, 10);
        // 1.5 fps: half a tick carried between frames
        let mut t = Ticker::catching_up(1000, 3600);
        t.update(0.0);
        let total: u32 = (1..=6).map(|i| t.update(i as f64 * 1500.0)).sum();
        assert_eq!(total, 9);
    }

    #[test]
    fn catching_up_pays_a_hidden_tab_gap() {
        let mut t = Ticker::catching_up(1000, 3600);
        t.update(0.0);
        assert_eq!(t.update(60_000.0), 60);
        assert_eq!(t.update(60_999.0), 0);
        assert_eq!(t.update(61_000.0), 1);
    }

    #[test]
    fn catch_up_is_bounded() {
        let mut t = Ticker::catching_up(1000, 30);
        t.update(0.0);
        assert_eq!(t.update(3_600_000.0), 30);
        assert_eq!(t.total_ticks, 30);
    }

    #[test]
    fn stopped_ticker_never_fires() {
        let mut t = Ticker::every(1000, 500);
        t.update(0.0);
        t.update(400.0);
        assert!(t.stop());
        assert!(!t.is_running());
        for i in 1..20 {
            assert_eq!(t.update(400.0 + i as f64 * 400.0), 0);
        }
        // Second stop reports it was already stopped.
        assert!(!t.stop());
    }

    #[test]
    fn restart_drops_time_spent_stopped() {
        let mut t = Ticker::every(1000, 5000);
        t.update(0.0);
        t.stop();
        t.start();
        assert_eq!(t.update(60_000.0), 0);
        assert_eq!(t.update(61_000.0), 1);
    }
}

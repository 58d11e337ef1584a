//! Count-up reveal for a single displayed number.
//!
//! `Idle` waits for the first sufficiently visible observation, `Animating`
//! counts up over a fixed window, `Settled` pins the exact target. The state
//! machine is clock-agnostic: callers pass timestamps in milliseconds.

use super::config::AnimationSettings;

pub const DEFAULT_DURATION_MS: f64 = 1500.0;
pub const DEFAULT_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealState {
    Idle,
    Animating { started_at: f64 },
    Settled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reveal {
    target: u64,
    duration_ms: f64,
    threshold: f64,
    state: RevealState,
    displayed: u64,
    released: bool,
}

impl Reveal {
    pub fn new(target: u64) -> Self {
        Self::with_timing(target, DEFAULT_DURATION_MS, DEFAULT_THRESHOLD)
    }

    pub fn with_timing(target: u64, duration_ms: f64, threshold: f64) -> Self {
        Self {
            target,
            duration_ms: duration_ms.max(f64::EPSILON),
            threshold,
            state: RevealState::Idle,
            displayed: 0,
            released: false,
        }
    }

    pub fn from_settings(target: u64, settings: &AnimationSettings) -> Self {
        Self::with_timing(
            target,
            settings.reveal_duration_ms,
            settings.visibility_threshold,
        )
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn displayed(&self) -> u64 {
        self.displayed
    }

    /// Feed a visibility observation. Returns `true` only for the one
    /// observation that starts the animation; every later call is ignored,
    /// so scrolling away and back never restarts it.
    pub fn observe(&mut self, intersection_ratio: f64, now_ms: f64) -> bool {
        if self.released || self.state != RevealState::Idle {
            return false;
        }
        if intersection_ratio < self.threshold {
            return false;
        }
        self.state = RevealState::Animating { started_at: now_ms };
        self.displayed = 0;
        true
    }

    /// Sample one frame. Returns the value to display.
    pub fn tick(&mut self, now_ms: f64) -> u64 {
        if self.released {
            return self.displayed;
        }
        if let RevealState::Animating { started_at } = self.state {
            let elapsed = now_ms - started_at;
            if elapsed >= self.duration_ms {
                self.state = RevealState::Settled;
                self.displayed = self.target;
            } else {
                self.displayed = value_at(self.target, elapsed, self.duration_ms);
            }
        }
        self.displayed
    }

    /// Advance on one rendered frame stamped `timestamp_ms`. Returns the value
    /// to paint and whether another frame is wanted.
    pub fn on_frame(&mut self, timestamp_ms: f64) -> (u64, bool) {
        let value = self.tick(timestamp_ms);
        (value, self.needs_frame())
    }

    /// Jump straight to the target, for when no frames will arrive.
    pub fn settle(&mut self) -> u64 {
        if !self.released {
            self.state = RevealState::Settled;
            self.displayed = self.target;
        }
        self.displayed
    }

    /// Teardown. Stops both the visibility watch and the frame loop from the
    /// state machine's point of view; safe to call more than once.
    pub fn release(&mut self) {
        self.released = true;
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Whether a visibility watch should still be installed.
    pub fn is_watching(&self) -> bool {
        !self.released && self.state == RevealState::Idle
    }

    /// Whether the frame loop should keep running.
    pub fn needs_frame(&self) -> bool {
        !self.released && matches!(self.state, RevealState::Animating { .. })
    }

    pub fn is_settled(&self) -> bool {
        self.state == RevealState::Settled
    }
}

/// `floor(min(elapsed / duration, 1) * target)`, with the final frame exact.
pub fn value_at(target: u64, elapsed_ms: f64, duration_ms: f64) -> u64 {
    if elapsed_ms >= duration_ms {
        return target;
    }
    let progress = (elapsed_ms / duration_ms).clamp(0.0, 1.0);
    ((progress * target as f64).floor() as u64).min(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animating(target: u64) -> Reveal {
        let mut reveal = Reveal::new(target);
        assert!(reveal.observe(0.75, 0.0));
        reveal
    }

    #[test]
    fn stays_idle_until_threshold_met() {
        let mut reveal = Reveal::new(1000);
        assert!(!reveal.observe(0.2, 10.0));
        assert_eq!(reveal.state(), RevealState::Idle);
        assert_eq!(reveal.tick(500.0), 0);
        assert!(reveal.observe(0.5, 20.0));
        assert_eq!(reveal.state(), RevealState::Animating { started_at: 20.0 });
    }

    #[test]
    fn count_up_is_monotonic_and_exact_at_the_end() {
        let mut reveal = animating(1000);
        assert_eq!(reveal.tick(0.0), 0);

        let mut previous = 0;
        let mut now = 0.0;
        while now < 1500.0 {
            let value = reveal.tick(now);
            assert!(value >= previous, "went backwards at t={now}");
            assert!(value <= 1000);
            previous = value;
            now += 16.0;
        }

        assert_eq!(reveal.tick(1500.0), 1000);
        assert!(reveal.is_settled());
        assert_eq!(reveal.tick(9000.0), 1000);
    }

    #[test]
    fn awkward_targets_land_exactly() {
        for target in [1, 3, 7, 19, 53, 999_983] {
            let mut reveal = animating(target);
            for frame in 0..200 {
                reveal.tick(frame as f64 * 7.3);
            }
            assert_eq!(reveal.tick(1500.0), target);
        }
    }

    #[test]
    fn visibility_trigger_is_one_shot() {
        let mut reveal = animating(10);
        reveal.tick(1600.0);
        assert!(reveal.is_settled());
        assert!(!reveal.observe(1.0, 2000.0));
        assert!(reveal.is_settled());
        assert!(!reveal.is_watching());

        let mut midway = animating(10);
        midway.tick(300.0);
        assert!(!midway.observe(1.0, 400.0));
        assert_eq!(midway.state(), RevealState::Animating { started_at: 0.0 });
    }

    #[test]
    fn release_stops_watch_and_frames() {
        let mut idle = Reveal::new(5);
        assert!(idle.is_watching());
        idle.release();
        assert!(!idle.is_watching());
        assert!(!idle.observe(1.0, 0.0));

        let mut running = animating(100);
        running.tick(750.0);
        assert!(running.needs_frame());
        running.release();
        running.release();
        assert!(!running.needs_frame());
        assert_eq!(running.tick(5000.0), 50);
    }

    #[test]
    fn frames_are_sampled_at_their_own_timestamps() {
        let mut reveal = Reveal::with_timing(600, 1000.0, 0.5);
        assert!(reveal.observe(0.9, 2000.0));

        // Irregular frame spacing, including a long stall.
        let frames = [2000.0, 2016.7, 2033.3, 2250.0, 2900.0, 2999.9, 3000.0];
        let painted: Vec<(u64, bool)> = frames.iter().map(|ts| reveal.on_frame(*ts)).collect();
        assert_eq!(
            painted,
            vec![
                (0, true),
                (10, true),
                (19, true),
                (150, true),
                (540, true),
                (599, true),
                (600, false),
            ]
        );
        assert!(reveal.is_settled());
    }

    #[test]
    fn idle_frames_paint_zero_and_stop() {
        let mut reveal = Reveal::new(40);
        assert_eq!(reveal.on_frame(123.0), (0, false));
    }

    #[test]
    fn settle_lands_on_target_unless_released() {
        let mut reveal = Reveal::new(77);
        assert_eq!(reveal.settle(), 77);
        assert!(reveal.is_settled());

        let mut gone = animating(100);
        gone.tick(750.0);
        gone.release();
        assert_eq!(gone.settle(), 50);
    }

    #[test]
    fn value_at_matches_closed_form() {
        assert_eq!(value_at(1000, 0.0, 1500.0), 0);
        assert_eq!(value_at(1000, 750.0, 1500.0), 500);
        assert_eq!(value_at(1000, 1499.0, 1500.0), 999);
        assert_eq!(value_at(1000, 1500.0, 1500.0), 1000);
        assert_eq!(value_at(1000, -5.0, 1500.0), 0);
        assert_eq!(value_at(0, 700.0, 1500.0), 0);
    }
}

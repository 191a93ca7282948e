//! Circular carousel state machine.
//!
//! Tracks which of `len` slides is showing and which way the last move went.
//! The index always stays in `0..len`; paging past either end wraps around.
//! The direction carries no weight for correctness, it only tells the
//! renderer whether the incoming slide enters from the right (forward) or
//! the left (backward).
//!
//! Drags are reduced to a single number, `|offset| * |velocity|`: a flick
//! that exceeds the threshold pages once, anything weaker is a cancelled drag
//! and the view snaps back without changing state.
//!
//! With zero or one slide there is nothing to rotate to, so paging and
//! gestures are no-ops.

use serde::Serialize;
use std::time::Duration;

/// Which way the last transition went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Backward,
    #[default]
    None,
    Forward,
}

impl Direction {
    /// `-1`, `0` or `1`.
    pub fn delta(self) -> i8 {
        match self {
            Direction::Backward => -1,
            Direction::None => 0,
            Direction::Forward => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarouselState {
    pub index: usize,
    pub direction: Direction,
}

/// What a drag release did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Paged(Direction),
    /// Below threshold (or nothing to page to): snap back, no transition.
    SnapBack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    state: CarouselState,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            state: CarouselState {
                index: 0,
                direction: Direction::None,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn index(&self) -> usize {
        self.state.index
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    /// Move one slide in `direction`, wrapping at both ends.
    ///
    /// Returns `false` (and leaves state alone) when there is nothing to
    /// rotate to or `direction` is [`Direction::None`].
    pub fn paginate(&mut self, direction: Direction) -> bool {
        if self.len <= 1 || direction == Direction::None {
            return false;
        }
        let n = self.len;
        self.state.index = match direction {
            Direction::Forward => (self.state.index + 1) % n,
            Direction::Backward => (self.state.index + n - 1) % n,
            Direction::None => self.state.index,
        };
        self.state.direction = direction;
        true
    }

    /// Jump straight to a slide (indicator dots).
    ///
    /// Targets past the end are clamped to the last slide. The direction is
    /// forward when moving to a higher index and backward otherwise,
    /// including a jump to the current slide.
    pub fn jump_to(&mut self, target: usize) {
        if self.len == 0 {
            return;
        }
        let target = target.min(self.len - 1);
        self.state.direction = if target > self.state.index {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.state.index = target;
    }

    /// Apply a drag release.
    ///
    /// `offset` is the horizontal drag distance (negative = dragged left) and
    /// `velocity` the release speed. A swipe left advances, a swipe right
    /// goes back.
    pub fn handle_gesture(&mut self, offset: f64, velocity: f64, threshold: f64) -> GestureOutcome {
        if self.len <= 1 {
            return GestureOutcome::SnapBack;
        }
        let power = swipe_power(offset, velocity);
        let direction = if power > threshold && offset < 0.0 {
            Direction::Forward
        } else if power > threshold && offset > 0.0 {
            Direction::Backward
        } else {
            return GestureOutcome::SnapBack;
        };
        self.paginate(direction);
        GestureOutcome::Paged(direction)
    }

    /// Adopt a new slide count, keeping the index in range.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.state.index >= len {
            self.state.index = len.saturating_sub(1);
            self.state.direction = Direction::None;
        }
    }
}

/// `|offset| * |velocity|`. NaN inputs yield NaN, which never exceeds a threshold.
pub fn swipe_power(offset: f64, velocity: f64) -> f64 {
    offset.abs() * velocity.abs()
}

/// Timed auto-advance for a [`Carousel`].
///
/// The host feeds elapsed time through [`Autoplay::tick`]; every manual
/// interaction should call [`Autoplay::restart`] so the visitor gets a full
/// interval before the next automatic move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Autoplay {
    interval: Duration,
    elapsed: Duration,
    paused: bool,
}

impl Autoplay {
    /// A zero interval never advances.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            paused: false,
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Advance `carousel` once if a full interval has passed. At most one
    /// slide moves per tick, however long `dt` is.
    pub fn tick(&mut self, dt: Duration, carousel: &mut Carousel) -> bool {
        if self.paused || self.interval.is_zero() || carousel.len() <= 1 {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed < self.interval {
            return false;
        }
        self.elapsed = Duration::ZERO;
        carousel.paginate(Direction::Forward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f64 = 10_000.0;

    #[test]
    fn wrap_scenario() {
        let mut c = Carousel::new(3);
        c.paginate(Direction::Backward);
        assert_eq!(c.index(), 2);
        assert_eq!(c.direction(), Direction::Backward);
        c.paginate(Direction::Forward);
        assert_eq!(c.index(), 0);
        assert_eq!(c.direction(), Direction::Forward);
    }

    #[test]
    fn n_forward_steps_return_to_start() {
        for n in 2..7 {
            for start in 0..n {
                let mut c = Carousel::new(n);
                c.jump_to(start);
                for _ in 0..n {
                    c.paginate(Direction::Forward);
                    assert!(c.index() < n);
                }
                assert_eq!(c.index(), start);
            }
        }
    }

    #[test]
    fn index_stays_in_range_under_mixed_moves() {
        let mut c = Carousel::new(4);
        let offsets = [-300.0, 250.0, -10.0, 800.0, -800.0, 0.0, 120.0];
        for (i, &offset) in offsets.iter().cycle().take(60).enumerate() {
            if i % 3 == 0 {
                c.paginate(if i % 2 == 0 { Direction::Forward } else { Direction::Backward });
            } else {
                c.handle_gesture(offset, 90.0, THRESHOLD);
            }
            assert!(c.index() < 4);
        }
    }

    #[test]
    fn single_and_empty_are_noops() {
        for n in [0, 1] {
            let mut c = Carousel::new(n);
            assert!(!c.paginate(Direction::Forward));
            assert!(!c.paginate(Direction::Backward));
            assert_eq!(
                c.handle_gesture(-1_000.0, 1_000.0, THRESHOLD),
                GestureOutcome::SnapBack
            );
            assert_eq!(c.index(), 0);
            assert_eq!(c.direction(), Direction::None);
        }
    }

    #[test]
    fn paginate_none_is_noop() {
        let mut c = Carousel::new(3);
        assert!(!c.paginate(Direction::None));
        assert_eq!(c.state(), Carousel::new(3).state());
    }

    #[test]
    fn jump_sets_direction_by_target() {
        let mut c = Carousel::new(5);
        c.jump_to(3);
        assert_eq!((c.index(), c.direction()), (3, Direction::Forward));
        c.jump_to(1);
        assert_eq!((c.index(), c.direction()), (1, Direction::Backward));
        c.jump_to(1);
        assert_eq!((c.index(), c.direction()), (1, Direction::Backward));
    }

    #[test]
    fn jump_out_of_range_is_clamped() {
        let mut c = Carousel::new(3);
        c.jump_to(99);
        assert_eq!(c.index(), 2);

        let mut empty = Carousel::new(0);
        empty.jump_to(4);
        assert_eq!(empty.index(), 0);
    }

    #[test]
    fn swipe_left_advances_swipe_right_goes_back() {
        let mut c = Carousel::new(3);
        assert_eq!(
            c.handle_gesture(-200.0, 100.0, THRESHOLD),
            GestureOutcome::Paged(Direction::Forward)
        );
        assert_eq!(c.index(), 1);
        assert_eq!(
            c.handle_gesture(200.0, 100.0, THRESHOLD),
            GestureOutcome::Paged(Direction::Backward)
        );
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn gesture_changes_index_iff_power_exceeds_threshold() {
        let cases = [
            (-100.0, 100.0),  // exactly at threshold
            (-99.0, 100.0),   // below
            (-101.0, 100.0),  // above
            (150.0, -80.0),   // negative velocity, above
            (20.0, 20.0),     // weak
            (0.0, 1e9),       // no offset
            (-1e6, 0.0),      // no velocity
        ];
        for (offset, velocity) in cases {
            let mut c = Carousel::new(5);
            c.jump_to(2);
            let before = c.state();
            let outcome = c.handle_gesture(offset, velocity, THRESHOLD);
            let exceeds = (offset * velocity).abs() > THRESHOLD;
            assert_eq!(c.index() != before.index, exceeds, "offset={offset} velocity={velocity}");
            if !exceeds {
                assert_eq!(outcome, GestureOutcome::SnapBack);
                assert_eq!(c.state(), before);
            }
        }
    }

    #[test]
    fn nan_gesture_snaps_back() {
        let mut c = Carousel::new(3);
        assert_eq!(
            c.handle_gesture(f64::NAN, 100.0, THRESHOLD),
            GestureOutcome::SnapBack
        );
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn shrinking_clamps_index() {
        let mut c = Carousel::new(5);
        c.jump_to(4);
        c.set_len(2);
        assert_eq!(c.index(), 1);
        c.set_len(0);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn direction_deltas() {
        assert_eq!(Direction::Backward.delta(), -1);
        assert_eq!(Direction::None.delta(), 0);
        assert_eq!(Direction::Forward.delta(), 1);
    }

    #[test]
    fn autoplay_advances_once_per_interval() {
        let mut c = Carousel::new(3);
        let mut auto = Autoplay::new(Duration::from_secs(5));

        assert!(!auto.tick(Duration::from_secs(3), &mut c));
        assert!(auto.tick(Duration::from_secs(2), &mut c));
        assert_eq!(c.index(), 1);
        assert!(auto.tick(Duration::from_secs(60), &mut c));
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn autoplay_respects_pause_and_restart() {
        let mut c = Carousel::new(3);
        let mut auto = Autoplay::new(Duration::from_secs(5));

        auto.pause();
        assert!(!auto.tick(Duration::from_secs(10), &mut c));
        auto.resume();

        auto.tick(Duration::from_secs(4), &mut c);
        auto.restart();
        assert!(!auto.tick(Duration::from_secs(4), &mut c));
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn autoplay_disabled_or_single_slide() {
        let mut c = Carousel::new(3);
        assert!(!Autoplay::new(Duration::ZERO).tick(Duration::from_secs(100), &mut c));

        let mut one = Carousel::new(1);
        assert!(!Autoplay::new(Duration::from_secs(1)).tick(Duration::from_secs(5), &mut one));
    }
}

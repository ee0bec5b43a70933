//! Frame-driven tween animations.
//!
//! Animations are not threads: the host calls [`crate::view::CropView::tick`]
//! once per frame with the elapsed time, each session advances its tween and
//! produces the next transform synchronously, and the view raises its redraw
//! flag. At most one settle session (bounce-back or re-center) and one rotate
//! session exist at a time.

use std::time::Duration;

use crate::affine::Affine;

/// Duration of the bounce-back and re-center animations.
pub const SETTLE_DURATION: Duration = Duration::from_millis(300);

/// Duration of the 90-degree rotate animation.
pub const ROTATE_DURATION: Duration = Duration::from_millis(400);

/// Overshoot tension used by the re-center animation.
pub const RECENTER_TENSION: f64 = 0.8;

/// Easing curves mapping linear progress `t` in [0, 1] to eased progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// Fast start, slow finish: `1 - (1 - t)^2`.
    Decelerate,
    /// Shoots slightly past the target before settling back. The tension
    /// controls how far past; output may exceed 1.0 mid-flight.
    Overshoot { tension: f64 },
}

impl Easing {
    /// Map linear progress through the curve.
    pub fn apply(&self, t: f64) -> f64 {
        match *self {
            Easing::Linear => t,
            Easing::Decelerate => {
                let inv = 1.0 - t;
                1.0 - inv * inv
            }
            Easing::Overshoot { tension } => {
                let s = t - 1.0;
                s * s * ((tension + 1.0) * s + tension) + 1.0
            }
        }
    }
}

/// Elapsed/duration pair mapped through an easing curve.
#[derive(Debug, Clone)]
pub struct Tween {
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
            easing,
        }
    }

    /// Advance by `dt` and return the eased progress for the new time.
    ///
    /// Linear progress is clamped to [0, 1]; a zero duration completes on
    /// the first call.
    pub fn advance(&mut self, dt: Duration) -> f64 {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.easing.apply(self.linear_progress())
    }

    fn linear_progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// The release animation settling the image back over the crop square.
///
/// Bounce-back corrects translation only; re-center tweens the entire
/// transform to the canonical fit-cover state. The two share one session
/// slot: a new drag cancels whichever is running.
#[derive(Debug, Clone)]
pub enum Settle {
    Bounce {
        tween: Tween,
        from: (f64, f64),
        to: (f64, f64),
    },
    Recenter {
        tween: Tween,
        from: Affine,
        to: Affine,
    },
}

impl Settle {
    /// Start a bounce-back from the current to the corrected translation.
    pub fn bounce(from: (f64, f64), to: (f64, f64)) -> Self {
        Settle::Bounce {
            tween: Tween::new(SETTLE_DURATION, Easing::Decelerate),
            from,
            to,
        }
    }

    /// Start a full re-center towards the fit-cover transform.
    pub fn recenter(from: Affine, to: Affine) -> Self {
        Settle::Recenter {
            tween: Tween::new(
                SETTLE_DURATION,
                Easing::Overshoot {
                    tension: RECENTER_TENSION,
                },
            ),
            from,
            to,
        }
    }

    /// Advance the session and produce the transform for the new frame.
    ///
    /// `current` is the transform as of the previous frame; bounce-back
    /// replaces only its translation components.
    pub fn advance(&mut self, dt: Duration, current: &Affine) -> Affine {
        match self {
            Settle::Bounce { tween, from, to } => {
                let progress = tween.advance(dt);
                let mut next = *current;
                next.set_translation(
                    from.0 + (to.0 - from.0) * progress,
                    from.1 + (to.1 - from.1) * progress,
                );
                next
            }
            Settle::Recenter { tween, from, to } => {
                let progress = tween.advance(dt);
                from.lerp(to, progress)
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        match self {
            Settle::Bounce { tween, .. } => tween.is_finished(),
            Settle::Recenter { tween, .. } => tween.is_finished(),
        }
    }
}

/// A running rotate-by-90 animation.
///
/// Only the angle is tweened; the transform is rebuilt from scratch every
/// frame because both scale and centering depend non-linearly on the angle
/// (the effective image dimensions swap partway through the sweep).
#[derive(Debug, Clone)]
pub struct RotateAnimation {
    tween: Tween,
    from_deg: f64,
    to_deg: i32,
}

impl RotateAnimation {
    /// Start a rotation from the current resting angle to `(from + 90) % 360`.
    pub fn new(from_deg: i32) -> Self {
        Self {
            tween: Tween::new(ROTATE_DURATION, Easing::Decelerate),
            from_deg: from_deg as f64,
            to_deg: (from_deg + 90) % 360,
        }
    }

    /// Advance and return the interpolated angle for the new frame.
    ///
    /// Interpolates between the start angle and the wrapped target, so a
    /// rotation from 270 sweeps down through 67.5 towards 0 rather than up
    /// through 337.5. The caller feeds the result straight into the
    /// fit-cover construction.
    pub fn advance(&mut self, dt: Duration) -> f64 {
        let progress = self.tween.advance(dt);
        self.from_deg + (self.to_deg as f64 - self.from_deg) * progress
    }

    /// The resting angle committed when the animation ends or is cancelled.
    pub fn target_degrees(&self) -> i32 {
        self.to_deg
    }

    pub fn is_finished(&self) -> bool {
        self.tween.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::Decelerate,
            Easing::Overshoot { tension: 0.8 },
        ] {
            assert!(approx(easing.apply(0.0), 0.0), "{easing:?} at 0");
            assert!(approx(easing.apply(1.0), 1.0), "{easing:?} at 1");
        }
    }

    #[test]
    fn test_decelerate_front_loads_progress() {
        assert!(Easing::Decelerate.apply(0.5) > 0.5);
    }

    #[test]
    fn test_overshoot_exceeds_one_mid_flight() {
        let easing = Easing::Overshoot { tension: 0.8 };
        let max = (1..100)
            .map(|i| easing.apply(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(max > 1.0);
    }

    #[test]
    fn test_tween_advances_and_finishes() {
        let mut tween = Tween::new(Duration::from_millis(100), Easing::Linear);
        let p = tween.advance(Duration::from_millis(50));
        assert!(approx(p, 0.5));
        assert!(!tween.is_finished());

        let p = tween.advance(Duration::from_millis(60));
        assert!(approx(p, 1.0));
        assert!(tween.is_finished());
    }

    #[test]
    fn test_tween_zero_duration_completes_immediately() {
        let mut tween = Tween::new(Duration::ZERO, Easing::Decelerate);
        assert!(approx(tween.advance(Duration::from_millis(1)), 1.0));
        assert!(tween.is_finished());
    }

    #[test]
    fn test_bounce_reaches_corrected_translation() {
        let mut current = Affine::identity();
        current.post_scale(2.0, 0.0, 0.0);
        current.post_translate(50.0, -30.0);

        let mut settle = Settle::bounce(current.translation(), (10.0, 20.0));
        let next = settle.advance(SETTLE_DURATION, &current);

        assert!(settle.is_finished());
        assert_eq!(next.translation(), (10.0, 20.0));
        // Scale untouched by the translation-only tween.
        assert!(approx(next.uniform_scale(), 2.0));
    }

    #[test]
    fn test_recenter_reaches_target_transform() {
        let from = Affine::identity();
        let mut to = Affine::identity();
        to.post_scale(3.0, 0.0, 0.0);
        to.post_translate(100.0, 40.0);

        let mut settle = Settle::recenter(from, to);
        let next = settle.advance(SETTLE_DURATION, &from);

        assert!(settle.is_finished());
        assert_eq!(next, to);
    }

    #[test]
    fn test_recenter_overshoots_before_settling() {
        let from = Affine::identity();
        let mut to = Affine::identity();
        to.post_translate(100.0, 0.0);

        let mut settle = Settle::recenter(from, to);
        let mid = settle.advance(Duration::from_millis(250), &from);
        // Deep into the overshoot curve the translation passes the target.
        assert!(mid.tx > 100.0);

        let end = settle.advance(Duration::from_millis(60), &from);
        assert!(approx(end.tx, 100.0));
    }

    #[test]
    fn test_rotate_sweeps_to_target() {
        let mut anim = RotateAnimation::new(90);
        assert_eq!(anim.target_degrees(), 180);

        let angle = anim.advance(Duration::from_millis(200));
        assert!(angle > 90.0 && angle < 180.0);

        let angle = anim.advance(Duration::from_millis(300));
        assert!(approx(angle, 180.0));
        assert!(anim.is_finished());
    }

    #[test]
    fn test_rotate_target_wraps_at_360() {
        assert_eq!(RotateAnimation::new(270).target_degrees(), 0);
    }

    #[test]
    fn test_rotate_from_270_sweeps_down_to_zero() {
        let mut anim = RotateAnimation::new(270);

        // Eased progress at the half-way mark is 0.75: 270 + (0 - 270) * 0.75.
        let mid = anim.advance(Duration::from_millis(200));
        assert!(approx(mid, 67.5));
        assert!(mid < 270.0);

        let end = anim.advance(Duration::from_millis(300));
        assert!(approx(end, 0.0));
        assert!(anim.is_finished());
    }
}

//! Easing curves, poses and single tweens.
//!
//! Everything here is pure arithmetic over seconds so the same math drives the
//! browser frame loop and the native tests.

/// Easing profiles used by the page. The power family follows the usual
/// `powerN` naming where a higher `N` means a sharper curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    PowerOut(u8),
    PowerInOut(u8),
    BackOut(f64),
}

pub const POWER1_IN_OUT: Ease = Ease::PowerInOut(1);
pub const POWER2_OUT: Ease = Ease::PowerOut(2);
pub const POWER3_OUT: Ease = Ease::PowerOut(3);
pub const POWER3_IN_OUT: Ease = Ease::PowerInOut(3);
pub const BACK_OUT: Ease = Ease::BackOut(1.7);

impl Ease {
    /// Maps linear progress in `[0, 1]` onto the curve. Input outside the
    /// range is clamped first.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::PowerOut(power) => 1.0 - (1.0 - t).powi(i32::from(power) + 1),
            Self::PowerInOut(power) => {
                let exponent = i32::from(power) + 1;
                if t < 0.5 {
                    2f64.powi(exponent - 1) * t.powi(exponent)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(exponent) / 2.0
                }
            }
            Self::BackOut(overshoot) => {
                let shifted = t - 1.0;
                1.0 + (overshoot + 1.0) * shifted.powi(3) + overshoot * shifted.powi(2)
            }
        }
    }
}

/// The animatable visual state of one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotation: f64,
    pub opacity: f64,
    pub blur: f64,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        rotation: 0.0,
        opacity: 1.0,
        blur: 0.0,
    };

    pub const fn offset(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::IDENTITY
        }
    }

    pub const fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    pub const fn with_rotation(self, rotation: f64) -> Self {
        Self { rotation, ..self }
    }

    pub const fn with_opacity(self, opacity: f64) -> Self {
        Self { opacity, ..self }
    }

    pub const fn with_blur(self, blur: f64) -> Self {
        Self { blur, ..self }
    }

    pub fn lerp(self, to: Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a * (1.0 - t) + b * t;
        Self {
            x: mix(self.x, to.x),
            y: mix(self.y, to.y),
            scale: mix(self.scale, to.scale),
            rotation: mix(self.rotation, to.rotation),
            opacity: mix(self.opacity, to.opacity),
            blur: mix(self.blur, to.blur),
        }
    }

    pub fn transform(&self) -> String {
        format!(
            "translate({:.2}px, {:.2}px) scale({:.4}) rotate({:.2}deg)",
            self.x, self.y, self.scale, self.rotation
        )
    }

    pub fn filter(&self) -> String {
        if self.blur <= f64::EPSILON {
            "none".to_string()
        } else {
            format!("blur({:.2}px)", self.blur)
        }
    }

    /// Opacity clamped to what CSS accepts; back-out curves overshoot.
    pub fn css_opacity(&self) -> String {
        format!("{:.4}", self.opacity.clamp(0.0, 1.0))
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A single from/to transition with an optional start delay, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: Pose,
    pub to: Pose,
    pub duration: f64,
    pub delay: f64,
    pub ease: Ease,
}

impl Tween {
    pub const fn new(from: Pose, to: Pose, duration: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration,
            delay: 0.0,
            ease,
        }
    }

    pub const fn delayed(self, delay: f64) -> Self {
        Self { delay, ..self }
    }

    pub fn progress(&self, elapsed: f64) -> f64 {
        if elapsed >= self.total() {
            return 1.0;
        }
        let local = elapsed - self.delay;
        if local <= 0.0 {
            return 0.0;
        }
        self.ease.apply(local / self.duration)
    }

    pub fn sample(&self, elapsed: f64) -> Pose {
        self.from.lerp(self.to, self.progress(elapsed))
    }

    pub fn total(&self) -> f64 {
        self.delay + self.duration.max(0.0)
    }

    pub fn is_done(&self, elapsed: f64) -> bool {
        elapsed >= self.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn every_ease_pins_both_ends() {
        for ease in [Ease::Linear, POWER1_IN_OUT, POWER2_OUT, POWER3_OUT, POWER3_IN_OUT, BACK_OUT] {
            assert!(close(ease.apply(0.0), 0.0), "{ease:?} at 0");
            assert!(close(ease.apply(1.0), 1.0), "{ease:?} at 1");
        }
    }

    #[test]
    fn out_curves_lead_linear_progress() {
        assert!(POWER2_OUT.apply(0.5) > 0.5);
        assert!(POWER3_OUT.apply(0.5) > POWER2_OUT.apply(0.5));
        assert!(close(POWER3_IN_OUT.apply(0.5), 0.5));
    }

    #[test]
    fn back_out_overshoots_before_settling() {
        let peak = (1..100)
            .map(|step| BACK_OUT.apply(f64::from(step) / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn ease_clamps_out_of_range_input() {
        assert!(close(POWER2_OUT.apply(-3.0), 0.0));
        assert!(close(POWER2_OUT.apply(7.0), 1.0));
    }

    #[test]
    fn tween_holds_start_pose_during_delay() {
        let from = Pose::offset(0.0, 50.0).with_opacity(0.0);
        let tween = Tween::new(from, Pose::IDENTITY, 1.0, POWER3_OUT).delayed(2.0);

        assert_eq!(tween.sample(1.5), from);
        assert_eq!(tween.sample(3.0), Pose::IDENTITY);
        assert!(!tween.is_done(2.9));
        assert!(tween.is_done(3.0));
    }

    #[test]
    fn zero_duration_tween_jumps_to_target() {
        let tween = Tween::new(Pose::offset(10.0, 0.0), Pose::IDENTITY, 0.0, Ease::Linear);
        assert_eq!(tween.sample(0.001), Pose::IDENTITY);
    }

    #[test]
    fn filter_is_none_without_blur() {
        assert_eq!(Pose::IDENTITY.filter(), "none");
        assert_eq!(Pose::IDENTITY.with_blur(10.0).filter(), "blur(10.00px)");
        assert_eq!(Pose::IDENTITY.with_opacity(1.3).css_opacity(), "1.0000");
    }
}

use serde::{Deserialize, Serialize};

/// Easing curves applied to animation progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutCubic,
}

impl Easing {
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInQuad => t * t,
            Self::EaseOutQuad => t * (2.0 - t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let f = 2.0 * t - 2.0;
                    0.5 * f * f * f + 1.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Animation {
    duration_x: f64,
    duration_y: f64,
    elapsed: f64,
    easing_x: Easing,
    easing_y: Easing,
}

/// Entrance-animation progress. Both phases stay in `[0, 1]`; `phase_x`
/// shortens the visited entry range, `phase_y` scales values towards zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animator {
    phase_x: f64,
    phase_y: f64,
    running: Option<Animation>,
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            phase_x: 1.0,
            phase_y: 1.0,
            running: None,
        }
    }
}

impl Animator {
    #[must_use]
    pub fn phase_x(&self) -> f64 {
        self.phase_x
    }

    #[must_use]
    pub fn phase_y(&self) -> f64 {
        self.phase_y
    }

    pub fn set_phase_x(&mut self, phase: f64) {
        self.phase_x = sanitize_phase(phase);
    }

    pub fn set_phase_y(&mut self, phase: f64) {
        self.phase_y = sanitize_phase(phase);
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Starts an animation; a zero duration completes that axis immediately.
    pub fn animate(&mut self, duration_x: f64, duration_y: f64, easing_x: Easing, easing_y: Easing) {
        let duration_x = duration_x.max(0.0);
        let duration_y = duration_y.max(0.0);
        self.running = Some(Animation {
            duration_x,
            duration_y,
            elapsed: 0.0,
            easing_x,
            easing_y,
        });
        self.phase_x = if duration_x > 0.0 { 0.0 } else { 1.0 };
        self.phase_y = if duration_y > 0.0 { 0.0 } else { 1.0 };
        self.step(0.0);
    }

    /// Advances the running animation by `dt_seconds`. Returns `true` while it
    /// is still running afterwards.
    pub fn step(&mut self, dt_seconds: f64) -> bool {
        let Some(mut animation) = self.running else {
            return false;
        };
        animation.elapsed += dt_seconds.max(0.0);

        let progress = |duration: f64| {
            if duration > 0.0 {
                (animation.elapsed / duration).min(1.0)
            } else {
                1.0
            }
        };
        let progress_x = progress(animation.duration_x);
        let progress_y = progress(animation.duration_y);
        self.phase_x = animation.easing_x.apply(progress_x);
        self.phase_y = animation.easing_y.apply(progress_y);

        if progress_x >= 1.0 && progress_y >= 1.0 {
            self.running = None;
            false
        } else {
            self.running = Some(animation);
            true
        }
    }

    pub fn stop(&mut self) {
        self.running = None;
        self.phase_x = 1.0;
        self.phase_y = 1.0;
    }
}

fn sanitize_phase(phase: f64) -> f64 {
    if phase.is_finite() {
        phase.clamp(0.0, 1.0)
    } else {
        tracing::warn!(phase, "non-finite animation phase; using 1.0");
        1.0
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{Animator, Easing};

    #[test]
    fn phases_are_clamped() {
        let mut animator = Animator::default();
        animator.set_phase_x(1.5);
        animator.set_phase_y(-0.2);
        assert_eq!(animator.phase_x(), 1.0);
        assert_eq!(animator.phase_y(), 0.0);
    }

    #[test]
    fn linear_animation_reaches_full_phase() {
        let mut animator = Animator::default();
        animator.animate(1.0, 2.0, Easing::Linear, Easing::Linear);
        assert!(animator.step(0.5));
        assert_relative_eq!(animator.phase_x(), 0.5);
        assert_relative_eq!(animator.phase_y(), 0.25);
        assert!(animator.step(0.5));
        assert_relative_eq!(animator.phase_x(), 1.0);
        assert!(!animator.step(1.0));
        assert_relative_eq!(animator.phase_y(), 1.0);
        assert!(!animator.is_running());
    }

    #[test]
    fn easing_endpoints_are_fixed() {
        for easing in [
            Easing::Linear,
            Easing::EaseInQuad,
            Easing::EaseOutQuad,
            Easing::EaseInOutCubic,
        ] {
            assert_relative_eq!(easing.apply(0.0), 0.0);
            assert_relative_eq!(easing.apply(1.0), 1.0);
        }
    }
}

use glam::Vec2;
use motion_data::model::{Direction, RevealSpec};

use crate::directive::Directive;
use crate::interp::{Easing, Interpolatable};
use crate::MotionPreferences;

/// Viewport-entry latch for one region.
///
/// In the default latching mode the state flips `false -> true` exactly
/// once, on the first visibility update past the threshold, and every
/// later update is a no-op, including visibility dropping back to zero.
/// State is never persisted across mounts; a remounted region replays.
#[derive(Debug, Clone)]
pub struct RevealState {
    has_revealed: bool,
    once: bool,
    amount: f32,
    margin: f32,
}

impl RevealState {
    pub fn new(spec: &RevealSpec) -> Self {
        RevealState {
            has_revealed: false,
            once: spec.once,
            amount: spec.amount,
            margin: spec.margin,
        }
    }

    /// The signed pixel margin to hand to the observation source.
    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn has_revealed(&self) -> bool {
        self.has_revealed
    }

    /// Feeds one visibility-ratio update. Returns `true` only on the
    /// update that flips the latch on.
    pub fn update(&mut self, visibility_ratio: f32) -> bool {
        let past_threshold = if self.amount > 0.0 {
            visibility_ratio >= self.amount
        } else {
            visibility_ratio > 0.0
        };

        if self.has_revealed {
            if !self.once && !past_threshold {
                // Re-armable mode: leaving the threshold resets the state
                // so the next entry animates again.
                self.has_revealed = false;
            }
            return false;
        }

        if past_threshold {
            self.has_revealed = true;
            return true;
        }
        false
    }
}

/// Resolves the hidden -> revealed transition of a region over time.
///
/// Until the latch flips, the output is the initial pose. After it flips,
/// the pose eases toward identity across the configured delay + duration.
#[derive(Debug, Clone)]
pub struct RevealTween {
    initial: Directive,
    delay: f32,
    duration: f32,
    easing: Easing,
}

impl RevealTween {
    pub fn new(spec: &RevealSpec, prefs: MotionPreferences) -> Self {
        if prefs.reduced_motion {
            // Opacity-only fade: no offset, no blur, no stagger.
            return RevealTween {
                initial: Directive {
                    opacity: 0.0,
                    ..Directive::IDENTITY
                },
                delay: 0.0,
                duration: MotionPreferences::REDUCED_DURATION,
                easing: Easing::Linear,
            };
        }

        RevealTween {
            initial: initial_pose(spec),
            delay: spec.delay,
            duration: spec.duration,
            easing: Easing::from(spec.easing),
        }
    }

    pub fn initial(&self) -> Directive {
        self.initial
    }

    /// Pose `elapsed` seconds after the latch flipped.
    pub fn pose_at(&self, elapsed: f32) -> Directive {
        let local = elapsed - self.delay;
        if local <= 0.0 {
            return self.initial;
        }
        if self.duration <= 0.0 || local >= self.duration {
            return Directive::IDENTITY;
        }

        let t = self.easing.eval(local / self.duration);
        self.initial.lerp(&Directive::IDENTITY, t)
    }

    /// True once the transition has fully landed on the identity pose.
    pub fn is_settled(&self, elapsed: f32) -> bool {
        elapsed - self.delay >= self.duration
    }
}

/// Hidden pose for a reveal spec: transparent, blurred, displaced against
/// its travel direction.
pub fn initial_pose(spec: &RevealSpec) -> Directive {
    let d = spec.distance;
    let translate = match spec.direction {
        Direction::Up => Vec2::new(0.0, d),
        Direction::Down => Vec2::new(0.0, -d),
        Direction::Left => Vec2::new(d, 0.0),
        Direction::Right => Vec2::new(-d, 0.0),
        Direction::None => Vec2::ZERO,
    };

    Directive {
        opacity: 0.0,
        translate,
        blur: spec.blur,
        scale: 1.0,
        fill: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(v: serde_json::Value) -> RevealSpec {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn latch_flips_once_and_sticks() {
        let mut state = RevealState::new(&spec(json!({})));
        assert!(!state.has_revealed());

        assert!(!state.update(0.0));
        assert!(!state.has_revealed());

        assert!(state.update(0.01));
        assert!(state.has_revealed());

        // Later updates are no-ops, including leaving the viewport.
        assert!(!state.update(0.8));
        assert!(!state.update(0.0));
        assert!(state.has_revealed());
    }

    #[test]
    fn latch_ignores_arbitrary_sequences_after_reveal() {
        let mut state = RevealState::new(&spec(json!({})));
        let updates = [0.0, 0.0, 0.3, 0.0, 1.0, 0.0, 0.0, 0.5];
        let mut seen_reveal = false;
        for u in updates {
            let flipped = state.update(u);
            if flipped {
                assert!(!seen_reveal, "latch flipped twice");
                seen_reveal = true;
            }
            if seen_reveal {
                assert!(state.has_revealed(), "latch reverted");
            }
        }
        assert!(state.has_revealed());
    }

    #[test]
    fn amount_threshold_gates_the_trigger() {
        let mut state = RevealState::new(&spec(json!({ "amount": 0.3 })));
        assert!(!state.update(0.1));
        assert!(!state.update(0.29));
        assert!(state.update(0.3));
    }

    #[test]
    fn rearmable_mode_resets_below_threshold() {
        let mut state = RevealState::new(&spec(json!({ "once": false, "amount": 0.3 })));

        assert!(state.update(0.5));
        assert!(!state.update(0.4));

        // Dropping below the threshold re-arms; the next entry fires.
        assert!(!state.update(0.1));
        assert!(!state.has_revealed());
        assert!(state.update(0.6));
    }

    #[test]
    fn directional_initial_poses() {
        let left = initial_pose(&spec(json!({ "direction": "left" })));
        assert_eq!(left.translate, Vec2::new(60.0, 0.0));
        assert_eq!(left.opacity, 0.0);
        assert_eq!(left.blur, 10.0);

        let up = initial_pose(&spec(json!({ "direction": "up" })));
        assert_eq!(up.translate, Vec2::new(0.0, 60.0));

        let down = initial_pose(&spec(json!({ "direction": "down" })));
        assert_eq!(down.translate, Vec2::new(0.0, -60.0));

        let right = initial_pose(&spec(json!({ "direction": "right" })));
        assert_eq!(right.translate, Vec2::new(-60.0, 0.0));

        let none = initial_pose(&spec(json!({ "direction": "none" })));
        assert_eq!(none.translate, Vec2::ZERO);
    }

    #[test]
    fn tween_holds_initial_through_delay_then_lands_identity() {
        let tween = RevealTween::new(
            &spec(json!({ "direction": "left", "delay": 0.4 })),
            MotionPreferences::default(),
        );

        assert_eq!(tween.pose_at(0.0), tween.initial());
        assert_eq!(tween.pose_at(0.39), tween.initial());

        let mid = tween.pose_at(0.4 + 0.4);
        assert!(mid.opacity > 0.0 && mid.opacity < 1.0);
        assert!(mid.translate.x > 0.0 && mid.translate.x < 60.0);

        assert_eq!(tween.pose_at(0.4 + 0.8), Directive::IDENTITY);
        assert_eq!(tween.pose_at(10.0), Directive::IDENTITY);
        assert!(tween.is_settled(1.2));
        assert!(!tween.is_settled(0.5));
    }

    #[test]
    fn reduced_motion_collapses_to_opacity_fade() {
        let tween = RevealTween::new(
            &spec(json!({ "direction": "left", "delay": 0.4 })),
            MotionPreferences {
                reduced_motion: true,
            },
        );

        let initial = tween.initial();
        assert_eq!(initial.translate, Vec2::ZERO);
        assert_eq!(initial.blur, 0.0);
        assert_eq!(initial.opacity, 0.0);

        // No delay, short duration.
        let mid = tween.pose_at(0.1);
        assert!((mid.opacity - 0.5).abs() < 1e-6);
        assert_eq!(tween.pose_at(0.2), Directive::IDENTITY);
    }
}

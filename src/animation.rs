use glam::Vec2;
use keyframe::{AnimationSequence, CanTween, EasingFunction, Keyframe};
use motion_core::{solve_cubic_bezier, Directive, Interpolatable};
use motion_data::model::{EasingSpec, SpringParams};
use std::fmt;

// Define our own enum to store easing types uniformly
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EasingType {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Custom cubic-bezier control points, evaluated with the same
    /// solver the document-level curves use.
    Bezier(Vec2, Vec2),
}

impl EasingFunction for EasingType {
    fn y(&self, x: f64) -> f64 {
        match self {
            EasingType::Linear => keyframe::functions::Linear.y(x),
            EasingType::EaseIn => keyframe::functions::EaseIn.y(x),
            EasingType::EaseOut => keyframe::functions::EaseOut.y(x),
            EasingType::EaseInOut => keyframe::functions::EaseInOut.y(x),
            EasingType::Bezier(p1, p2) => solve_cubic_bezier(*p1, *p2, x as f32) as f64,
        }
    }
}

impl EasingType {
    pub fn eval(&self, x: f32) -> f32 {
        self.y(x as f64) as f32
    }
}

impl From<EasingSpec> for EasingType {
    fn from(spec: EasingSpec) -> Self {
        match spec {
            EasingSpec::Linear => EasingType::Linear,
            EasingSpec::EaseIn => EasingType::EaseIn,
            EasingSpec::EaseOut => EasingType::EaseOut,
            EasingSpec::EaseInOut => EasingType::EaseInOut,
            EasingSpec::CubicBezier([x1, y1, x2, y2]) => {
                EasingType::Bezier(Vec2::new(x1, y1), Vec2::new(x2, y2))
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SpringConfig {
    pub stiffness: f32, // Tension
    pub damping: f32,   // Friction
    pub mass: f32,
    pub velocity: f32, // Initial velocity
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            velocity: 0.0,
        }
    }
}

impl From<SpringParams> for SpringConfig {
    fn from(p: SpringParams) -> Self {
        Self {
            stiffness: p.stiffness,
            damping: p.damping,
            mass: p.mass,
            velocity: 0.0,
        }
    }
}

// Wrapper for Directive to implement CanTween
#[derive(Clone, Debug, Default)]
pub struct TweenablePose(pub Directive);

impl CanTween for TweenablePose {
    fn ease(from: Self, to: Self, time: impl keyframe::num_traits::Float) -> Self {
        let t = time.to_f64().unwrap() as f32;
        TweenablePose(from.0.lerp(&to.0, t))
    }
}

#[derive(Clone)]
pub struct Animated<T>
where
    T: Clone + keyframe::CanTween + Default,
{
    pub raw_keyframes: Vec<(T, f64, EasingType)>,
    pub sequence: AnimationSequence<T>,
    pub current_value: T,
}

impl<T> Animated<T>
where
    T: Clone + keyframe::CanTween + Default,
{
    pub fn new(initial: T) -> Self {
        let raw = vec![(initial.clone(), 0.0, EasingType::Linear)];
        let kf = Keyframe::new(initial.clone(), 0.0, EasingType::Linear);

        Self {
            sequence: AnimationSequence::from(vec![kf]),
            raw_keyframes: raw,
            current_value: initial,
        }
    }

    /// Appends a keyframe `duration` seconds after the current end of the
    /// sequence. Non-positive durations are ignored (the `keyframe`
    /// sequence cannot hold two frames at the same time).
    pub fn push(&mut self, target: T, duration: f64, easing: EasingType) {
        if duration <= 0.0 {
            return;
        }
        let current_end_time = self.sequence.duration();
        let new_time = current_end_time + duration;

        self.raw_keyframes.push((target, new_time, easing));
        self.rebuild_sequence();
    }

    /// Discards the existing sequence and tweens from `start` to `target`.
    ///
    /// With a non-positive duration this is a hard jump to `target`.
    pub fn retween(&mut self, start: T, target: T, duration: f64, easing: EasingType) {
        if duration <= 0.0 {
            *self = Self::new(target);
            return;
        }
        self.raw_keyframes = vec![
            (start.clone(), 0.0, EasingType::Linear),
            (target, duration, easing),
        ];
        self.current_value = start;
        self.rebuild_sequence();
    }

    pub fn duration(&self) -> f64 {
        self.sequence.duration()
    }

    pub fn update(&mut self, time: f64) {
        self.sequence.advance_to(time);
        self.current_value = self.sequence.now();
    }

    fn rebuild_sequence(&mut self) {
        let frames: Vec<Keyframe<T>> = self
            .raw_keyframes
            .iter()
            .map(|(val, time, ease_type)| Keyframe::new(val.clone(), *time, *ease_type))
            .collect();

        self.sequence = AnimationSequence::from(frames);
    }
}

impl Animated<f32> {
    pub fn add_spring(&mut self, target: f32, config: SpringConfig) {
        let start = if let Some(last) = self.raw_keyframes.last() {
            last.0
        } else {
            self.current_value
        };

        self.add_spring_with_start(start, target, config);
    }

    pub fn add_spring_with_start(&mut self, start: f32, target: f32, config: SpringConfig) {
        // If start is different from the last keyframe, restart there
        let needs_restart = self
            .raw_keyframes
            .last()
            .map_or(true, |last| (last.0 - start).abs() > 0.0001);
        if needs_restart {
            *self = Self::new(start);
        }

        let frames = solve_spring(start, target, config);

        let mut previous_time = 0.0;
        for (value, time) in frames {
            let dt = time - previous_time;
            self.push(value, dt, EasingType::Linear);
            previous_time = time;
        }
    }
}

/// Bakes a damped spring into discrete frames at 60 fps, ending exactly
/// on the target once position and velocity have settled.
fn solve_spring(start: f32, end: f32, config: SpringConfig) -> Vec<(f32, f64)> {
    let mut frames = Vec::new();
    let mut t = 0.0;
    let dt: f32 = 1.0 / 60.0; // Bake resolution

    let mut current = start;
    let mut velocity = config.velocity;

    // Safety break
    let max_duration = 10.0;

    // Epsilon for settling
    let position_epsilon = 0.1;
    let velocity_epsilon = 0.1;

    loop {
        let force = -config.stiffness * (current - end);
        let damping = -config.damping * velocity;
        let acceleration = (force + damping) / config.mass;

        velocity += acceleration * dt;
        current += velocity * dt;
        t += dt as f64;

        frames.push((current, t));

        if t > max_duration as f64 {
            break;
        }

        let is_settled =
            (current - end).abs() < position_epsilon && velocity.abs() < velocity_epsilon;
        if is_settled {
            // Add one final frame exactly at target to ensure we land
            frames.push((end, t + dt as f64));
            break;
        }
    }
    frames
}

impl<T> fmt::Debug for Animated<T>
where
    T: Clone + keyframe::CanTween + Default + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animated")
            .field("current_value", &self.current_value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retween_moves_between_poses() {
        let hidden = Directive {
            opacity: 0.0,
            ..Directive::IDENTITY
        };
        let mut anim = Animated::new(TweenablePose(hidden));
        anim.retween(
            TweenablePose(hidden),
            TweenablePose(Directive::IDENTITY),
            0.3,
            EasingType::Linear,
        );

        anim.update(0.0);
        assert_eq!(anim.current_value.0.opacity, 0.0);

        anim.update(0.15);
        assert!((anim.current_value.0.opacity - 0.5).abs() < 1e-4);

        anim.update(0.3);
        assert_eq!(anim.current_value.0.opacity, 1.0);

        // Past the end the sequence holds the final value.
        anim.update(5.0);
        assert_eq!(anim.current_value.0.opacity, 1.0);
    }

    #[test]
    fn retween_with_zero_duration_jumps() {
        let mut anim = Animated::new(0.0_f32);
        anim.retween(0.0, 10.0, 0.0, EasingType::Linear);
        anim.update(0.0);
        assert_eq!(anim.current_value, 10.0);
    }

    #[test]
    fn push_extends_the_sequence() {
        let mut anim = Animated::new(0.0_f32);
        anim.push(8.0, 0.75, EasingType::EaseInOut);
        anim.push(0.0, 0.75, EasingType::EaseInOut);
        assert!((anim.duration() - 1.5).abs() < 1e-9);

        anim.update(0.75);
        assert!((anim.current_value - 8.0).abs() < 1e-4);
        anim.update(1.5);
        assert!(anim.current_value.abs() < 1e-4);
    }

    #[test]
    fn push_ignores_non_positive_durations() {
        let mut anim = Animated::new(1.0_f32);
        anim.push(2.0, 0.0, EasingType::Linear);
        anim.push(3.0, -1.0, EasingType::Linear);
        assert_eq!(anim.duration(), 0.0);
    }

    #[test]
    fn spring_settles_on_target() {
        let mut anim = Animated::new(1.0_f32);
        anim.add_spring(
            1.15,
            SpringConfig {
                stiffness: 300.0,
                damping: 10.0,
                mass: 1.0,
                velocity: 0.0,
            },
        );

        let total = anim.duration();
        assert!(total > 0.0 && total < 10.0);

        anim.update(total);
        assert!((anim.current_value - 1.15).abs() < 1e-3);
    }

    #[test]
    fn bezier_easing_matches_core_solver() {
        let e = EasingType::Bezier(Vec2::new(0.25, 0.4), Vec2::new(0.25, 1.0));
        let direct = solve_cubic_bezier(Vec2::new(0.25, 0.4), Vec2::new(0.25, 1.0), 0.5);
        assert!((e.eval(0.5) - direct).abs() < 1e-6);
        assert_eq!(e.eval(0.0), 0.0);
        assert_eq!(e.eval(1.0), 1.0);
    }
}

//! Idle-loop system.
//!
//! Plays a small repeating keyframe sequence on one channel, independent
//! of scroll position (e.g. a scroll cue bobbing between offsets).

use motion_core::Directive;
use motion_data::model::{Channel, IdleLoop};

use crate::animation::{Animated, EasingType};

#[derive(Debug, Clone)]
pub struct IdleRuntime {
    channel: Channel,
    anim: Animated<f32>,
    period: f64,
}

impl IdleRuntime {
    pub fn new(spec: &IdleLoop) -> Self {
        let easing = EasingType::from(spec.easing);
        let first = spec.values.first().copied().unwrap_or_default();
        let mut anim = Animated::new(first);

        // Spread the cycle evenly over the remaining values.
        let segments = spec.values.len().saturating_sub(1).max(1);
        let segment = f64::from(spec.duration) / segments as f64;
        for value in spec.values.iter().skip(1) {
            anim.push(*value, segment, easing);
        }

        IdleRuntime {
            channel: spec.channel,
            anim,
            period: f64::from(spec.duration),
        }
    }

    /// Advances the loop to the given stage time, wrapping each cycle.
    pub fn tick(&mut self, now: f64) {
        if self.period <= 0.0 {
            return;
        }
        self.anim.update(now.rem_euclid(self.period));
    }

    pub fn apply(&self, directive: &mut Directive) {
        directive.set(self.channel, self.anim.current_value);
    }
}

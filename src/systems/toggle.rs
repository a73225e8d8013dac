//! Two-state toggle system.
//!
//! A toggle tweens a region between a hidden and an active pose when the
//! host flips it (menu open/close) or when the scroll offset crosses a
//! configured threshold (condensed navigation bar). Only channels whose
//! hidden and active values differ are written, so a toggle composes
//! with other bindings on the same region.

use motion_core::Directive;
use motion_data::model::{Channel, ToggleSpec};

use crate::animation::{Animated, EasingType, SpringConfig, TweenablePose};

const POSE_CHANNELS: [Channel; 5] = [
    Channel::Opacity,
    Channel::TranslateX,
    Channel::TranslateY,
    Channel::Blur,
    Channel::Scale,
];

#[derive(Debug, Clone)]
pub struct ToggleRuntime {
    hidden: Directive,
    active: Directive,
    duration: f64,
    easing: EasingType,
    spring: Option<SpringConfig>,
    scroll_past: Option<f64>,
    animated_channels: Vec<Channel>,
    on: bool,
    anim: Animated<TweenablePose>,
    scale_spring: Option<Animated<f32>>,
    flipped_at: f64,
}

impl ToggleRuntime {
    pub fn new(spec: &ToggleSpec) -> Self {
        let hidden = Directive::from_pose(&spec.hidden);
        let active = Directive::from_pose(&spec.active);

        let animated_channels = POSE_CHANNELS
            .into_iter()
            .filter(|ch| hidden.get(*ch) != active.get(*ch))
            .collect();

        ToggleRuntime {
            hidden,
            active,
            duration: f64::from(spec.duration),
            easing: EasingType::from(spec.easing),
            spring: spec.spring.map(SpringConfig::from),
            scroll_past: spec.scroll_past.map(f64::from),
            animated_channels,
            on: false,
            anim: Animated::new(TweenablePose(hidden)),
            scale_spring: None,
            flipped_at: 0.0,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Flips the toggle, tweening from wherever the pose currently is.
    pub fn set(&mut self, on: bool, now: f64) {
        if on == self.on {
            return;
        }
        self.on = on;

        let from = self.anim.current_value.0;
        let target = if on { self.active } else { self.hidden };
        self.anim
            .retween(TweenablePose(from), TweenablePose(target), self.duration, self.easing);

        if let Some(config) = self.spring {
            let mut spring = Animated::new(from.scale);
            spring.add_spring(target.scale, config);
            self.scale_spring = Some(spring);
        }
        self.flipped_at = now;
    }

    /// Auto-flip against a scroll threshold, when one is configured.
    pub fn observe_scroll(&mut self, offset: f64, now: f64) {
        if let Some(threshold) = self.scroll_past {
            self.set(offset > threshold, now);
        }
    }

    /// Advances the tween to the given stage time.
    pub fn tick(&mut self, now: f64) {
        let elapsed = (now - self.flipped_at).max(0.0);
        self.anim.update(elapsed);
        if let Some(spring) = &mut self.scale_spring {
            spring.update(elapsed);
        }
    }

    /// Writes the animated channels into the directive.
    pub fn apply(&self, directive: &mut Directive) {
        let pose = self.anim.current_value.0;
        for ch in &self.animated_channels {
            directive.set(*ch, pose.get(*ch));
        }
        if let Some(spring) = &self.scale_spring {
            directive.set(Channel::Scale, spring.current_value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn runtime(spec: serde_json::Value) -> ToggleRuntime {
        let spec: ToggleSpec = serde_json::from_value(spec).unwrap();
        ToggleRuntime::new(&spec)
    }

    #[test]
    fn starts_hidden_and_tweens_to_active() {
        let mut rt = runtime(json!({
            "hidden": { "opacity": 0.0, "y": -8.0 },
            "duration": 0.3
        }));
        assert!(!rt.is_on());

        rt.tick(0.0);
        let mut d = Directive::IDENTITY;
        rt.apply(&mut d);
        assert_eq!(d.opacity, 0.0);
        assert_eq!(d.translate.y, -8.0);

        rt.set(true, 1.0);
        rt.tick(1.4);
        let mut d = Directive::IDENTITY;
        rt.apply(&mut d);
        assert_eq!(d.opacity, 1.0);
        assert_eq!(d.translate.y, 0.0);
    }

    #[test]
    fn flip_mid_transition_starts_from_current_pose() {
        let mut rt = runtime(json!({
            "hidden": { "opacity": 0.0 },
            "duration": 0.4,
            "easing": "linear"
        }));

        rt.set(true, 0.0);
        rt.tick(0.2);
        let mut d = Directive::IDENTITY;
        rt.apply(&mut d);
        let halfway = d.opacity;
        assert!((halfway - 0.5).abs() < 1e-4);

        // Close again halfway through opening: no jump to 1.
        rt.set(false, 0.2);
        rt.tick(0.2);
        let mut d = Directive::IDENTITY;
        rt.apply(&mut d);
        assert!((d.opacity - halfway).abs() < 1e-4);

        rt.tick(0.7);
        let mut d = Directive::IDENTITY;
        rt.apply(&mut d);
        assert_eq!(d.opacity, 0.0);
    }

    #[test]
    fn only_animated_channels_are_written() {
        let rt = runtime(json!({
            "hidden": { "opacity": 0.0 }
        }));

        let mut d = Directive::IDENTITY;
        d.translate.x = 42.0;
        d.scale = 2.0;
        rt.apply(&mut d);

        // Opacity differs between poses, so it is written; the rest of
        // the directive is left to other bindings.
        assert_eq!(d.opacity, 0.0);
        assert_eq!(d.translate.x, 42.0);
        assert_eq!(d.scale, 2.0);
    }

    #[test]
    fn scroll_threshold_drives_the_flip() {
        let mut rt = runtime(json!({
            "hidden": { "opacity": 0.0 },
            "scroll_past": 50.0,
            "duration": 0.5
        }));

        rt.observe_scroll(10.0, 0.0);
        assert!(!rt.is_on());
        rt.observe_scroll(51.0, 0.0);
        assert!(rt.is_on());
        rt.observe_scroll(49.0, 1.0);
        assert!(!rt.is_on());
    }

    #[test]
    fn spring_drives_the_scale_channel() {
        let mut rt = runtime(json!({
            "hidden": { "scale": 1.0 },
            "active": { "scale": 1.15 },
            "spring": { "stiffness": 300.0 }
        }));

        rt.set(true, 0.0);
        rt.tick(10.0);
        let mut d = Directive::IDENTITY;
        rt.apply(&mut d);
        assert!((d.scale - 1.15).abs() < 1e-3);
    }
}

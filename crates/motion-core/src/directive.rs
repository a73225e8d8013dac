use glam::Vec2;
use motion_data::model::{Channel, PoseSpec};

use crate::interp::Interpolatable;

/// The resolved output of one region for one pass: a set of named numeric
/// channels the host rendering layer applies (opacity, transform, filter).
///
/// A directive has no lifecycle of its own. It is recomputed whenever the
/// driving signal changes and the previous value simply persists when no
/// update occurs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Directive {
    pub opacity: f32,
    pub translate: Vec2,
    pub blur: f32,
    pub scale: f32,
    /// Progress-bar fill in percent.
    pub fill: f32,
}

impl Directive {
    /// The resting pose: fully opaque, untransformed, unfiltered.
    pub const IDENTITY: Directive = Directive {
        opacity: 1.0,
        translate: Vec2::ZERO,
        blur: 0.0,
        scale: 1.0,
        fill: 0.0,
    };

    pub fn from_pose(pose: &PoseSpec) -> Self {
        Directive {
            opacity: pose.opacity,
            translate: Vec2::new(pose.x, pose.y),
            blur: pose.blur,
            scale: pose.scale,
            fill: 0.0,
        }
    }

    /// Writes a single channel.
    pub fn set(&mut self, channel: Channel, value: f32) {
        match channel {
            Channel::Opacity => self.opacity = value,
            Channel::TranslateX => self.translate.x = value,
            Channel::TranslateY => self.translate.y = value,
            Channel::Blur => self.blur = value,
            Channel::Scale => self.scale = value,
            Channel::Fill => self.fill = value,
        }
    }

    pub fn get(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Opacity => self.opacity,
            Channel::TranslateX => self.translate.x,
            Channel::TranslateY => self.translate.y,
            Channel::Blur => self.blur,
            Channel::Scale => self.scale,
            Channel::Fill => self.fill,
        }
    }
}

impl Default for Directive {
    fn default() -> Self {
        Directive::IDENTITY
    }
}

impl Interpolatable for Directive {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Directive {
            opacity: Interpolatable::lerp(&self.opacity, &other.opacity, t),
            translate: Interpolatable::lerp(&self.translate, &other.translate, t),
            blur: Interpolatable::lerp(&self.blur, &other.blur, t),
            scale: Interpolatable::lerp(&self.scale, &other.scale, t),
            fill: Interpolatable::lerp(&self.fill, &other.fill, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identity_is_default() {
        assert_eq!(Directive::default(), Directive::IDENTITY);
        assert_eq!(Directive::IDENTITY.opacity, 1.0);
        assert_eq!(Directive::IDENTITY.scale, 1.0);
        assert_eq!(Directive::IDENTITY.translate, Vec2::ZERO);
    }

    #[test]
    fn set_get_roundtrip_all_channels() {
        let channels = [
            Channel::Opacity,
            Channel::TranslateX,
            Channel::TranslateY,
            Channel::Blur,
            Channel::Scale,
            Channel::Fill,
        ];

        let mut d = Directive::IDENTITY;
        for (i, ch) in channels.iter().enumerate() {
            d.set(*ch, i as f32 + 0.25);
        }
        for (i, ch) in channels.iter().enumerate() {
            assert_eq!(d.get(*ch), i as f32 + 0.25);
        }
    }

    #[test]
    fn from_pose_maps_fields() {
        let pose: PoseSpec =
            serde_json::from_value(json!({ "opacity": 0.0, "y": -8.0 })).unwrap();
        let d = Directive::from_pose(&pose);
        assert_eq!(d.opacity, 0.0);
        assert_eq!(d.translate, Vec2::new(0.0, -8.0));
        assert_eq!(d.scale, 1.0);
        assert_eq!(d.fill, 0.0);
    }

    #[test]
    fn lerp_midpoint() {
        let a = Directive {
            opacity: 0.0,
            translate: Vec2::new(60.0, 0.0),
            blur: 10.0,
            scale: 1.0,
            fill: 0.0,
        };
        let mid = a.lerp(&Directive::IDENTITY, 0.5);
        assert_eq!(mid.opacity, 0.5);
        assert_eq!(mid.translate, Vec2::new(30.0, 0.0));
        assert_eq!(mid.blur, 5.0);
    }
}

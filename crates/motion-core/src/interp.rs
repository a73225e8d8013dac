use glam::Vec2;
use motion_data::model::{CurveValue, EasingSpec, Key};

pub trait Interpolatable: Sized + Clone {
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolatable for Vec2 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec2::lerp(*self, *other, t)
    }
}

/// Solves a unit cubic bezier `(0,0) .. p1 .. p2 .. (1,1)` for the given
/// x (time fraction), returning y (progress fraction).
///
/// Newton-Raphson on the x polynomial; eight iterations is plenty for
/// animation tolerances.
pub fn solve_cubic_bezier(p1: Vec2, p2: Vec2, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let mut t = x;
    for _ in 0..8 {
        let one_minus_t = 1.0 - t;
        let x_est = 3.0 * one_minus_t * one_minus_t * t * p1.x
            + 3.0 * one_minus_t * t * t * p2.x
            + t * t * t;

        let err = x_est - x;
        if err.abs() < 1e-4 {
            break;
        }

        let dx_dt = 3.0 * one_minus_t * one_minus_t * p1.x
            + 6.0 * one_minus_t * t * (p2.x - p1.x)
            + 3.0 * t * t * (1.0 - p2.x);

        if dx_dt.abs() < 1e-6 {
            break;
        }
        t -= err / dx_dt;
    }

    let one_minus_t = 1.0 - t;
    3.0 * one_minus_t * one_minus_t * t * p1.y + 3.0 * one_minus_t * t * t * p2.y + t * t * t
}

/// A resolved easing curve, ready to evaluate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    Bezier(Vec2, Vec2),
}

impl From<EasingSpec> for Easing {
    fn from(spec: EasingSpec) -> Self {
        // Named curves use the standard CSS control points.
        match spec {
            EasingSpec::Linear => Easing::Linear,
            EasingSpec::EaseIn => Easing::Bezier(Vec2::new(0.42, 0.0), Vec2::new(1.0, 1.0)),
            EasingSpec::EaseOut => Easing::Bezier(Vec2::new(0.0, 0.0), Vec2::new(0.58, 1.0)),
            EasingSpec::EaseInOut => Easing::Bezier(Vec2::new(0.42, 0.0), Vec2::new(0.58, 1.0)),
            EasingSpec::CubicBezier([x1, y1, x2, y2]) => {
                Easing::Bezier(Vec2::new(x1, y1), Vec2::new(x2, y2))
            }
        }
    }
}

impl Easing {
    pub fn eval(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Bezier(p1, p2) => solve_cubic_bezier(p1, p2, t),
        }
    }
}

/// Samples a piecewise-linear key list at the given progress.
///
/// Inputs outside the keyed range clamp to the first/last value. Keys are
/// expected to be strictly increasing in `at` (enforced by document
/// validation); a zero-width segment resolves to its left value rather
/// than dividing by zero.
pub fn sample(keys: &[Key], progress: f32) -> f32 {
    if keys.is_empty() {
        return 0.0;
    }

    // First key strictly past `progress`; the active segment is idx-1..idx.
    let idx = keys.partition_point(|k| k.at <= progress);

    if idx == 0 {
        return keys[0].value;
    }
    if idx >= keys.len() {
        return keys[keys.len() - 1].value;
    }

    let a = &keys[idx - 1];
    let b = &keys[idx];
    let width = b.at - a.at;
    if width <= 0.0 {
        return a.value;
    }

    let local = (progress - a.at) / width;
    a.value + (b.value - a.value) * local
}

/// Resolves a channel curve at the given progress.
///
/// `fallback` is the identity value of the channel, returned when the
/// document left the curve unset.
pub fn sample_curve(curve: &CurveValue, progress: f32, fallback: f32) -> f32 {
    match curve {
        CurveValue::Default => fallback,
        CurveValue::Static(v) => *v,
        CurveValue::Keyed(keys) => sample(keys, progress),
    }
}

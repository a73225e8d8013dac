//! Resolution engine for motion documents.
//!
//! Everything in this crate is pure state arithmetic: the host supplies
//! scroll offsets, region geometry and elapsed time, and gets back
//! [`Directive`] values. No I/O, no clocks, no host types.

pub mod directive;
pub mod interp;
pub mod progress;
pub mod reveal;
pub mod validate;

pub use directive::Directive;
pub use interp::{sample, sample_curve, solve_cubic_bezier, Easing, Interpolatable};
pub use progress::{visibility_ratio, Span, SpanTracker};
pub use reveal::{RevealState, RevealTween};
pub use validate::{validate, DocError};

/// Host accessibility preferences.
///
/// With `reduced_motion` set, reveals collapse to a short opacity-only
/// fade: no directional offset, no blur, 0.2 s instead of the document
/// durations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionPreferences {
    pub reduced_motion: bool,
}

impl MotionPreferences {
    pub const REDUCED_DURATION: f32 = 0.2;
}

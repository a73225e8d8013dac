//! # Stage Systems
//!
//! Per-binding runtime state driven by the stage's event dispatch.
//! Each system owns the state of one binding kind and writes its own
//! directive channels. The stage composes them in a fixed order
//! (reveal, toggle, track, idle); later writers win on the channels
//! they animate.

pub mod idle;
pub mod reveal;
pub mod scroll;
pub mod toggle;

pub use idle::IdleRuntime;
pub use reveal::RevealRuntime;
pub use scroll::TrackRuntime;
pub use toggle::ToggleRuntime;

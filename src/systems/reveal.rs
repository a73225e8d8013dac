//! Viewport-entry reveal system.
//!
//! Binds a [`motion_core::RevealState`] latch to stage time: the latch
//! flips on a visibility update, the tween then plays out against the
//! stage clock.

use motion_core::{Directive, MotionPreferences, RevealState, RevealTween};
use motion_data::model::RevealSpec;

#[derive(Debug, Clone)]
pub struct RevealRuntime {
    state: RevealState,
    tween: RevealTween,
    revealed_at: Option<f64>,
}

impl RevealRuntime {
    pub fn new(spec: &RevealSpec, prefs: MotionPreferences) -> Self {
        RevealRuntime {
            state: RevealState::new(spec),
            tween: RevealTween::new(spec, prefs),
            revealed_at: None,
        }
    }

    /// Signed pixel margin for the observation viewport.
    pub fn margin(&self) -> f64 {
        f64::from(self.state.margin())
    }

    pub fn has_revealed(&self) -> bool {
        self.state.has_revealed()
    }

    /// Feeds one visibility update at the given stage time.
    pub fn observe(&mut self, visibility_ratio: f32, now: f64) {
        if self.state.update(visibility_ratio) {
            self.revealed_at = Some(now);
        } else if !self.state.has_revealed() {
            // Re-armable reveal left the threshold: back to the initial
            // pose until the next entry.
            self.revealed_at = None;
        }
    }

    /// The region's pose at the given stage time.
    pub fn pose(&self, now: f64) -> Directive {
        match self.revealed_at {
            None => self.tween.initial(),
            Some(t0) => self.tween.pose_at((now - t0) as f32),
        }
    }

    /// True once the entry transition has fully landed.
    pub fn is_settled(&self, now: f64) -> bool {
        match self.revealed_at {
            None => false,
            Some(t0) => self.tween.is_settled((now - t0) as f32),
        }
    }
}

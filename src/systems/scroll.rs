//! Scroll-progress mapping system.
//!
//! Keeps one [`SpanTracker`] per tracked region and resolves the track's
//! channel curves against the current progress. Until the host has
//! supplied region geometry there is no span, and the track leaves the
//! directive untouched.

use kurbo::{Rect, Size};
use motion_core::{sample_curve, Directive, Span, SpanTracker};
use motion_data::model::TrackSpec;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct TrackRuntime {
    spec: TrackSpec,
    tracker: Option<SpanTracker>,
}

impl TrackRuntime {
    pub fn new(spec: &TrackSpec) -> Self {
        TrackRuntime {
            spec: spec.clone(),
            tracker: None,
        }
    }

    /// Recomputes the scroll span from fresh geometry, preserving the
    /// last seen offset.
    pub fn retarget(&mut self, rect: Rect, viewport: Size) {
        let span = Span::for_region(rect, viewport, &self.spec.offset);
        if span.start == span.end {
            warn!(
                start = span.start,
                "tracked region has a zero-length scroll span"
            );
        }
        match &mut self.tracker {
            Some(tracker) => tracker.retarget(span),
            None => self.tracker = Some(SpanTracker::new(span)),
        }
    }

    pub fn update(&mut self, raw_offset: f64) {
        if let Some(tracker) = &mut self.tracker {
            tracker.update(raw_offset);
        }
    }

    pub fn progress(&self) -> Option<f64> {
        self.tracker.as_ref().map(SpanTracker::progress)
    }

    /// Writes the track's channels into the directive. A track with no
    /// geometry yet writes nothing.
    pub fn apply(&self, directive: &mut Directive) {
        let Some(tracker) = &self.tracker else {
            return;
        };
        let progress = tracker.progress() as f32;
        for chan in &self.spec.channels {
            let fallback = directive.get(chan.channel);
            directive.set(chan.channel, sample_curve(&chan.keys, progress, fallback));
        }
    }
}

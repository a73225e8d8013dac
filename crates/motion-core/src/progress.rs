use kurbo::{Rect, Size};
use motion_data::model::{Edge, EdgeAnchor, EdgePair};

/// The scroll-offset window of a tracked region: the offsets at which its
/// progress is 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    /// Progress of a raw scroll offset inside this span, clamped to
    /// [0, 1].
    ///
    /// A zero-length span (degenerate tracked region) resolves by
    /// definition: 1 once the offset has reached the span, 0 before it.
    pub fn progress(&self, raw_offset: f64) -> f64 {
        let length = self.end - self.start;
        if length == 0.0 {
            return if raw_offset >= self.start { 1.0 } else { 0.0 };
        }
        ((raw_offset - self.start) / length).clamp(0.0, 1.0)
    }
}

/// Scroll offset at which the anchor's region edge meets its viewport
/// edge, for a region rect in document coordinates.
fn trigger_offset(rect: Rect, viewport: Size, anchor: EdgeAnchor) -> f64 {
    let region_pos = match anchor.region {
        Edge::Start => rect.y0,
        Edge::End => rect.y1,
    };
    let viewport_frac = match anchor.viewport {
        Edge::Start => 0.0,
        Edge::End => 1.0,
    };
    region_pos - viewport.height * viewport_frac
}

impl Span {
    pub fn for_region(rect: Rect, viewport: Size, pair: &EdgePair) -> Self {
        Span {
            start: trigger_offset(rect, viewport, pair.start),
            end: trigger_offset(rect, viewport, pair.end),
        }
    }
}

/// Tracks one region's scroll progress across events.
///
/// `update` is a pure function of the raw offset and the current span;
/// feeding the same offset twice yields bit-identical progress.
#[derive(Debug, Clone)]
pub struct SpanTracker {
    span: Span,
    raw_offset: f64,
    progress: f64,
}

impl SpanTracker {
    pub fn new(span: Span) -> Self {
        SpanTracker {
            span,
            raw_offset: 0.0,
            progress: span.progress(0.0),
        }
    }

    /// Replaces the span after a geometry change (resize, relayout) and
    /// recomputes progress from the last seen offset.
    pub fn retarget(&mut self, span: Span) {
        self.span = span;
        self.progress = span.progress(self.raw_offset);
    }

    pub fn update(&mut self, raw_offset: f64) -> f64 {
        self.raw_offset = raw_offset;
        self.progress = self.span.progress(raw_offset);
        self.progress
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }
}

/// Fraction of a region currently inside the margin-adjusted viewport,
/// in [0, 1].
///
/// `margin` follows the observer convention: positive grows the
/// observation viewport (triggers earlier), negative shrinks it
/// (triggers once the region is e.g. 100 px inside).
pub fn visibility_ratio(rect: Rect, viewport: Rect, margin: f64) -> f64 {
    let vp = viewport.inflate(margin, margin);

    let area = rect.area();
    if area == 0.0 {
        // Zero-size region: point containment decides, edges inclusive.
        let inside = rect.x0 >= vp.x0 && rect.x0 <= vp.x1 && rect.y0 >= vp.y0 && rect.y0 <= vp.y1;
        return if inside { 1.0 } else { 0.0 };
    }

    let w = (rect.x1.min(vp.x1) - rect.x0.max(vp.x0)).max(0.0);
    let h = (rect.y1.min(vp.y1) - rect.y0.max(vp.y0)).max(0.0);
    (w * h / area).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use motion_data::model::EdgePair;
    use serde_json::json;

    fn pair(spec: serde_json::Value) -> EdgePair {
        serde_json::from_value(spec).unwrap()
    }

    #[test]
    fn whole_viewport_travel_span() {
        // 600 px tall region starting at y=2000, 800 px viewport.
        let rect = Rect::new(0.0, 2000.0, 1280.0, 2600.0);
        let viewport = Size::new(1280.0, 800.0);
        let span = Span::for_region(rect, viewport, &pair(json!(["start end", "end start"])));

        // Progress 0 when the region top reaches the viewport bottom.
        assert_eq!(span.start, 1200.0);
        // Progress 1 when the region bottom reaches the viewport top.
        assert_eq!(span.end, 2600.0);

        assert_eq!(span.progress(1200.0), 0.0);
        assert_eq!(span.progress(2600.0), 1.0);
        assert_eq!(span.progress(1900.0), 0.5);
    }

    #[test]
    fn sticky_section_span() {
        // The pan section pins at the viewport top and plays while its
        // own height scrolls past.
        let rect = Rect::new(0.0, 3000.0, 1280.0, 5400.0);
        let viewport = Size::new(1280.0, 800.0);
        let span = Span::for_region(rect, viewport, &pair(json!(["start start", "end start"])));

        assert_eq!(span.start, 3000.0);
        assert_eq!(span.end, 5400.0);
    }

    #[test]
    fn progress_clamps_exactly() {
        let span = Span {
            start: 100.0,
            end: 500.0,
        };
        assert_eq!(span.progress(-1e9), 0.0);
        assert_eq!(span.progress(99.999), 0.0);
        assert_eq!(span.progress(500.001), 1.0);
        assert_eq!(span.progress(1e9), 1.0);

        for off in [-50.0, 0.0, 250.0, 499.0, 700.0] {
            let p = span.progress(off);
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn degenerate_span_never_nan() {
        let span = Span {
            start: 300.0,
            end: 300.0,
        };
        assert_eq!(span.progress(299.9), 0.0);
        assert_eq!(span.progress(300.0), 1.0);
        assert_eq!(span.progress(301.0), 1.0);
        assert!(!span.progress(300.0).is_nan());
    }

    #[test]
    fn tracker_is_idempotent() {
        let mut tracker = SpanTracker::new(Span {
            start: 0.0,
            end: 1000.0,
        });
        let a = tracker.update(333.3);
        let b = tracker.update(333.3);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn tracker_retarget_recomputes_from_last_offset() {
        let mut tracker = SpanTracker::new(Span {
            start: 0.0,
            end: 1000.0,
        });
        tracker.update(500.0);
        assert_eq!(tracker.progress(), 0.5);

        tracker.retarget(Span {
            start: 0.0,
            end: 2000.0,
        });
        assert_eq!(tracker.progress(), 0.25);
    }

    #[test]
    fn visibility_full_and_partial() {
        let viewport = Rect::new(0.0, 0.0, 1280.0, 800.0);

        // Fully inside.
        let rect = Rect::new(100.0, 100.0, 300.0, 300.0);
        assert_eq!(visibility_ratio(rect, viewport, 0.0), 1.0);

        // Half scrolled off the top.
        let rect = Rect::new(0.0, -200.0, 1280.0, 200.0);
        assert_eq!(visibility_ratio(rect, viewport, 0.0), 0.5);

        // Entirely below the fold.
        let rect = Rect::new(0.0, 900.0, 1280.0, 1100.0);
        assert_eq!(visibility_ratio(rect, viewport, 0.0), 0.0);
    }

    #[test]
    fn negative_margin_delays_visibility() {
        let viewport = Rect::new(0.0, 0.0, 1280.0, 800.0);
        // Region peeking 50 px above the fold.
        let rect = Rect::new(0.0, 750.0, 1280.0, 950.0);

        assert!(visibility_ratio(rect, viewport, 0.0) > 0.0);
        // Shrinking the observation viewport by 100 px hides it again.
        assert_eq!(visibility_ratio(rect, viewport, -100.0), 0.0);
    }

    #[test]
    fn zero_size_region_is_point_containment() {
        let viewport = Rect::new(0.0, 0.0, 1280.0, 800.0);
        let inside = Rect::new(100.0, 100.0, 100.0, 100.0);
        let outside = Rect::new(100.0, 900.0, 100.0, 900.0);

        assert_eq!(visibility_ratio(inside, viewport, 0.0), 1.0);
        assert_eq!(visibility_ratio(outside, viewport, 0.0), 0.0);
    }
}

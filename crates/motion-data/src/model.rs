use serde::{de::Error as DeError, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A motion document: the declarative description of every animated region
/// on a page. This is the unit a host loads and mounts onto a stage.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MotionDoc {
    #[serde(default)]
    pub name: Option<String>,
    pub regions: Vec<Region>,
}

/// One animated region of the page.
///
/// A region may combine several bindings: a viewport-entry reveal, a
/// scroll-progress track, a host-flipped toggle and an idle loop. Each
/// binding writes its own directive channels.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Region {
    pub name: String,
    #[serde(default)]
    pub reveal: Option<RevealSpec>,
    #[serde(default)]
    pub track: Option<TrackSpec>,
    #[serde(default)]
    pub toggle: Option<ToggleSpec>,
    #[serde(default)]
    pub idle: Option<IdleLoop>,
}

// =============================================================================
// REVEAL
// =============================================================================

/// Direction a region travels from while revealing.
///
/// The offset is applied to the *initial* pose: `Up` means the content
/// starts below its resting position and moves up into place.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
    None,
}

/// Fire-once entry animation for a region.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RevealSpec {
    #[serde(default)]
    pub direction: Direction,
    /// Offset magnitude of the initial pose, in layout units.
    #[serde(default = "default_distance")]
    pub distance: f32,
    /// Blur radius of the initial pose.
    #[serde(default = "default_blur")]
    pub blur: f32,
    /// Transition duration in seconds.
    #[serde(default = "default_duration")]
    pub duration: f32,
    /// Seconds to wait after the trigger before the transition starts.
    #[serde(default)]
    pub delay: f32,
    #[serde(default = "default_reveal_easing")]
    pub easing: EasingSpec,
    /// Latching mode. When false the state re-arms once the region
    /// leaves the threshold again.
    #[serde(default = "default_true")]
    pub once: bool,
    /// Minimum visible fraction required to trigger (0 = any overlap).
    #[serde(default)]
    pub amount: f32,
    /// Signed pixel adjustment of the observation viewport edges.
    /// Negative shrinks the viewport so the trigger fires later.
    #[serde(default)]
    pub margin: f32,
}

impl Default for RevealSpec {
    fn default() -> Self {
        RevealSpec {
            direction: Direction::Up,
            distance: default_distance(),
            blur: default_blur(),
            duration: default_duration(),
            delay: 0.0,
            easing: default_reveal_easing(),
            once: true,
            amount: 0.0,
            margin: 0.0,
        }
    }
}

fn default_distance() -> f32 {
    60.0
}

fn default_blur() -> f32 {
    10.0
}

fn default_duration() -> f32 {
    0.8
}

fn default_true() -> bool {
    true
}

fn default_reveal_easing() -> EasingSpec {
    EasingSpec::CubicBezier([0.25, 0.4, 0.25, 1.0])
}

// =============================================================================
// SCROLL TRACKS
// =============================================================================

/// Scroll-linked animation over a tracked region.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TrackSpec {
    /// Anchor pair defining where progress is 0 and 1.
    #[serde(default)]
    pub offset: EdgePair,
    pub channels: Vec<ChannelSpec>,
}

/// An edge of a region or of the viewport.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Start,
    End,
}

/// One anchor: "this region edge meets that viewport edge".
///
/// Serialized as the two-word form hosts write in documents, e.g.
/// `"start end"` (region start meets viewport end).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeAnchor {
    pub region: Edge,
    pub viewport: Edge,
}

impl Serialize for EdgeAnchor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let word = |e: Edge| match e {
            Edge::Start => "start",
            Edge::End => "end",
        };
        serializer.serialize_str(&format!("{} {}", word(self.region), word(self.viewport)))
    }
}

impl<'de> Deserialize<'de> for EdgeAnchor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let mut parts = s.split_whitespace();
        let region = parse_edge(parts.next()).ok_or_else(|| bad_anchor::<D>(&s))?;
        let viewport = parse_edge(parts.next()).ok_or_else(|| bad_anchor::<D>(&s))?;
        if parts.next().is_some() {
            return Err(bad_anchor::<D>(&s));
        }
        Ok(EdgeAnchor { region, viewport })
    }
}

fn parse_edge(word: Option<&str>) -> Option<Edge> {
    match word {
        Some("start") => Some(Edge::Start),
        Some("end") => Some(Edge::End),
        _ => None,
    }
}

fn bad_anchor<'de, D: Deserializer<'de>>(s: &str) -> D::Error {
    D::Error::custom(format!(
        "invalid edge anchor {s:?}, expected e.g. \"start end\""
    ))
}

/// The `[progress = 0, progress = 1]` anchor pair of a track.
///
/// Serialized as a two-element array: `["start end", "end start"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgePair {
    pub start: EdgeAnchor,
    pub end: EdgeAnchor,
}

impl Default for EdgePair {
    /// The region travels the whole viewport: progress 0 when its start
    /// meets the viewport end, 1 when its end meets the viewport start.
    fn default() -> Self {
        EdgePair {
            start: EdgeAnchor {
                region: Edge::Start,
                viewport: Edge::End,
            },
            end: EdgeAnchor {
                region: Edge::End,
                viewport: Edge::Start,
            },
        }
    }
}

impl Serialize for EdgePair {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [self.start, self.end].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EdgePair {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pair: [EdgeAnchor; 2] = Deserialize::deserialize(deserializer)?;
        Ok(EdgePair {
            start: pair[0],
            end: pair[1],
        })
    }
}

/// A named output channel of a directive.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Opacity,
    TranslateX,
    TranslateY,
    Blur,
    Scale,
    /// Progress-bar fill, in percent.
    Fill,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Opacity => "opacity",
            Channel::TranslateX => "translate_x",
            Channel::TranslateY => "translate_y",
            Channel::Blur => "blur",
            Channel::Scale => "scale",
            Channel::Fill => "fill",
        };
        f.write_str(name)
    }
}

/// One channel of a scroll track and its value curve.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChannelSpec {
    pub channel: Channel,
    #[serde(default)]
    pub keys: CurveValue,
}

/// A control point of a piecewise-linear curve: at `at` (progress in
/// [0, 1]) the channel outputs `value`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Key {
    pub at: f32,
    pub value: f32,
}

/// The value of a channel: absent, constant, or keyed over progress.
///
/// The wire shape is polymorphic (a bare number is a constant, an array
/// of `{at, value}` objects is a keyed curve), so this carries a manual
/// `Deserialize` that probes the JSON shape.
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub enum CurveValue {
    #[default]
    Default,
    Static(f32),
    Keyed(Vec<Key>),
}

impl<'de> Deserialize<'de> for CurveValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = serde_json::Value::deserialize(deserializer)?;

        if v.is_null() {
            return Ok(CurveValue::Default);
        }

        if let Ok(keys) = serde_json::from_value::<Vec<Key>>(v.clone()) {
            return Ok(CurveValue::Keyed(keys));
        }

        if let Ok(val) = serde_json::from_value::<f32>(v.clone()) {
            return Ok(CurveValue::Static(val));
        }

        // Tolerate a bare [at, value] pair list written as arrays.
        if let Ok(pairs) = serde_json::from_value::<Vec<[f32; 2]>>(v) {
            return Ok(CurveValue::Keyed(
                pairs
                    .into_iter()
                    .map(|[at, value]| Key { at, value })
                    .collect(),
            ));
        }

        Ok(CurveValue::Default)
    }
}

// =============================================================================
// EASING
// =============================================================================

/// Easing of a timed transition: a named curve or explicit cubic-bezier
/// control points `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EasingSpec {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier([f32; 4]),
}

impl Default for EasingSpec {
    fn default() -> Self {
        EasingSpec::EaseOut
    }
}

impl Serialize for EasingSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            EasingSpec::Linear => serializer.serialize_str("linear"),
            EasingSpec::EaseIn => serializer.serialize_str("ease_in"),
            EasingSpec::EaseOut => serializer.serialize_str("ease_out"),
            EasingSpec::EaseInOut => serializer.serialize_str("ease_in_out"),
            EasingSpec::CubicBezier(pts) => pts.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for EasingSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = serde_json::Value::deserialize(deserializer)?;

        if let Some(name) = v.as_str() {
            return match name {
                "linear" => Ok(EasingSpec::Linear),
                "ease_in" => Ok(EasingSpec::EaseIn),
                "ease_out" => Ok(EasingSpec::EaseOut),
                "ease_in_out" => Ok(EasingSpec::EaseInOut),
                other => Err(D::Error::custom(format!("unknown easing {other:?}"))),
            };
        }

        if let Ok(pts) = serde_json::from_value::<[f32; 4]>(v) {
            return Ok(EasingSpec::CubicBezier(pts));
        }

        Err(D::Error::custom(
            "easing must be a name or [x1, y1, x2, y2] control points",
        ))
    }
}

// =============================================================================
// TOGGLES & LOOPS
// =============================================================================

/// A directive pose written out literally in a document.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PoseSpec {
    #[serde(default = "default_one")]
    pub opacity: f32,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub blur: f32,
    #[serde(default = "default_one")]
    pub scale: f32,
}

impl Default for PoseSpec {
    fn default() -> Self {
        PoseSpec {
            opacity: 1.0,
            x: 0.0,
            y: 0.0,
            blur: 0.0,
            scale: 1.0,
        }
    }
}

fn default_one() -> f32 {
    1.0
}

/// Two-state enter/exit transition the host (or the scroll position)
/// flips between.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ToggleSpec {
    /// Pose while the toggle is off. On-state is the identity pose
    /// unless `active` overrides it.
    pub hidden: PoseSpec,
    #[serde(default)]
    pub active: PoseSpec,
    #[serde(default = "default_toggle_duration")]
    pub duration: f32,
    #[serde(default = "default_toggle_easing")]
    pub easing: EasingSpec,
    /// Drive the scale channel with a damped spring instead of the
    /// easing curve.
    #[serde(default)]
    pub spring: Option<SpringParams>,
    /// Auto-flip when the scroll offset passes this many pixels.
    #[serde(default)]
    pub scroll_past: Option<f32>,
}

fn default_toggle_duration() -> f32 {
    0.3
}

fn default_toggle_easing() -> EasingSpec {
    EasingSpec::EaseInOut
}

/// Damped spring parameters.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SpringParams {
    #[serde(default = "default_stiffness")]
    pub stiffness: f32,
    #[serde(default = "default_damping")]
    pub damping: f32,
    #[serde(default = "default_one")]
    pub mass: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        SpringParams {
            stiffness: default_stiffness(),
            damping: default_damping(),
            mass: 1.0,
        }
    }
}

fn default_stiffness() -> f32 {
    100.0
}

fn default_damping() -> f32 {
    10.0
}

/// Repeating keyframe loop on a single channel, for ambient motion that
/// runs regardless of scroll position (e.g. a scroll cue bobbing).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IdleLoop {
    pub channel: Channel,
    /// Values visited in order across one cycle; the loop wraps from the
    /// last value back to the first.
    pub values: Vec<f32>,
    /// Seconds per cycle.
    pub duration: f32,
    #[serde(default = "default_idle_easing")]
    pub easing: EasingSpec,
}

fn default_idle_easing() -> EasingSpec {
    EasingSpec::EaseInOut
}

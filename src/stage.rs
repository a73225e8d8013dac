//! # Stage Module
//!
//! Arena-based storage for mounted regions and the event dispatch loop.
//!
//! ## Responsibilities
//! - **Region Storage**: `Vec<Option<StageNode>>` arena with `RegionId`
//!   indices and slot reuse.
//! - **Lifecycle**: mount registers a region, unmount deregisters it
//!   before the next dispatch; remounting replays entry animations.
//! - **Dispatch**: one environment event per pass. The scroll offset,
//!   viewport and clock are read once into a snapshot and every region
//!   recomputes from that snapshot, never from a stale/fresh mix.
//!
//! ## Key Types
//! - `Stage`: the arena container plus the environment snapshot.
//! - `StageNode`: one mounted region's runtime state and last directive.
//! - `EnvEvent`: the discrete environment inputs a host forwards.

use std::collections::HashMap;

use kurbo::{Rect, Size};
use motion_core::{validate, visibility_ratio, Directive, DocError, MotionPreferences};
use motion_data::model::{MotionDoc, Region};
use tracing::{debug, warn};

use crate::systems::{IdleRuntime, RevealRuntime, ToggleRuntime, TrackRuntime};

/// Index into the stage arena.
pub type RegionId = usize;

/// A discrete environment input.
///
/// Every recomputation happens synchronously inside [`Stage::dispatch`];
/// handlers are idempotent with respect to replays of the same input,
/// except for the reveal latch's one-way flip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnvEvent {
    /// The document scroll offset changed.
    Scroll { offset: f64 },
    /// The viewport was resized.
    Resize { viewport: Size },
    /// Animation time advanced by `dt` seconds.
    Tick { dt: f64 },
    /// An external observer reports a region's visibility fraction.
    Visibility { region: RegionId, ratio: f32 },
}

/// One mounted region.
#[derive(Debug, Clone)]
struct StageNode {
    name: String,
    /// Document-space geometry, supplied by the host layout. Regions
    /// without geometry skip geometry-derived updates.
    rect: Option<Rect>,
    reveal: Option<RevealRuntime>,
    track: Option<TrackRuntime>,
    toggle: Option<ToggleRuntime>,
    idle: Option<IdleRuntime>,
    /// The last computed output. Persists unchanged across passes that
    /// do not touch this region.
    directive: Directive,
}

/// The mounted page: every animated region plus the environment snapshot
/// they resolve against.
#[derive(Debug, Clone)]
pub struct Stage {
    /// The arena of all regions. `Option` slots allow removal/recycling.
    nodes: Vec<Option<StageNode>>,
    /// Indices of regions that have been unmounted and can be reused.
    free_indices: Vec<usize>,
    names: HashMap<String, RegionId>,
    scroll_offset: f64,
    viewport: Size,
    clock: f64,
    prefs: MotionPreferences,
}

impl Stage {
    pub fn new(viewport: Size) -> Self {
        Self::with_preferences(viewport, MotionPreferences::default())
    }

    pub fn with_preferences(viewport: Size, prefs: MotionPreferences) -> Self {
        Stage {
            nodes: Vec::new(),
            free_indices: Vec::new(),
            names: HashMap::new(),
            scroll_offset: 0.0,
            viewport,
            clock: 0.0,
            prefs,
        }
    }

    // ============ Lifecycle ============

    /// Mounts one region and returns its ID.
    ///
    /// The region starts in its resolved initial pose (hidden for
    /// reveals, hidden pose for toggles) until events drive it.
    pub fn mount(&mut self, region: &Region) -> RegionId {
        let mut node = StageNode {
            name: region.name.clone(),
            rect: None,
            reveal: region
                .reveal
                .as_ref()
                .map(|spec| RevealRuntime::new(spec, self.prefs)),
            track: region.track.as_ref().map(TrackRuntime::new),
            toggle: region.toggle.as_ref().map(ToggleRuntime::new),
            idle: region.idle.as_ref().map(IdleRuntime::new),
            directive: Directive::IDENTITY,
        };
        recompute(&mut node, self.scroll_offset, self.viewport, self.clock);

        let id = if let Some(id) = self.free_indices.pop() {
            self.nodes[id] = Some(node);
            id
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        };
        self.names.insert(region.name.clone(), id);
        debug!(region = %region.name, id, "mounted region");
        id
    }

    /// Validates a document and mounts every region in order.
    pub fn mount_document(&mut self, doc: &MotionDoc) -> Result<Vec<RegionId>, DocError> {
        validate(doc)?;
        Ok(doc.regions.iter().map(|r| self.mount(r)).collect())
    }

    /// Unmounts a region, discarding all of its state. The slot is freed
    /// before the next dispatch, so no further updates can reach it.
    pub fn unmount(&mut self, id: RegionId) {
        let Some(slot) = self.nodes.get_mut(id) else {
            return;
        };
        if let Some(node) = slot.take() {
            self.names.remove(&node.name);
            self.free_indices.push(id);
            debug!(region = %node.name, id, "unmounted region");
        }
    }

    /// Supplies or updates a region's document-space geometry and
    /// recomputes it against the current snapshot.
    pub fn set_region_rect(&mut self, id: RegionId, rect: Rect) {
        let (scroll, viewport, clock) = self.snapshot();
        match self.nodes.get_mut(id).and_then(|n| n.as_mut()) {
            Some(node) => {
                node.rect = Some(rect);
                if let Some(track) = &mut node.track {
                    track.retarget(rect, viewport);
                }
                recompute(node, scroll, viewport, clock);
            }
            None => warn!(id, "geometry update for unmounted region ignored"),
        }
    }

    // ============ Dispatch ============

    /// Processes one environment event.
    pub fn dispatch(&mut self, event: EnvEvent) {
        match event {
            EnvEvent::Scroll { offset } => {
                self.scroll_offset = offset;
                self.recompute_all();
            }
            EnvEvent::Resize { viewport } => {
                self.viewport = viewport;
                for node in self.nodes.iter_mut().flatten() {
                    if let (Some(track), Some(rect)) = (&mut node.track, node.rect) {
                        track.retarget(rect, viewport);
                    }
                }
                self.recompute_all();
            }
            EnvEvent::Tick { dt } => {
                self.clock += dt;
                self.recompute_all();
            }
            EnvEvent::Visibility { region, ratio } => {
                let (scroll, _, clock) = self.snapshot();
                match self.nodes.get_mut(region).and_then(|n| n.as_mut()) {
                    Some(node) => {
                        if let Some(reveal) = &mut node.reveal {
                            reveal.observe(ratio, clock);
                        }
                        recompute_outputs(node, scroll, clock);
                    }
                    None => warn!(region, "visibility update for unmounted region ignored"),
                }
            }
        }
    }

    fn recompute_all(&mut self) {
        let (scroll, viewport, clock) = self.snapshot();
        for node in self.nodes.iter_mut().flatten() {
            observe_geometry(node, scroll, viewport, clock);
            recompute_outputs(node, scroll, clock);
        }
    }

    /// Reads the environment exactly once per pass.
    fn snapshot(&self) -> (f64, Size, f64) {
        (self.scroll_offset, self.viewport, self.clock)
    }

    // ============ Host controls ============

    /// Manually flips a region's toggle (e.g. the mobile menu button).
    pub fn set_toggle(&mut self, id: RegionId, on: bool) {
        let (scroll, _, clock) = self.snapshot();
        match self.nodes.get_mut(id).and_then(|n| n.as_mut()) {
            Some(node) => {
                if let Some(toggle) = &mut node.toggle {
                    toggle.set(on, clock);
                }
                recompute_outputs(node, scroll, clock);
            }
            None => warn!(id, "toggle for unmounted region ignored"),
        }
    }

    // ============ Queries ============

    pub fn id_of(&self, name: &str) -> Option<RegionId> {
        self.names.get(name).copied()
    }

    /// The last computed directive of a region.
    pub fn directive(&self, id: RegionId) -> Option<Directive> {
        self.node(id).map(|n| n.directive)
    }

    pub fn directive_by_name(&self, name: &str) -> Option<Directive> {
        self.id_of(name).and_then(|id| self.directive(id))
    }

    pub fn has_revealed(&self, id: RegionId) -> Option<bool> {
        self.node(id)?.reveal.as_ref().map(RevealRuntime::has_revealed)
    }

    /// Scroll progress of a tracked region, once geometry is known.
    pub fn progress(&self, id: RegionId) -> Option<f64> {
        self.node(id)?.track.as_ref().and_then(TrackRuntime::progress)
    }

    pub fn toggle_state(&self, id: RegionId) -> Option<bool> {
        self.node(id)?.toggle.as_ref().map(ToggleRuntime::is_on)
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn mounted_count(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    fn node(&self, id: RegionId) -> Option<&StageNode> {
        self.nodes.get(id).and_then(|n| n.as_ref())
    }
}

/// Derives visibility from geometry for regions the host gave a rect,
/// acting as the stage's built-in intersection observer.
fn observe_geometry(node: &mut StageNode, scroll: f64, viewport: Size, clock: f64) {
    let (Some(reveal), Some(rect)) = (&mut node.reveal, node.rect) else {
        return;
    };
    let viewport_rect = Rect::new(0.0, scroll, viewport.width, scroll + viewport.height);
    let ratio = visibility_ratio(rect, viewport_rect, reveal.margin());
    reveal.observe(ratio as f32, clock);
}

/// Recomputes a node's directive from one consistent snapshot.
///
/// Bindings write in a fixed order (reveal, toggle, track, idle) and
/// each writes only the channels it animates, so later bindings win
/// where they genuinely overlap.
fn recompute_outputs(node: &mut StageNode, scroll: f64, clock: f64) {
    let mut directive = Directive::IDENTITY;

    if let Some(reveal) = &node.reveal {
        directive = reveal.pose(clock);
    }
    if let Some(toggle) = &mut node.toggle {
        toggle.observe_scroll(scroll, clock);
        toggle.tick(clock);
        toggle.apply(&mut directive);
    }
    if let Some(track) = &mut node.track {
        track.update(scroll);
        track.apply(&mut directive);
    }
    if let Some(idle) = &mut node.idle {
        idle.tick(clock);
        idle.apply(&mut directive);
    }

    node.directive = directive;
}

fn recompute(node: &mut StageNode, scroll: f64, viewport: Size, clock: f64) {
    observe_geometry(node, scroll, viewport, clock);
    recompute_outputs(node, scroll, clock);
}

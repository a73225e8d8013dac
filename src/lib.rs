//! # choreo-engine
//!
//! A scroll-driven motion engine. Hosts load a declarative [`MotionDoc`]
//! describing how page regions animate (viewport-entry reveals,
//! scroll-progress tracks, toggles, idle loops), mount it on a [`Stage`],
//! forward environment events (scroll, resize, ticks, visibility), and
//! read back per-region [`Directive`] values to apply however they
//! render.
//!
//! The engine is single-threaded and event-driven: every recomputation
//! happens synchronously inside [`Stage::dispatch`] from one consistent
//! environment snapshot. It never touches presentation output itself.
//!
//! ```
//! use choreo_engine::{EnvEvent, Stage};
//! use kurbo::{Rect, Size};
//! use motion_data::model::MotionDoc;
//!
//! let doc: MotionDoc = serde_json::from_str(
//!     r#"{ "regions": [
//!         { "name": "hero", "reveal": { "direction": "up" } }
//!     ] }"#,
//! )
//! .unwrap();
//!
//! let mut stage = Stage::new(Size::new(1280.0, 800.0));
//! let ids = stage.mount_document(&doc).unwrap();
//!
//! stage.set_region_rect(ids[0], Rect::new(0.0, 0.0, 1280.0, 600.0));
//! stage.dispatch(EnvEvent::Tick { dt: 0.8 });
//!
//! let directive = stage.directive(ids[0]).unwrap();
//! assert_eq!(directive.opacity, 1.0);
//! ```

pub mod animation;
pub mod registry;
pub mod stage;
pub mod systems;

pub use motion_core::{Directive, DocError, MotionPreferences};
pub use motion_data::model::MotionDoc;
pub use stage::{EnvEvent, RegionId, Stage};

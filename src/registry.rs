//! # Capability Registry
//!
//! Runtime registry of directive channels, travel directions, easings and
//! binding kinds. This lets hosts and the verifier tool reflect over what
//! the engine can animate without hardcoded manifests.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Metadata about a directive channel.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelInfo {
    pub name: &'static str,
    pub description: &'static str,
    /// Unit the host applies: "factor", "px", "percent".
    pub unit: &'static str,
    /// Channel value when nothing animates it.
    pub identity: f32,
}

/// Metadata about a binding kind.
#[derive(Debug, Clone, Serialize)]
pub struct BindingInfo {
    pub name: &'static str,
    pub description: &'static str,
    /// Channels this binding can write.
    pub channels: Vec<&'static str>,
}

/// Metadata about an easing function.
#[derive(Debug, Clone, Serialize)]
pub struct EasingInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Global capability registry - lazily initialized.
static REGISTRY: OnceLock<CapabilityRegistry> = OnceLock::new();

/// The capability registry containing all engine capabilities.
pub struct CapabilityRegistry {
    pub channels: HashMap<&'static str, ChannelInfo>,
    pub bindings: HashMap<&'static str, BindingInfo>,
    pub directions: Vec<&'static str>,
    pub easings: HashMap<&'static str, EasingInfo>,
}

impl CapabilityRegistry {
    /// Get the global registry instance.
    pub fn global() -> &'static Self {
        REGISTRY.get_or_init(Self::build)
    }

    fn build() -> Self {
        let mut reg = Self {
            channels: HashMap::new(),
            bindings: HashMap::new(),
            directions: vec!["up", "down", "left", "right", "none"],
            easings: HashMap::new(),
        };

        reg.register_builtin_channels();
        reg.register_builtin_bindings();
        reg.register_builtin_easings();

        reg
    }

    fn register_builtin_channels(&mut self) {
        let channels = [
            ChannelInfo {
                name: "opacity",
                description: "Alpha applied to the region",
                unit: "factor",
                identity: 1.0,
            },
            ChannelInfo {
                name: "translate_x",
                description: "Horizontal offset from the resting layout position",
                unit: "px",
                identity: 0.0,
            },
            ChannelInfo {
                name: "translate_y",
                description: "Vertical offset from the resting layout position",
                unit: "px",
                identity: 0.0,
            },
            ChannelInfo {
                name: "blur",
                description: "Gaussian blur radius",
                unit: "px",
                identity: 0.0,
            },
            ChannelInfo {
                name: "scale",
                description: "Uniform scale about the region center",
                unit: "factor",
                identity: 1.0,
            },
            ChannelInfo {
                name: "fill",
                description: "Progress-indicator fill",
                unit: "percent",
                identity: 0.0,
            },
        ];

        for channel in channels {
            self.channels.insert(channel.name, channel);
        }
    }

    fn register_builtin_bindings(&mut self) {
        let bindings = [
            BindingInfo {
                name: "reveal",
                description: "Fire-once viewport-entry transition",
                channels: vec!["opacity", "translate_x", "translate_y", "blur"],
            },
            BindingInfo {
                name: "track",
                description: "Scroll-progress-mapped channel curves",
                channels: vec![
                    "opacity",
                    "translate_x",
                    "translate_y",
                    "blur",
                    "scale",
                    "fill",
                ],
            },
            BindingInfo {
                name: "toggle",
                description: "Two-state enter/exit transition",
                channels: vec!["opacity", "translate_x", "translate_y", "blur", "scale"],
            },
            BindingInfo {
                name: "idle",
                description: "Repeating single-channel loop",
                channels: vec![
                    "opacity",
                    "translate_x",
                    "translate_y",
                    "blur",
                    "scale",
                    "fill",
                ],
            },
        ];

        for binding in bindings {
            self.bindings.insert(binding.name, binding);
        }
    }

    fn register_builtin_easings(&mut self) {
        let easings = [
            ("linear", "Constant speed, no acceleration"),
            ("ease_in", "Start slow, accelerate"),
            ("ease_out", "Start fast, decelerate"),
            ("ease_in_out", "Slow start and end, fast middle"),
            ("cubic_bezier", "Explicit [x1, y1, x2, y2] control points"),
        ];

        for (name, description) in easings {
            self.easings.insert(name, EasingInfo { name, description });
        }
    }
}

// ============ Public API ============

/// List all registered channels.
pub fn list_channels() -> Vec<&'static ChannelInfo> {
    CapabilityRegistry::global().channels.values().collect()
}

/// Get info for a specific channel.
pub fn get_channel(name: &str) -> Option<&'static ChannelInfo> {
    CapabilityRegistry::global().channels.get(name)
}

/// List all registered binding kinds.
pub fn list_bindings() -> Vec<&'static BindingInfo> {
    CapabilityRegistry::global().bindings.values().collect()
}

/// List all registered easings.
pub fn list_easings() -> Vec<&'static EasingInfo> {
    CapabilityRegistry::global().easings.values().collect()
}

/// List the travel directions a reveal accepts.
pub fn list_directions() -> &'static [&'static str] {
    &CapabilityRegistry::global().directions
}

/// Check if a binding kind can write a specific channel.
pub fn binding_writes(binding: &str, channel: &str) -> bool {
    if let Some(info) = CapabilityRegistry::global().bindings.get(binding) {
        info.channels.contains(&channel)
    } else {
        false
    }
}

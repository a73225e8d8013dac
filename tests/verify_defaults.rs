//! Verifies the engine's default values: the house reveal pose, toggle
//! timing and registry capabilities a host can rely on without
//! configuring anything.

use choreo_engine::{registry, Directive, EnvEvent, Stage};
use glam::Vec2;
use kurbo::Size;
use motion_data::model::Region;
use serde_json::json;

fn region(v: serde_json::Value) -> Region {
    serde_json::from_value(v).unwrap()
}

fn stage() -> Stage {
    Stage::new(Size::new(1280.0, 800.0))
}

#[test]
fn default_reveal_pose_is_the_house_style() {
    let mut stage = stage();
    let id = stage.mount(&region(json!({ "name": "section", "reveal": {} })));

    // Hidden: transparent, blurred 10 px, displaced 60 px downward
    // (direction defaults to "up": content travels up into place).
    let d = stage.directive(id).unwrap();
    assert_eq!(d.opacity, 0.0);
    assert_eq!(d.blur, 10.0);
    assert_eq!(d.translate, Vec2::new(0.0, 60.0));
    assert_eq!(d.scale, 1.0);
}

#[test]
fn default_reveal_runs_point_eight_seconds() {
    let mut stage = stage();
    let id = stage.mount(&region(json!({ "name": "section", "reveal": {} })));

    stage.dispatch(EnvEvent::Visibility {
        region: id,
        ratio: 1.0,
    });

    stage.dispatch(EnvEvent::Tick { dt: 0.79 });
    assert_ne!(stage.directive(id).unwrap(), Directive::IDENTITY);

    stage.dispatch(EnvEvent::Tick { dt: 0.01 });
    assert_eq!(stage.directive(id).unwrap(), Directive::IDENTITY);
}

#[test]
fn directive_identity_matches_registry_identities() {
    let d = Directive::IDENTITY;
    assert_eq!(
        registry::get_channel("opacity").unwrap().identity,
        d.opacity
    );
    assert_eq!(registry::get_channel("scale").unwrap().identity, d.scale);
    assert_eq!(
        registry::get_channel("translate_x").unwrap().identity,
        d.translate.x
    );
    assert_eq!(
        registry::get_channel("translate_y").unwrap().identity,
        d.translate.y
    );
    assert_eq!(registry::get_channel("blur").unwrap().identity, d.blur);
    assert_eq!(registry::get_channel("fill").unwrap().identity, d.fill);
}

#[test]
fn registry_covers_every_document_direction() {
    let directions = registry::list_directions();
    for dir in ["up", "down", "left", "right", "none"] {
        assert!(directions.contains(&dir), "missing direction {dir}");
    }
}

#[test]
fn toggle_defaults_to_a_short_ease() {
    let mut stage = stage();
    let id = stage.mount(&region(json!({
        "name": "menu",
        "toggle": { "hidden": { "opacity": 0.0 } }
    })));

    assert_eq!(stage.toggle_state(id), Some(false));
    assert_eq!(stage.directive(id).unwrap().opacity, 0.0);

    stage.set_toggle(id, true);
    stage.dispatch(EnvEvent::Tick { dt: 0.35 });
    assert_eq!(stage.directive(id).unwrap().opacity, 1.0);
}

use super::*;
use crate::animation::ease::Ease;
use crate::foundation::core::{Rect, ScrollMetrics};
use crate::host::MemoryHost;
use crate::style::bag::PropertyBag;
use crate::style::property::PropertyKey;

fn page() -> MemoryHost {
    let mut host = MemoryHost::new(400.0, 1000.0, 3000.0);
    host.add_target("hero", Rect::new(0.0, 1200.0, 400.0, 1400.0));
    host.add_target("card", Rect::new(0.0, 200.0, 400.0, 400.0));
    host
}

fn scroll_fade(id: &str, trigger: Trigger) -> Interaction {
    Interaction::new(id, trigger)
        .target("hero")
        .easing(Ease::Linear)
        .from_style(PropertyBag::new().with(PropertyKey::Opacity, 0.0))
        .to_style(PropertyBag::new().with(PropertyKey::Opacity, 100.0))
}

fn id(s: &str) -> InteractionId {
    InteractionId::new(s)
}

#[test]
fn frame_loop_when_native_is_missing() {
    let ctl = InteractionController::mount(
        page(),
        EngineConfig::default(),
        vec![scroll_fade("s", Trigger::PageScroll)],
    );
    assert!(ctl.uses_frame_loop());
    assert_eq!(ctl.scroll_binding(&id("s")), Some(ScrollBinding::FrameLoop));
    assert_eq!(ctl.scroll_loop().len(), 1);
}

#[test]
fn native_path_only_marks_targets() {
    let host = page().with_native_scroll_timeline(true);
    let ctl = InteractionController::mount(
        host,
        EngineConfig::default(),
        vec![scroll_fade("s", Trigger::WhileScrolling)],
    );
    assert_eq!(ctl.scroll_binding(&id("s")), Some(ScrollBinding::Native));
    assert!(ctl.scroll_loop().is_empty());
    let hero = ctl.host().target("hero").unwrap();
    assert_eq!(hero.attribute("data-scroll-interaction"), Some("s"));
    assert!(hero.styles().is_empty());
    assert_eq!(ctl.host().frame_requests(), 0);

    let host = ctl.unmount();
    assert_eq!(host.target("hero").unwrap().attribute("data-scroll-interaction"), None);
}

#[test]
fn nested_container_forces_frame_loop() {
    let mut host = page().with_native_scroll_timeline(true);
    host.add_scroll_container(
        "panel",
        Rect::new(0.0, 0.0, 400.0, 600.0),
        ScrollMetrics {
            offset: 0.0,
            extent: 1800.0,
            viewport: 600.0,
        },
    );
    let mut ctl = InteractionController::new(host, EngineConfig::default())
        .with_scroll_container("panel");
    ctl.set_interactions(vec![scroll_fade("s", Trigger::PageScroll)]);
    assert!(ctl.uses_frame_loop());
    assert_eq!(ctl.scroll_binding(&id("s")), Some(ScrollBinding::FrameLoop));

    ctl.host_mut().target_mut("panel").unwrap().set_scroll_offset(600.0);
    ctl.on_frame();
    assert_eq!(ctl.host().target("hero").unwrap().style("opacity"), Some("0.5"));
}

#[test]
fn forced_frame_loop_overrides_native() {
    let cfg = EngineConfig {
        force_frame_loop: true,
        ..EngineConfig::default()
    };
    let ctl = InteractionController::mount(
        page().with_native_scroll_timeline(true),
        cfg,
        vec![scroll_fade("s", Trigger::PageScroll)],
    );
    assert_eq!(ctl.scroll_binding(&id("s")), Some(ScrollBinding::FrameLoop));
}

#[test]
fn reduced_motion_writes_end_state_once() {
    let mut host = page();
    host.set_reduced_motion(true);
    let appear = Interaction::new("a", Trigger::Appear).target("card");
    let ctl = InteractionController::mount(
        host,
        EngineConfig::default(),
        vec![scroll_fade("s", Trigger::PageScroll), appear],
    );
    assert_eq!(ctl.scroll_binding(&id("s")), Some(ScrollBinding::ReducedMotion));
    assert!(ctl.scroll_loop().is_empty());
    assert_eq!(ctl.host().frame_requests(), 0);
    assert_eq!(ctl.host().target("hero").unwrap().style("opacity"), Some("1"));

    let card = ctl.host().target("card").unwrap();
    assert!(card.has_class("interaction-visible-a"));
    assert_eq!(ctl.host().observer_count(), 0);
    assert_eq!(ctl.appear_state(&id("a"), &TargetId::new("card")), Some(AppearState::Visible));
}

#[test]
fn reduced_motion_can_be_ignored() {
    let mut host = page();
    host.set_reduced_motion(true);
    let cfg = EngineConfig {
        respect_reduced_motion: false,
        ..EngineConfig::default()
    };
    let ctl = InteractionController::mount(host, cfg, vec![scroll_fade("s", Trigger::PageScroll)]);
    assert_eq!(ctl.scroll_binding(&id("s")), Some(ScrollBinding::FrameLoop));
}

#[test]
fn media_change_rebinds() {
    let mut ctl = InteractionController::mount(
        page(),
        EngineConfig::default(),
        vec![scroll_fade("s", Trigger::PageScroll)],
    );
    assert_eq!(ctl.scroll_binding(&id("s")), Some(ScrollBinding::FrameLoop));
    ctl.host_mut().set_reduced_motion(true);
    ctl.on_media_change();
    assert_eq!(ctl.scroll_binding(&id("s")), Some(ScrollBinding::ReducedMotion));
    assert!(ctl.scroll_loop().is_empty());
    assert!(!ctl.scroll_loop().is_running());
}

#[test]
fn load_and_hover_are_acknowledged_only() {
    let ctl = InteractionController::mount(
        page(),
        EngineConfig::default(),
        vec![
            Interaction::new("l", Trigger::Load).target("hero"),
            Interaction::new("h", Trigger::Hover).target("hero"),
        ],
    );
    assert!(ctl.is_wired(&id("l")));
    assert!(ctl.is_wired(&id("h")));
    assert_eq!(ctl.host().click_listener_count(), 0);
    assert_eq!(ctl.host().observer_count(), 0);
    assert!(ctl.scroll_loop().is_empty());
}

#[test]
fn unresolved_targets_are_skipped() {
    let ctl = InteractionController::mount(
        page(),
        EngineConfig::default(),
        vec![
            Interaction::new("c", Trigger::Click).target("ghost"),
            Interaction::new("a", Trigger::Appear).target("ghost"),
            Interaction::new("s", Trigger::PageScroll).target("ghost"),
            Interaction::new("ok", Trigger::Click).target("hero"),
        ],
    );
    assert!(!ctl.is_wired(&id("c")));
    assert!(!ctl.is_wired(&id("a")));
    assert!(!ctl.is_wired(&id("s")));
    assert!(ctl.is_wired(&id("ok")));
}

#[test]
fn root_scopes_resolution() {
    let mut host = MemoryHost::new(400.0, 1000.0, 3000.0);
    host.add_target("section", Rect::new(0.0, 0.0, 400.0, 800.0));
    host.add_child_target("inside", "section", Rect::new(0.0, 0.0, 100.0, 100.0));
    host.add_target("outside", Rect::new(0.0, 900.0, 100.0, 1000.0));
    let mut ctl = InteractionController::new(host, EngineConfig::default()).with_root("section");
    ctl.set_interactions(vec![
        Interaction::new("in", Trigger::Click).target("inside"),
        Interaction::new("out", Trigger::Click).target("outside"),
    ]);
    assert!(ctl.is_wired(&id("in")));
    assert!(!ctl.is_wired(&id("out")));
}

#[test]
fn non_structural_changes_do_not_rewire() {
    let mut ctl = InteractionController::mount(
        page(),
        EngineConfig::default(),
        vec![scroll_fade("s", Trigger::PageScroll)],
    );
    let requests = ctl.host().frame_requests();
    let mut changed = scroll_fade("s", Trigger::PageScroll);
    changed.style_delta = PropertyBag::new().with(PropertyKey::Opacity, 40.0);
    assert!(!ctl.set_interactions(vec![changed]));
    assert_eq!(ctl.host().frame_requests(), requests);

    ctl.host_mut().scroll_page_to(2000.0);
    ctl.on_frame();
    assert_eq!(ctl.host().target("hero").unwrap().style("opacity"), Some("0.4"));

    let moved = scroll_fade("s", Trigger::PageScroll).target("card");
    assert!(ctl.set_interactions(vec![moved]));
    assert_eq!(ctl.scroll_loop().len(), 2);
}

#[test]
fn clicks_on_unknown_interactions_are_ignored() {
    let mut ctl = InteractionController::mount(page(), EngineConfig::default(), Vec::new());
    assert_eq!(ctl.handle_click(&id("nope")), ClickOutcome::Ignored);
    assert!(!ctl.handle_intersection(&id("nope"), &TargetId::new("hero"), true));
}

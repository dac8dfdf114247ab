use pagefx::{
    Ease, EngineConfig, Interaction, InteractionController, InteractionId, MemoryHost, PropertyBag,
    PropertyKey, Rect, RenderTarget, ScrollBinding, Trigger,
};

fn host() -> MemoryHost {
    let mut host = MemoryHost::new(400.0, 1000.0, 3000.0);
    host.add_target("button", Rect::new(0.0, 0.0, 80.0, 40.0));
    host.add_target("drawer", Rect::new(0.0, 40.0, 300.0, 900.0));
    host.add_target("card", Rect::new(0.0, 1500.0, 400.0, 1700.0));
    host.add_target("bar", Rect::new(0.0, 0.0, 400.0, 4.0));
    host
}

fn page_interactions() -> Vec<Interaction> {
    vec![
        Interaction::new("drawer", Trigger::Click)
            .trigger_target("button")
            .target("drawer"),
        Interaction::new("card", Trigger::Appear).target("card"),
        Interaction::new("bar", Trigger::PageScroll)
            .target("bar")
            .easing(Ease::Linear)
            .from_style(PropertyBag::new().with(PropertyKey::ScaleX, 0.0))
            .to_style(PropertyBag::new().with(PropertyKey::ScaleX, 1.0)),
        Interaction::new("intro", Trigger::Load).target("card"),
    ]
}

fn mounted() -> InteractionController<MemoryHost> {
    InteractionController::mount(host(), EngineConfig::default(), page_interactions())
}

fn assert_fully_wired(ctl: &InteractionController<MemoryHost>) {
    assert_eq!(ctl.host().click_listener_count(), 1);
    assert_eq!(ctl.host().observer_count(), 1);
    assert_eq!(ctl.scroll_loop().len(), 1);
    assert!(ctl.scroll_loop().is_running());
    for id in ["drawer", "card", "bar", "intro"] {
        assert!(ctl.is_wired(&InteractionId::new(id)), "{id} not wired");
    }
}

fn assert_unwired(ctl: &InteractionController<MemoryHost>) {
    assert_eq!(ctl.host().click_listener_count(), 0);
    assert_eq!(ctl.host().observer_count(), 0);
    assert!(ctl.scroll_loop().is_empty());
    assert!(!ctl.scroll_loop().is_running());
    for id in ["drawer", "card", "bar", "intro"] {
        assert!(!ctl.is_wired(&InteractionId::new(id)), "{id} still wired");
    }
}

#[test]
fn setup_is_idempotent() {
    let mut ctl = mounted();
    assert_fully_wired(&ctl);
    ctl.setup_all();
    ctl.setup_all();
    assert_fully_wired(&ctl);
}

#[test]
fn cleanup_twice_is_harmless() {
    let mut ctl = mounted();
    ctl.cleanup_all();
    assert_unwired(&ctl);
    let disconnects = ctl.host().disconnects();
    ctl.cleanup_all();
    assert_unwired(&ctl);
    assert_eq!(ctl.host().disconnects(), disconnects);
}

#[test]
fn refresh_restores_full_wiring() {
    let mut ctl = mounted();
    ctl.refresh();
    assert_fully_wired(&ctl);
    ctl.cleanup_all();
    ctl.refresh();
    assert_fully_wired(&ctl);
}

#[test]
fn scroll_loop_survives_many_refreshes_without_duplicates() {
    let mut ctl = mounted();
    for _ in 0..5 {
        ctl.refresh();
    }
    assert_eq!(ctl.scroll_loop().len(), 1);
    assert_eq!(
        ctl.scroll_binding(&InteractionId::new("bar")),
        Some(ScrollBinding::FrameLoop)
    );
}

#[test]
fn unmount_returns_a_clean_host() {
    let mut ctl = mounted();
    ctl.handle_click(&InteractionId::new("drawer"));
    ctl.host_mut().scroll_page_to(1000.0);
    ctl.on_frame();

    let host = ctl.unmount();
    assert_eq!(host.click_listener_count(), 0);
    assert_eq!(host.observer_count(), 0);
    let drawer = host.target("drawer").unwrap();
    assert!(!drawer.has_class("interaction-active-drawer"));
    let bar = host.target("bar").unwrap();
    assert_eq!(bar.attribute("data-scroll-interaction"), None);
    // Written styles are left as they were.
    assert_eq!(bar.style("transform"), Some("scaleX(0.5)"));
}

#[test]
fn emptying_the_interaction_list_unwires_everything() {
    let mut ctl = mounted();
    assert!(ctl.set_interactions(Vec::new()));
    assert_unwired(&ctl);
    assert!(ctl.interactions().is_empty());
}

#[test]
fn appear_state_outlives_cleanup() {
    let mut ctl = mounted();
    let id = InteractionId::new("card");
    let card = pagefx::TargetId::new("card");
    assert!(ctl.handle_intersection(&id, &card, true));
    ctl.cleanup_all();
    ctl.setup_all();
    assert!(!ctl.handle_intersection(&id, &card, true));
    assert!(ctl.host().target("card").unwrap().has_class("interaction-visible-card"));
}

#[test]
fn preset_interaction_keeps_its_3d_components() {
    let flip = Interaction::new("flip", Trigger::PageScroll)
        .target("card")
        .effect_kind("flipX");
    let mut ctl = InteractionController::mount(host(), EngineConfig::default(), vec![flip]);
    ctl.host_mut().scroll_page_to(1000.0);
    ctl.on_frame();

    let card = ctl.host().target("card").unwrap();
    assert_eq!(card.style("opacity"), Some("0.5"));
    assert_eq!(card.style("transform"), Some("perspective(1000px) rotateX(45deg)"));
}

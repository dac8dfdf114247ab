use super::*;
use crate::motion::stagger::StaggerFrom;

fn linear_base(from: PropertyBag, to: PropertyBag) -> EffectBase {
    EffectBase {
        from,
        to,
        easing: Ease::Linear,
        ..EffectBase::default()
    }
}

fn opacity(v: f64) -> PropertyBag {
    PropertyBag::new().with(PropertyKey::Opacity, v)
}

fn num(bag: &PropertyBag, key: PropertyKey) -> f64 {
    bag.numeric(key).unwrap().value
}

fn metrics(offset: f64, extent: f64, viewport: f64) -> ScrollMetrics {
    ScrollMetrics {
        offset,
        extent,
        viewport,
    }
}

#[test]
fn preset_sits_under_explicit_endpoints() {
    let base = EffectBase {
        preset: Some("fadeUp".into()),
        to: opacity(80.0),
        ..EffectBase::default()
    };
    let (from, to) = base.endpoints();
    assert_eq!(num(&from, PropertyKey::Opacity), 0.0);
    assert_eq!(num(&to, PropertyKey::Opacity), 80.0);
    assert_eq!(
        to.get(PropertyKey::TranslateY),
        Some(&PropertyValue::from("0px"))
    );
}

#[test]
fn disabled_effect_samples_empty() {
    let mut base = linear_base(opacity(0.0), opacity(100.0));
    base.enabled = false;
    assert!(base.sample(0.5).is_empty());
    assert!(base.child_sample(0, 3, 0.5).is_empty());
}

#[test]
fn sample_eases_progress() {
    let mut base = linear_base(opacity(0.0), opacity(100.0));
    assert_eq!(num(&base.sample(0.25), PropertyKey::Opacity), 25.0);
    base.easing = Ease::InQuad;
    let lagging = num(&base.sample(0.5), PropertyKey::Opacity);
    assert!(lagging > 0.0 && lagging < 40.0, "{lagging}");
    assert_eq!(num(&base.sample(1.0), PropertyKey::Opacity), 100.0);
}

#[test]
fn keyframes_supersede_endpoints() {
    let mut base = linear_base(opacity(0.0), opacity(100.0));
    base.keyframes = Some(vec![
        Keyframe::new(0.0, opacity(0.0)),
        Keyframe::new(50.0, opacity(100.0)),
        Keyframe::new(100.0, opacity(20.0)),
    ]);
    assert_eq!(num(&base.sample(0.5), PropertyKey::Opacity), 100.0);
    assert_eq!(num(&base.sample(0.75), PropertyKey::Opacity), 60.0);
}

#[test]
fn time_progress_honors_delay() {
    let mut base = linear_base(opacity(0.0), opacity(100.0));
    base.duration = 400.0;
    base.delay = 100.0;
    assert_eq!(base.time_progress(50.0), 0.0);
    assert_eq!(base.time_progress(300.0), 0.5);
    assert_eq!(base.time_progress(900.0), 1.0);
    base.duration = 0.0;
    assert_eq!(base.time_progress(100.0), 1.0);
}

#[test]
fn children_run_behind_by_stagger() {
    let mut base = linear_base(opacity(0.0), opacity(100.0));
    base.duration = 1000.0;
    base.apply_to_children = true;
    base.stagger = Some(StaggerPolicy::linear(100.0, StaggerFrom::First));
    assert_eq!(num(&base.child_sample(0, 5, 0.5), PropertyKey::Opacity), 50.0);
    assert!((num(&base.child_sample(2, 5, 0.5), PropertyKey::Opacity) - 30.0).abs() < 1e-9);

    base.apply_to_children = false;
    assert_eq!(num(&base.child_sample(2, 5, 0.5), PropertyKey::Opacity), 50.0);
}

#[test]
fn child_override_is_merged_on_top() {
    let mut base = linear_base(opacity(0.0), opacity(100.0));
    base.child_overrides = vec![ChildOverride {
        index: 1,
        style: PropertyBag::new().with(PropertyKey::Scale, 1.2),
    }];
    let styled = base.child_sample(1, 3, 1.0);
    assert_eq!(num(&styled, PropertyKey::Scale), 1.2);
    assert_eq!(num(&styled, PropertyKey::Opacity), 100.0);
    assert!(!base.child_sample(0, 3, 1.0).contains(PropertyKey::Scale));
}

#[test]
fn renderable_carries_origin_perspective_and_hints() {
    let mut base = linear_base(
        PropertyBag::new().with(PropertyKey::RotateY, 90.0),
        PropertyBag::new().with(PropertyKey::RotateY, 0.0),
    );
    base.perspective = Some(800.0);
    base.transform_origin = Some("left center".into());
    base.will_change = true;
    let style = base.renderable(0.0, RenderOpts::default());
    assert_eq!(
        style.transform.as_ref().map(ToString::to_string).as_deref(),
        Some("perspective(800px) rotateY(90deg)")
    );
    assert_eq!(style.transform_origin.as_deref(), Some("left center"));
    assert_eq!(style.will_change.as_deref(), Some("transform"));
}

#[test]
fn parallax_and_horizontal_travel() {
    let effect = ScrollEffect {
        parallax: Some(Parallax {
            speed: 0.5,
            axis: Axis::Y,
        }),
        ..ScrollEffect::default()
    };
    let bag = effect.sample_scroll(1.0, metrics(0.0, 2000.0, 1000.0));
    assert_eq!(
        bag.get(PropertyKey::TranslateY),
        Some(&PropertyValue::from("-50px"))
    );

    let horizontal = ScrollEffect {
        horizontal: true,
        ..ScrollEffect::default()
    };
    let bag = horizontal.sample_scroll(0.5, metrics(0.0, 3000.0, 1000.0));
    assert_eq!(
        bag.get(PropertyKey::TranslateX),
        Some(&PropertyValue::from("-1000px"))
    );
}

#[test]
fn scroll_range_and_scrub() {
    let mut effect = ScrollEffect {
        range: ScrollRange {
            start: 20.0,
            end: 80.0,
            relative_to: RelativeTo::Page,
        },
        ..ScrollEffect::default()
    };
    assert!((effect.progress(0.5) - 0.5).abs() < 1e-9);
    assert_eq!(effect.progress(0.1), 0.0);

    effect.scrub = false;
    assert_eq!(effect.progress(0.4), 0.0);
    assert_eq!(effect.progress(0.6), 1.0);
    effect.trigger_point = TriggerPoint::Top;
    assert_eq!(effect.progress(0.0), 1.0);
}

#[test]
fn progress_source_follows_relative_to() {
    let sources = ScrollSources {
        page: metrics(250.0, 2000.0, 1000.0),
        viewport: Rect::new(0.0, 0.0, 400.0, 1000.0),
        element: Rect::new(0.0, 400.0, 400.0, 600.0),
        parent: Some(Rect::new(0.0, 300.0, 400.0, 700.0)),
    };
    let mut effect = ScrollEffect::default();
    assert_eq!(effect.raw_progress(&sources), 0.25);
    effect.range.relative_to = RelativeTo::Element;
    assert_eq!(effect.raw_progress(&sources), 0.5);
    effect.range.relative_to = RelativeTo::Parent;
    assert_eq!(effect.raw_progress(&sources), 0.5);
    let no_parent = ScrollSources {
        parent: None,
        element: Rect::new(0.0, 700.0, 400.0, 900.0),
        ..sources
    };
    assert!((effect.raw_progress(&no_parent) - 0.2).abs() < 1e-9);
}

#[test]
fn smoothing_moves_part_of_the_way() {
    let effect = ScrollEffect {
        smoothing: 0.75,
        ..ScrollEffect::default()
    };
    assert!((effect.smoothed(0.0, 1.0) - 0.25).abs() < 1e-9);
    assert_eq!(ScrollEffect::default().smoothed(0.0, 0.6), 0.6);
}

#[test]
fn pin_spacing_and_trigger_offset() {
    let mut effect = ScrollEffect {
        pin: Some(Pin {
            duration: 300.0,
            spacing: true,
        }),
        trigger_point: TriggerPoint::Bottom,
        ..ScrollEffect::default()
    };
    assert_eq!(effect.pin_spacing(), 300.0);
    assert_eq!(effect.trigger_offset(), 1.0);
    effect.pin = Some(Pin {
        duration: 300.0,
        spacing: false,
    });
    assert_eq!(effect.pin_spacing(), 0.0);
}

#[test]
fn appear_observer_defaults() {
    let appear = AppearEffect::default();
    let opts = appear.observer_options(None);
    assert_eq!(opts.threshold, 0.1);
    assert_eq!(opts.root_margin, "0px 0px -50px 0px");
    assert!(appear.once);
}

#[test]
fn loop_progress_modes() {
    let mut l = LoopEffect::default();
    l.base.duration = 1000.0;
    assert_eq!(l.progress_at(250.0), 0.25);
    assert_eq!(l.progress_at(1250.0), 0.25);

    l.reverse = true;
    assert_eq!(l.progress_at(1500.0), 0.5);
    assert_eq!(l.progress_at(1750.0), 0.25);

    l.repeat = false;
    assert_eq!(l.progress_at(5000.0), 0.0);
    l.reverse = false;
    assert_eq!(l.progress_at(5000.0), 1.0);
    assert_eq!(l.progress_at(-10.0), 0.0);
}

#[test]
fn effect_json_is_tagged_by_kind() {
    let json = r#"{
        "kind": "scroll",
        "preset": "fade",
        "duration": 800,
        "easing": "easeOutCubic",
        "range": { "start": 10, "end": 90, "relativeTo": "self" },
        "parallax": { "speed": 0.3 }
    }"#;
    let effect = Effect::from_json_str(json).unwrap();
    let Effect::Scroll(scroll) = &effect else {
        panic!("expected scroll effect, got {}", effect.kind_name());
    };
    assert_eq!(scroll.range.relative_to, RelativeTo::Element);
    assert_eq!(scroll.parallax.unwrap().axis, Axis::Y);
    assert!(scroll.scrub);
    assert_eq!(effect.base().easing, Ease::OutCubic);
    assert_eq!(effect.base().duration, 800.0);

    let looped: Effect =
        serde_json::from_str(r#"{ "kind": "loop", "loop": false, "reverse": true }"#).unwrap();
    let Effect::Loop(l) = looped else {
        panic!("expected loop effect");
    };
    assert!(!l.repeat);
    assert!(l.reverse);
}

#[test]
fn validation_catches_bad_values() {
    let bad_smoothing = Effect::Scroll(ScrollEffect {
        smoothing: 1.0,
        ..ScrollEffect::default()
    });
    assert!(bad_smoothing.validate().is_err());

    let mut base = EffectBase::default();
    base.keyframes = Some(vec![
        Keyframe::new(60.0, PropertyBag::new()),
        Keyframe::new(10.0, PropertyBag::new()),
    ]);
    assert!(Effect::Hover(HoverEffect { base }).validate().is_err());

    let threshold = Effect::Appear(AppearEffect {
        threshold: 1.5,
        ..AppearEffect::default()
    });
    assert!(threshold.validate().is_err());
    assert!(Effect::Loop(LoopEffect::default()).validate().is_ok());
}

use super::*;

fn bag(entries: &[(PropertyKey, PropertyValue)]) -> PropertyBag {
    entries.iter().cloned().collect()
}

fn num(bag: &PropertyBag, key: PropertyKey) -> f64 {
    bag.numeric(key).unwrap().value
}

#[test]
fn opacity_midpoint() {
    let from = bag(&[(PropertyKey::Opacity, 0.0.into())]);
    let to = bag(&[(PropertyKey::Opacity, 100.0.into())]);
    let out = interpolate(&from, &to, 0.5);
    assert_eq!(out, bag(&[(PropertyKey::Opacity, 50.0.into())]));
}

#[test]
fn endpoints_reproduce_inputs() {
    let from = bag(&[
        (PropertyKey::Opacity, 0.0.into()),
        (PropertyKey::TranslateY, "40px".into()),
        (PropertyKey::Rotate, "-10deg".into()),
        (PropertyKey::BackgroundColor, "#000".into()),
    ]);
    let to = bag(&[
        (PropertyKey::Opacity, 100.0.into()),
        (PropertyKey::TranslateY, "0px".into()),
        (PropertyKey::Rotate, "20deg".into()),
        (PropertyKey::BackgroundColor, "#fff".into()),
    ]);

    let start = interpolate(&from, &to, 0.0);
    let end = interpolate(&from, &to, 1.0);
    for key in [PropertyKey::Opacity, PropertyKey::TranslateY, PropertyKey::Rotate] {
        assert!((num(&start, key) - num(&from, key)).abs() < 1e-9, "{key}");
        assert!((num(&end, key) - num(&to, key)).abs() < 1e-9, "{key}");
    }
    assert_eq!(start.get(PropertyKey::BackgroundColor), from.get(PropertyKey::BackgroundColor));
    assert_eq!(end.get(PropertyKey::BackgroundColor), to.get(PropertyKey::BackgroundColor));
}

#[test]
fn progress_is_clamped() {
    let from = bag(&[(PropertyKey::Width, "100px".into())]);
    let to = bag(&[(PropertyKey::Width, "200px".into())]);
    assert_eq!(num(&interpolate(&from, &to, -1.0), PropertyKey::Width), 100.0);
    assert_eq!(num(&interpolate(&from, &to, 4.0), PropertyKey::Width), 200.0);
}

#[test]
fn unit_prefers_to_side() {
    let from = bag(&[(PropertyKey::TranslateX, 0.0.into())]);
    let to = bag(&[(PropertyKey::TranslateX, "10vw".into())]);
    let out = interpolate(&from, &to, 0.5);
    assert_eq!(out.get(PropertyKey::TranslateX), Some(&PropertyValue::Text("5vw".into())));

    let from = bag(&[(PropertyKey::TranslateX, "10rem".into())]);
    let to = bag(&[(PropertyKey::TranslateX, 0.0.into())]);
    let out = interpolate(&from, &to, 0.5);
    assert_eq!(out.get(PropertyKey::TranslateX), Some(&PropertyValue::Text("5rem".into())));
}

#[test]
fn one_sided_keys_without_neutral_snap() {
    let from = PropertyBag::new();
    let to = bag(&[(PropertyKey::TranslateY, "30px".into())]);
    for p in [0.0, 0.3, 1.0] {
        let out = interpolate(&from, &to, p);
        assert_eq!(out.get(PropertyKey::TranslateY), Some(&PropertyValue::Text("30px".into())));
    }
}

#[test]
fn one_sided_opacity_scale_rotate_use_neutral_base() {
    let from = bag(&[
        (PropertyKey::Opacity, 0.0.into()),
        (PropertyKey::Scale, 0.5.into()),
    ]);
    let to = bag(&[(PropertyKey::Rotate, "90deg".into())]);
    let out = interpolate(&from, &to, 0.5);
    assert_eq!(num(&out, PropertyKey::Opacity), 50.0);
    assert_eq!(num(&out, PropertyKey::Scale), 0.75);
    assert_eq!(out.get(PropertyKey::Rotate), Some(&PropertyValue::Text("45deg".into())));
}

#[test]
fn colors_switch_at_midpoint() {
    let from = bag(&[(PropertyKey::Color, "red".into())]);
    let to = bag(&[(PropertyKey::Color, "blue".into())]);
    assert_eq!(interpolate(&from, &to, 0.49).get(PropertyKey::Color), Some(&"red".into()));
    assert_eq!(interpolate(&from, &to, 0.5).get(PropertyKey::Color), Some(&"blue".into()));

    let only_to = bag(&[(PropertyKey::Color, "blue".into())]);
    assert_eq!(
        interpolate(&PropertyBag::new(), &only_to, 0.1).get(PropertyKey::Color),
        Some(&"blue".into())
    );
}

#[test]
fn unparseable_numbers_read_as_zero() {
    let from = bag(&[(PropertyKey::Height, "auto".into())]);
    let to = bag(&[(PropertyKey::Height, "100px".into())]);
    let out = interpolate(&from, &to, 0.25);
    assert_eq!(out.get(PropertyKey::Height), Some(&PropertyValue::Text("25px".into())));
}

#[test]
fn interaction_profile_drops_foreign_keys() {
    let from = bag(&[
        (PropertyKey::Opacity, 0.0.into()),
        (PropertyKey::MarginTop, "0px".into()),
    ]);
    let to = bag(&[
        (PropertyKey::Opacity, 100.0.into()),
        (PropertyKey::MarginTop, "20px".into()),
    ]);
    let out = interpolate_with(Profile::Interaction, &from, &to, 0.5);
    assert!(out.contains(PropertyKey::Opacity));
    assert!(!out.contains(PropertyKey::MarginTop));
}

fn timeline() -> Vec<Keyframe> {
    vec![
        Keyframe::new(0.0, bag(&[(PropertyKey::Opacity, 0.0.into())])),
        Keyframe {
            offset: 50.0,
            easing: Some(Ease::Linear),
            props: bag(&[(PropertyKey::Opacity, 80.0.into())]),
        },
        Keyframe::new(100.0, bag(&[(PropertyKey::Opacity, 100.0.into())])),
    ]
}

#[test]
fn keyframes_pick_the_bracketing_segment() {
    let keys = timeline();
    let at = |p| {
        let out = sample_keyframes(Profile::Effect, &keys, Ease::Linear, p);
        num(&out, PropertyKey::Opacity)
    };
    assert_eq!(at(0.0), 0.0);
    assert_eq!(at(0.25), 40.0);
    assert_eq!(at(0.5), 80.0);
    assert_eq!(at(0.75), 90.0);
    assert_eq!(at(1.0), 100.0);
}

#[test]
fn keyframes_hold_outside_covered_range() {
    let keys = vec![
        Keyframe::new(20.0, bag(&[(PropertyKey::Opacity, 10.0.into())])),
        Keyframe::new(80.0, bag(&[(PropertyKey::Opacity, 70.0.into())])),
    ];
    let at = |p| {
        let out = sample_keyframes(Profile::Effect, &keys, Ease::Linear, p);
        num(&out, PropertyKey::Opacity)
    };
    assert_eq!(at(0.1), 10.0);
    assert_eq!(at(0.9), 70.0);
    assert!((at(0.5) - 40.0).abs() < 1e-9);
}

#[test]
fn keyframe_segment_easing_overrides_effect_easing() {
    let mut keys = timeline();
    keys[0].easing = Some(Ease::InQuad);
    let eased = sample_keyframes(Profile::Effect, &keys, Ease::Linear, 0.25);
    // InQuad at 0.5 stays below the linear midpoint of the first segment.
    assert!(num(&eased, PropertyKey::Opacity) < 40.0);
}

#[test]
fn empty_timeline_is_empty_bag() {
    assert!(sample_keyframes(Profile::Effect, &[], Ease::Linear, 0.5).is_empty());
}

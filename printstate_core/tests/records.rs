use printstate_core::{Axis, PositionRecord, TemperaturePair, TemperatureRecord};
use rstest::rstest;
use std::collections::BTreeMap;

// ── Temperature ──────────────────────────────────────────────────────────────

#[rstest]
fn temperature_partial_update_keeps_target() {
    let mut rec = TemperatureRecord::new();
    rec.set_tool(0, Some(201.3), Some(210.0));
    rec.set_tool(0, Some(202.0), None);
    assert_eq!(
        rec.tools()[&0],
        TemperaturePair::new(Some(202.0), Some(210.0))
    );
}

#[rstest]
fn unset_update_still_creates_entry() {
    let mut rec = TemperatureRecord::new();
    assert_eq!(rec.tool(3), None);
    rec.set_tool(3, None, None);
    assert_eq!(rec.tool(3), Some(TemperaturePair::UNSET));
}

#[rstest]
#[case(Some(60.0), None, TemperaturePair::new(Some(60.0), Some(70.0)))]
#[case(None, Some(0.0), TemperaturePair::new(Some(55.0), Some(0.0)))]
#[case(None, None, TemperaturePair::new(Some(55.0), Some(70.0)))]
#[case(Some(61.0), Some(80.0), TemperaturePair::new(Some(61.0), Some(80.0)))]
fn bed_merge(
    #[case] actual: Option<f64>,
    #[case] target: Option<f64>,
    #[case] expected: TemperaturePair,
) {
    let mut rec = TemperatureRecord::new();
    rec.set_bed(Some(55.0), Some(70.0));
    rec.set_bed(actual, target);
    assert_eq!(rec.bed(), expected);
}

#[rstest]
fn tools_snapshot_is_independent() {
    let mut rec = TemperatureRecord::new();
    rec.set_tool(0, Some(20.0), Some(0.0));

    let mut snapshot = rec.tools();
    snapshot.insert(1, TemperaturePair::new(Some(1.0), Some(1.0)));
    snapshot.get_mut(&0).unwrap().actual = Some(999.0);

    assert_eq!(rec.tools().len(), 1);
    assert_eq!(rec.tool(0).unwrap().actual, Some(20.0));

    // producer keeps mutating while the consumer holds the snapshot
    let held = rec.tools();
    rec.set_tool(0, Some(25.0), None);
    assert_eq!(held[&0].actual, Some(20.0));
}

#[rstest]
fn chamber_script_dict() {
    let mut rec = TemperatureRecord::new();
    rec.set_chamber(Some(45.0), None);
    let dict = rec.as_script_dict();
    assert_eq!(dict["c"], TemperaturePair::new(Some(45.0), None));
    assert_eq!(dict["chamber"], TemperaturePair::new(Some(45.0), None));
}

#[rstest]
fn script_dict_carries_long_and_short_keys() {
    let mut rec = TemperatureRecord::new();
    rec.set_tool(0, Some(200.0), Some(210.0));
    rec.set_tool(1, Some(30.0), None);
    rec.set_bed(Some(60.0), Some(60.0));

    let long = rec.as_dict();
    let keys: Vec<&str> = long.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["bed", "chamber", "tool0", "tool1"]);

    let script = rec.as_script_dict();
    let keys: Vec<&str> = script.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["0", "1", "b", "bed", "c", "chamber", "tool0", "tool1"]
    );
    assert_eq!(script["0"], script["tool0"]);
    assert_eq!(script["b"], TemperaturePair::new(Some(60.0), Some(60.0)));
}

#[rstest]
fn copy_from_replaces_everything() {
    let mut a = TemperatureRecord::new();
    a.set_tool(0, Some(1.0), Some(1.0));
    a.set_tool(5, Some(5.0), Some(5.0));
    a.set_chamber(Some(40.0), None);

    let mut b = TemperatureRecord::new();
    b.set_tool(1, Some(210.0), Some(215.0));
    b.set_bed(Some(60.0), None);

    a.copy_from(&b);
    assert_eq!(a, b);
    assert_eq!(a.tool(0), None);
    assert_eq!(a.chamber(), TemperaturePair::UNSET);

    // the copy does not alias
    b.set_tool(1, Some(0.0), None);
    assert_eq!(a.tool(1).unwrap().actual, Some(210.0));
}

#[rstest]
fn pairs_serialize_with_null_for_unset() {
    let mut rec = TemperatureRecord::new();
    rec.set_tool(0, Some(200.5), None);
    let v = serde_json::to_value(rec.as_script_dict()).unwrap();
    assert_eq!(v["tool0"]["actual"], 200.5);
    assert!(v["tool0"]["target"].is_null());
    assert!(v["b"]["actual"].is_null());
}

// ── Position ─────────────────────────────────────────────────────────────────

fn dict(pairs: &[(&str, Option<f64>)]) -> BTreeMap<String, Option<f64>> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[rstest]
fn as_dict_regular() {
    let pos = PositionRecord::from_pairs([
        ("x", Some(1.0)),
        ("y", Some(2.0)),
        ("z", Some(3.0)),
        ("e", Some(4.0)),
    ]);
    assert_eq!(
        pos.as_dict(),
        dict(&[
            ("x", Some(1.0)),
            ("y", Some(2.0)),
            ("z", Some(3.0)),
            ("e", Some(4.0)),
            ("f", None),
            ("t", None),
        ])
    );
}

#[rstest]
fn as_dict_extra_e() {
    let pos = PositionRecord::from_pairs([
        ("x", Some(1.0)),
        ("y", Some(2.0)),
        ("z", Some(3.0)),
        ("e0", Some(4.0)),
        ("e1", Some(5.0)),
    ]);
    assert_eq!(
        pos.as_dict(),
        dict(&[
            ("x", Some(1.0)),
            ("y", Some(2.0)),
            ("z", Some(3.0)),
            ("e", None),
            ("f", None),
            ("t", None),
            ("e0", Some(4.0)),
            ("e1", Some(5.0)),
        ])
    );
}

#[rstest]
fn construction_ignores_unknown_keys_and_keeps_unset_extruders() {
    let pos = PositionRecord::from_pairs([("speed", Some(9.0)), ("e2", None), ("ex", Some(1.0))]);
    let d = pos.as_dict();
    assert_eq!(d.len(), 7);
    assert_eq!(d["e2"], None);
    assert_eq!(pos.extruder(2), Some(None));
    assert_eq!(pos.extruder(3), None);
    assert_eq!(pos.get("speed"), None);
    assert_eq!(pos.get("x"), Some(None));
}

#[rstest]
fn copy_from_regular() {
    let src = PositionRecord::from_pairs([
        ("x", Some(1.0)),
        ("y", Some(2.0)),
        ("z", Some(3.0)),
        ("e", Some(4.0)),
    ]);
    let mut dst = PositionRecord::new();
    dst.copy_from(&src);
    assert_eq!(dst.as_dict(), src.as_dict());
    assert_eq!(dst.axis(Axis::E), Some(4.0));
}

#[rstest]
fn copy_from_strips_stray_extruders() {
    let mut a = PositionRecord::from_pairs([
        ("x", Some(2.0)),
        ("e0", Some(8.0)),
        ("e1", Some(10.0)),
        ("e2", Some(12.0)),
    ]);
    let b = PositionRecord::from_pairs([("x", Some(1.0)), ("e0", Some(4.0))]);

    a.copy_from(&b);

    let keys: Vec<String> = a.as_dict().into_keys().collect();
    assert_eq!(keys, vec!["e", "e0", "f", "t", "x", "y", "z"]);
    assert_eq!(a.extruder(0), Some(Some(4.0)));
    assert_eq!(a.extruder(1), None);
    assert_eq!(a.extruder(2), None);
    assert_eq!(a.axis(Axis::X), Some(1.0));
}

#[rstest]
fn copy_from_extra_e_changed() {
    let src = PositionRecord::from_pairs([
        ("x", Some(1.0)),
        ("y", Some(2.0)),
        ("z", Some(3.0)),
        ("e0", Some(4.0)),
        ("e1", Some(5.0)),
    ]);
    let mut dst = PositionRecord::from_pairs([
        ("x", Some(2.0)),
        ("y", Some(4.0)),
        ("z", Some(6.0)),
        ("e0", Some(8.0)),
        ("e1", Some(10.0)),
        ("e2", Some(12.0)),
    ]);
    dst.copy_from(&src);
    assert_eq!(dst.as_dict(), src.as_dict());
}

#[rstest]
fn fixed_axes_survive_copy_from_empty() {
    let mut a = PositionRecord::from_pairs([("x", Some(5.0)), ("e3", Some(1.0))]);
    a.copy_from(&PositionRecord::new());
    assert_eq!(a, PositionRecord::new());
    assert_eq!(a.as_dict().len(), 6);
}

#[rstest]
#[case("e01", Some(1))]
#[case("e10", Some(10))]
#[case("e", None)]
#[case("e-1", None)]
#[case("e1.5", None)]
fn generic_set_applies_key_rule(#[case] key: &str, #[case] idx: Option<usize>) {
    let mut pos = PositionRecord::new();
    pos.set(key, Some(1.0));
    assert_eq!(pos.extruder_indices().collect::<Vec<_>>(), idx.into_iter().collect::<Vec<_>>());
}

#[rstest]
fn leading_zero_extruder_keys_collapse_to_the_index() {
    let pos = PositionRecord::from_pairs([("e01", Some(2.0)), ("e1", Some(3.0))]);
    let dict = pos.as_dict();
    assert_eq!(dict.get("e1"), Some(&Some(3.0)));
    assert!(!dict.contains_key("e01"));
    assert_eq!(dict.len(), 7);
    assert_eq!(pos.get("e01"), Some(Some(3.0)));

    let only = PositionRecord::from_pairs([("e01", Some(2.0))]);
    assert_eq!(only.as_dict().get("e1"), Some(&Some(2.0)));
}

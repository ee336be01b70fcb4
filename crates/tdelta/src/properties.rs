use proptest::prelude::*;

use crate::{apply_patch, diff, verify_round_trip, ArrayOp, DiffValue, Operation, Patch, Patcher};

fn arb_scalar() -> impl Strategy<Value = DiffValue> {
    prop_oneof![
        Just(DiffValue::Null),
        any::<bool>().prop_map(DiffValue::Bool),
        (-50i32..50).prop_map(DiffValue::from),
        (-1.0e6f64..1.0e6).prop_map(DiffValue::Number),
        "[a-c]{0,3}".prop_map(DiffValue::String),
    ]
}

fn arb_value() -> impl Strategy<Value = DiffValue> {
    arb_scalar().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(DiffValue::Array),
            prop::collection::btree_map("[a-e]", inner, 0..6).prop_map(DiffValue::Object),
        ]
    })
}

/// Two values that often share structure, so diffs recurse instead of
/// replacing at the root.
fn arb_pair() -> impl Strategy<Value = (DiffValue, DiffValue)> {
    prop_oneof![
        (arb_value(), arb_value()),
        (
            prop::collection::btree_map("[a-e]", arb_value(), 0..6),
            prop::collection::btree_map("[a-e]", arb_value(), 0..6),
            prop::collection::btree_map("[a-e]", arb_value(), 0..4),
        )
            .prop_map(|(shared, only_base, only_target)| {
                let mut base = shared.clone();
                base.extend(only_base);
                let mut target = shared;
                target.extend(only_target);
                (DiffValue::Object(base), DiffValue::Object(target))
            }),
        (
            prop::collection::vec(arb_value(), 0..6),
            prop::collection::vec(arb_value(), 0..6),
        )
            .prop_map(|(base, target)| {
                let mut extended = base.clone();
                extended.extend(target);
                (DiffValue::Array(base), DiffValue::Array(extended))
            }),
    ]
}

/// Renders `value` as JSON text with every object's members written in
/// reverse sorted order.
fn reversed_json_text(value: &DiffValue) -> String {
    match value {
        DiffValue::Object(members) => {
            let fields: Vec<String> = members
                .iter()
                .rev()
                .map(|(name, member)| {
                    format!(
                        "{}:{}",
                        serde_json::to_string(name).unwrap(),
                        reversed_json_text(member)
                    )
                })
                .collect();
            format!("{{{}}}", fields.join(","))
        }
        DiffValue::Array(items) => {
            let items: Vec<String> = items.iter().map(reversed_json_text).collect();
            format!("[{}]", items.join(","))
        }
        scalar => serde_json::to_string(scalar).unwrap(),
    }
}

/// Parses text through `serde_json::Value`, the path documents take when
/// loaded from files.
fn parse_via_json(text: &str) -> DiffValue {
    DiffValue::from(serde_json::from_str::<serde_json::Value>(text).unwrap())
}

fn has_inserts(patch: &Patch) -> bool {
    patch.iter().any(|op| match op {
        Operation::ArrayOps { ops, .. } => ops.iter().any(|a| matches!(a, ArrayOp::Insert { .. })),
        _ => false,
    })
}

proptest! {
    #[test]
    fn replaying_a_diff_reproduces_the_target((base, target) in arb_pair()) {
        let patch = diff(&base, &target);
        prop_assert_eq!(apply_patch(&base, &patch), Some(target.clone()));
        prop_assert!(verify_round_trip(&base, &target));
    }

    #[test]
    fn diff_patches_replay_strictly((base, target) in arb_pair()) {
        let patch = diff(&base, &target);
        prop_assert_eq!(Patcher::strict().apply(&base, &patch), Ok(Some(target)));
    }

    #[test]
    fn diff_against_self_is_empty(value in arb_value()) {
        prop_assert!(diff(&value, &value).is_empty());
        prop_assert_eq!(apply_patch(&value, &Patch::new()), Some(value));
    }

    #[test]
    fn member_order_does_not_matter((base, target) in arb_pair()) {
        // Both orderings go through the same number parsing, so only member
        // order differs between them.
        let sorted = (
            serde_json::to_string(&base).unwrap(),
            serde_json::to_string(&target).unwrap(),
        );
        let reversed = (reversed_json_text(&base), reversed_json_text(&target));

        prop_assert_eq!(
            diff(&parse_via_json(&reversed.0), &parse_via_json(&reversed.1)),
            diff(&parse_via_json(&sorted.0), &parse_via_json(&sorted.1))
        );

        let direct = |text: &str| serde_json::from_str::<DiffValue>(text).unwrap();
        prop_assert_eq!(
            diff(&direct(&reversed.0), &direct(&reversed.1)),
            diff(&direct(&sorted.0), &direct(&sorted.1))
        );
    }

    #[test]
    fn insert_free_diffs_are_idempotent((base, target) in arb_pair()) {
        let patch = diff(&base, &target);
        prop_assume!(!has_inserts(&patch));
        let once = apply_patch(&base, &patch);
        let twice = once.as_ref().and_then(|value| apply_patch(value, &patch));
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn patches_survive_serialization((base, target) in arb_pair()) {
        let patch = diff(&base, &target);
        let encoded = serde_json::to_string(&patch).unwrap();
        let decoded: Patch = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(apply_patch(&base, &decoded), Some(target));
    }
}

//! The diff engine.
//!
//! Traversal runs on an explicit work stack, so input nesting depth is bounded
//! by heap, not by the native call stack. Steps are pushed in reverse so the
//! output order matches a depth-first walk: object members in sorted order,
//! nested element operations before the enclosing array's bundle.

use tdelta_types::{DiffValue, Operation, Patch, Path};
use tracing::debug;

use crate::array::diff_arrays;
use crate::comparator::{ExactComparator, ScalarComparator};
use crate::config::DiffConfig;
use crate::object::diff_objects;

/// Pending work on the diff stack.
pub(crate) enum Step<'a> {
    /// Compare a pair of values located at `path`.
    Compare {
        base: &'a DiffValue,
        target: &'a DiffValue,
        path: Path,
    },
    /// Append an already computed operation.
    Emit(Operation),
}

/// Structural differencer, generic over scalar comparison.
#[derive(Clone, Debug, Default)]
pub struct Differ<C = ExactComparator> {
    comparator: C,
}

impl Differ {
    /// A differ using exact scalar equality.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Differ<Box<dyn ScalarComparator + Send + Sync>> {
    /// A differ using the comparator described by `config`.
    pub fn from_config(config: &DiffConfig) -> Self {
        Self {
            comparator: config.comparator(),
        }
    }
}

impl<C: ScalarComparator> Differ<C> {
    pub fn with_comparator(comparator: C) -> Self {
        Self { comparator }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Compute the patch turning `base` into `target`.
    ///
    /// Neither input is modified. Values in the patch are copies.
    pub fn diff(&self, base: &DiffValue, target: &DiffValue) -> Patch {
        let mut patch = Patch::new();
        let mut stack = vec![Step::Compare {
            base,
            target,
            path: Path::root(),
        }];

        while let Some(step) = stack.pop() {
            match step {
                Step::Emit(operation) => patch.push(operation),
                Step::Compare { base, target, path } => {
                    self.compare(base, target, path, &mut stack)
                }
            }
        }

        debug!(
            operations = patch.len(),
            sets = patch.sets(),
            deletes = patch.deletes(),
            array_bundles = patch.array_bundles(),
            "diff complete"
        );
        patch
    }

    fn compare<'a>(
        &self,
        base: &'a DiffValue,
        target: &'a DiffValue,
        path: Path,
        stack: &mut Vec<Step<'a>>,
    ) {
        let steps = match (base, target) {
            (DiffValue::Object(old), DiffValue::Object(new)) => diff_objects(old, new, &path),
            (DiffValue::Array(old), DiffValue::Array(new)) => {
                diff_arrays(old, new, &path, &self.comparator)
            }
            _ if !base.is_container() && !target.is_container() => {
                if self.comparator.scalars_equal(base, target) {
                    return;
                }
                vec![Step::Emit(Operation::Set {
                    path,
                    value: target.clone(),
                })]
            }
            // Scalar against container, or array against object.
            _ => vec![Step::Emit(Operation::Set {
                path,
                value: target.clone(),
            })],
        };

        stack.extend(steps.into_iter().rev());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::ToleranceComparator;
    use serde_json::json;
    use tdelta_types::{path, ArrayOp};

    fn v(value: serde_json::Value) -> DiffValue {
        DiffValue::from(value)
    }

    fn diff(base: serde_json::Value, target: serde_json::Value) -> Patch {
        Differ::new().diff(&v(base), &v(target))
    }

    #[test]
    fn equal_scalars_produce_empty_patch() {
        assert!(diff(json!(1), json!(1)).is_empty());
        assert!(diff(json!("a"), json!("a")).is_empty());
        assert!(diff(json!(null), json!(null)).is_empty());
    }

    #[test]
    fn unequal_scalars_replace_root() {
        let patch = diff(json!(1), json!("one"));
        assert_eq!(patch, Patch::from(vec![Operation::set(path![], "one")]));
    }

    #[test]
    fn removed_member_is_deleted() {
        let patch = diff(json!({"a": 1}), json!({}));
        assert_eq!(patch, Patch::from(vec![Operation::delete(path!["a"])]));
    }

    #[test]
    fn added_member_is_set() {
        let patch = diff(json!({"a": {}}), json!({"a": {"b": []}}));
        assert_eq!(
            patch,
            Patch::from(vec![Operation::set(path!["a", "b"], DiffValue::empty_array())])
        );
    }

    #[test]
    fn null_member_is_present() {
        assert!(diff(json!({"a": null}), json!({"a": null})).is_empty());
        let patch = diff(json!({"a": null}), json!({}));
        assert_eq!(patch, Patch::from(vec![Operation::delete(path!["a"])]));
        let patch = diff(json!({}), json!({"a": null}));
        assert_eq!(patch, Patch::from(vec![Operation::set(path!["a"], DiffValue::Null)]));
    }

    #[test]
    fn object_members_are_visited_in_sorted_order() {
        let patch = diff(
            json!({"c": 1, "a": 1, "b": 1}),
            json!({"b": 2, "c": 2, "d": 2}),
        );
        let paths: Vec<String> = patch.iter().map(|op| op.path().to_string()).collect();
        assert_eq!(paths, vec!["/a", "/b", "/c", "/d"]);
    }

    #[test]
    fn array_set_and_truncate() {
        let patch = diff(json!([1, 2, 3, 4]), json!([1, 9, 3]));
        assert_eq!(
            patch,
            Patch::from(vec![Operation::array_ops(
                path![],
                vec![
                    ArrayOp::Set {
                        index: 1,
                        value: DiffValue::from(9)
                    },
                    ArrayOp::Delete { index: 3 },
                ]
            )])
        );
    }

    #[test]
    fn array_deletes_descend() {
        let patch = diff(json!([1, 2, 3, 4]), json!([1]));
        assert_eq!(
            patch,
            Patch::from(vec![Operation::array_ops(
                path![],
                vec![
                    ArrayOp::Delete { index: 3 },
                    ArrayOp::Delete { index: 2 },
                    ArrayOp::Delete { index: 1 },
                ]
            )])
        );
    }

    #[test]
    fn array_inserts_ascend() {
        let patch = diff(json!([]), json!(["a", "b"]));
        assert_eq!(
            patch,
            Patch::from(vec![Operation::array_ops(
                path![],
                vec![
                    ArrayOp::Insert {
                        index: 0,
                        value: DiffValue::from("a")
                    },
                    ArrayOp::Insert {
                        index: 1,
                        value: DiffValue::from("b")
                    },
                ]
            )])
        );
    }

    #[test]
    fn nested_element_changes_bypass_the_bundle() {
        let patch = diff(
            json!({"items": [{"a": 1}, {"b": 2}]}),
            json!({"items": [{"a": 1}, {"b": 3}, {"c": 9}]}),
        );
        assert_eq!(
            patch,
            Patch::from(vec![
                Operation::set(path!["items", 1usize, "b"], 3),
                Operation::array_ops(
                    path!["items"],
                    vec![ArrayOp::Insert {
                        index: 2,
                        value: v(json!({"c": 9}))
                    }]
                ),
            ])
        );
    }

    #[test]
    fn unchanged_nested_elements_emit_nothing() {
        assert!(diff(json!([[1, 2], {"a": [3]}]), json!([[1, 2], {"a": [3]}])).is_empty());
    }

    #[test]
    fn element_kind_mismatch_replaces_element() {
        let patch = diff(json!([[1], {"a": 1}, 5]), json!([{"a": 1}, [1], [5]]));
        assert_eq!(
            patch,
            Patch::from(vec![Operation::array_ops(
                path![],
                vec![
                    ArrayOp::Set {
                        index: 0,
                        value: v(json!({"a": 1}))
                    },
                    ArrayOp::Set {
                        index: 1,
                        value: v(json!([1]))
                    },
                    ArrayOp::Set {
                        index: 2,
                        value: v(json!([5]))
                    },
                ]
            )])
        );
    }

    #[test]
    fn reordering_is_replacement() {
        let patch = diff(json!([1, 2]), json!([2, 1]));
        assert_eq!(patch.len(), 1);
        match &patch.operations()[0] {
            Operation::ArrayOps { ops, .. } => assert_eq!(ops.len(), 2),
            other => panic!("expected ArrayOps, got {:?}", other),
        }
    }

    #[test]
    fn container_kind_mismatch_replaces_wholesale() {
        let patch = diff(json!({"a": [1]}), json!({"a": {"0": 1}}));
        assert_eq!(
            patch,
            Patch::from(vec![Operation::set(path!["a"], v(json!({"0": 1})))])
        );
        let patch = diff(json!({"a": 1}), json!({"a": [1]}));
        assert_eq!(patch, Patch::from(vec![Operation::set(path!["a"], v(json!([1])))]));
    }

    #[test]
    fn inputs_are_not_mutated() {
        let base = v(json!({"a": [1, 2], "b": {"c": 1}}));
        let target = v(json!({"a": [2], "d": true}));
        let (base_copy, target_copy) = (base.clone(), target.clone());
        let _ = Differ::new().diff(&base, &target);
        assert_eq!(base, base_copy);
        assert_eq!(target, target_copy);
    }

    #[test]
    fn tolerance_comparator_suppresses_small_changes() {
        let differ = Differ::with_comparator(ToleranceComparator::new(1e-6));
        let base = v(json!({"m": [1.0, 2.0], "s": "x"}));
        let target = v(json!({"m": [1.0000001, 2.0], "s": "x"}));
        assert!(differ.diff(&base, &target).is_empty());
        assert_eq!(Differ::new().diff(&base, &target).len(), 1);
    }

    #[test]
    fn from_config_picks_comparator() {
        let base = v(json!([0.5]));
        let target = v(json!([0.75]));
        assert!(Differ::from_config(&DiffConfig::with_tolerance(0.5))
            .diff(&base, &target)
            .is_empty());
        assert_eq!(
            Differ::from_config(&DiffConfig::exact()).diff(&base, &target).len(),
            1
        );
    }

    #[test]
    fn deep_nesting_does_not_overflow() {
        let depth = 10_000;
        let mut base = DiffValue::from(1);
        let mut target = DiffValue::from(2);
        for _ in 0..depth {
            base = DiffValue::Array(vec![base]);
            target = DiffValue::Array(vec![target]);
        }
        let patch = Differ::new().diff(&base, &target);
        assert_eq!(patch.len(), 1);
        assert_eq!(patch.operations()[0].path().len(), depth - 1);

        // Dropping deeply nested values recurses; unwind them iteratively.
        for value in [base, target] {
            let mut current = value;
            while let DiffValue::Array(mut items) = current {
                current = items.pop().unwrap_or_default();
            }
        }
    }
}

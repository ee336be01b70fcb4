//! Array differencing by positional alignment.
//!
//! Elements are paired by index over the common prefix length. Matching
//! container pairs are compared recursively and their operations land in the
//! outer patch under `path/i/...`; every other change goes into one
//! `ArrayOps` bundle for the array itself.

use tdelta_types::{ArrayOp, DiffValue, Operation, Path};
use tracing::trace;

use crate::comparator::ScalarComparator;
use crate::differ::Step;

pub(crate) fn diff_arrays<'a, C>(
    base: &'a [DiffValue],
    target: &'a [DiffValue],
    path: &Path,
    comparator: &C,
) -> Vec<Step<'a>>
where
    C: ScalarComparator + ?Sized,
{
    let common = base.len().min(target.len());
    let mut steps = Vec::new();
    let mut bundle = Vec::new();

    for (index, (old, new)) in base.iter().zip(target).enumerate() {
        if old.same_container_kind(new) {
            steps.push(Step::Compare {
                base: old,
                target: new,
                path: path.child(index),
            });
        } else if old.is_container() || new.is_container() {
            bundle.push(ArrayOp::Set {
                index,
                value: new.clone(),
            });
        } else if !comparator.scalars_equal(old, new) {
            bundle.push(ArrayOp::Set {
                index,
                value: new.clone(),
            });
        }
    }

    // Appended tail, ascending.
    for (index, value) in target.iter().enumerate().skip(common) {
        bundle.push(ArrayOp::Insert {
            index,
            value: value.clone(),
        });
    }

    // Truncated tail, descending.
    for index in (target.len()..base.len()).rev() {
        bundle.push(ArrayOp::Delete { index });
    }

    if !bundle.is_empty() {
        trace!(path = %path, ops = bundle.len(), "array bundle");
        steps.push(Step::Emit(Operation::ArrayOps {
            path: path.clone(),
            ops: bundle,
        }));
    }

    steps
}

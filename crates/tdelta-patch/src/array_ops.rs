//! Phased replay of `ArrayOps` bundles.
//!
//! The phase order is fixed no matter how the bundle lists its actions:
//!
//! 1. `Set` writes into existing slots.
//! 2. `Insert` runs in listed order, each shifting later elements right.
//! 3. `Delete` runs from the highest index down, so no deletion moves an
//!    element another deletion still addresses.

use tdelta_types::{ArrayOp, DiffValue, Path};
use tracing::trace;

use crate::config::ApplyMode;
use crate::error::{PatchError, PatchResult};

/// Replays `ops` against `items`. `path` locates the array for error reports.
///
/// Lenient mode ignores out-of-range sets and deletes and turns inserts past
/// the end into appends.
pub fn replay_array_ops(
    items: &mut Vec<DiffValue>,
    ops: &[ArrayOp],
    path: &Path,
    mode: ApplyMode,
) -> PatchResult<()> {
    let out_of_bounds = |index: usize, len: usize| PatchError::IndexOutOfBounds {
        path: path.clone(),
        index,
        len,
    };

    for op in ops {
        if let ArrayOp::Set { index, value } = op {
            let len = items.len();
            match items.get_mut(*index) {
                Some(slot) => *slot = value.clone(),
                None if mode == ApplyMode::Strict => return Err(out_of_bounds(*index, len)),
                None => {}
            }
        }
    }

    for op in ops {
        if let ArrayOp::Insert { index, value } = op {
            if *index <= items.len() {
                items.insert(*index, value.clone());
            } else if mode == ApplyMode::Strict {
                return Err(out_of_bounds(*index, items.len()));
            } else {
                items.push(value.clone());
            }
        }
    }

    let mut deletes: Vec<usize> = ops
        .iter()
        .filter_map(|op| match op {
            ArrayOp::Delete { index } => Some(*index),
            _ => None,
        })
        .collect();
    deletes.sort_unstable_by(|a, b| b.cmp(a));

    for index in deletes {
        if index < items.len() {
            items.remove(index);
        } else if mode == ApplyMode::Strict {
            return Err(out_of_bounds(index, items.len()));
        }
    }

    trace!(path = %path, ops = ops.len(), len = items.len(), "array bundle replayed");
    Ok(())
}

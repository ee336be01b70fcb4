//! Tree Delta: structural diff and deterministic patch replay.
//!
//! [`diff`] compares two value trees and returns a [`Patch`];
//! [`apply_patch`] replays that patch against a copy of the base and returns
//! the reconstructed target. Both are pure functions over in-memory values.
//! Storing or transmitting patches is left to the caller; [`Patch`] derives
//! serde so any format works.
//!
//! ```
//! use serde_json::json;
//! use tdelta::{apply_patch, diff, DiffValue};
//!
//! let base = DiffValue::from(json!({"items": [{"a": 1}, {"b": 2}]}));
//! let target = DiffValue::from(json!({"items": [{"a": 1}, {"b": 3}, {"c": 9}]}));
//!
//! let patch = diff(&base, &target);
//! assert_eq!(apply_patch(&base, &patch), Some(target));
//! ```

pub mod engine;
pub mod error;

#[cfg(test)]
mod properties;

pub use engine::{Engine, EngineConfig};
pub use error::{EngineError, EngineResult};

// Re-export key types
pub use tdelta_diff::{DiffConfig, Differ, ExactComparator, ScalarComparator, ToleranceComparator};
pub use tdelta_patch::{ApplyMode, PatchConfig, PatchError, Patcher};
pub use tdelta_types::{path, ArrayOp, DiffValue, Key, Operation, Patch, Path, TypeError, ValueKind};

/// Compute the patch turning `base` into `target`, comparing scalars exactly.
pub fn diff(base: &DiffValue, target: &DiffValue) -> Patch {
    tdelta_diff::diff(base, target)
}

/// Replay `patch` against a copy of `base`, degrading on mismatches.
///
/// `None` means the patch deleted the root.
pub fn apply_patch(base: &DiffValue, patch: &Patch) -> Option<DiffValue> {
    tdelta_patch::apply_patch(base, patch)
}

/// Returns `true` when replaying `diff(base, target)` on `base` reproduces
/// `target`.
pub fn verify_round_trip(base: &DiffValue, target: &DiffValue) -> bool {
    apply_patch(base, &diff(base, target)).as_ref() == Some(target)
}

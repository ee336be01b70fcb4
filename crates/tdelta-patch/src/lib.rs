//! Patch applier for Tree Delta.
//!
//! Replays a [`Patch`] against a copy of a base value. Missing ancestors are
//! created on the way down, and array bundles run in a fixed phase order:
//! sets, then inserts, then deletes from the highest index down.
//!
//! # Key Types
//!
//! - [`Patcher`] -- Replay engine
//! - [`PatchConfig`] / [`ApplyMode`] -- Lenient (degrade) or strict (report) replay
//! - [`PatchError`] -- Mismatches reported in strict mode

pub mod applier;
pub mod array_ops;
pub mod config;
pub mod error;
mod navigate;

pub use applier::Patcher;
pub use config::{ApplyMode, PatchConfig};
pub use error::{PatchError, PatchResult};

use tdelta_types::{DiffValue, Patch};
use tracing::warn;

/// Replay `patch` against a copy of `base` in lenient mode.
///
/// Returns `None` when the patch deletes the root.
pub fn apply_patch(base: &DiffValue, patch: &Patch) -> Option<DiffValue> {
    match Patcher::lenient().apply(base, patch) {
        Ok(result) => result,
        // Lenient replay has no error paths; keep the base rather than
        // reporting a root deletion that never happened.
        Err(err) => {
            warn!(%err, "lenient replay reported an error; returning base unchanged");
            Some(base.clone())
        }
    }
}

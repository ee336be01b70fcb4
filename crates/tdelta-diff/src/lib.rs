//! Differencer for Tree Delta.
//!
//! Compares a base value tree against a target and produces a [`Patch`]
//! that, replayed against the base, reconstructs the target.
//!
//! # Key Types
//!
//! - [`Differ`] -- Diff engine, generic over its scalar comparison
//! - [`ScalarComparator`] / [`ExactComparator`] / [`ToleranceComparator`] -- Scalar equality
//! - [`DiffConfig`] -- Serializable differ settings
//!
//! Arrays are aligned by position only. Reordered elements show up as
//! replacements, never as moves.

mod array;
pub mod comparator;
pub mod config;
pub mod differ;
mod object;

pub use comparator::{ExactComparator, ScalarComparator, ToleranceComparator};
pub use config::DiffConfig;
pub use differ::Differ;

use tdelta_types::{DiffValue, Patch};

/// Diff two values using exact scalar comparison.
pub fn diff(base: &DiffValue, target: &DiffValue) -> Patch {
    Differ::new().diff(base, target)
}

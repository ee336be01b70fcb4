//! Value model for Tree Delta.
//!
//! This crate provides the tree-shaped value domain that the differencer and
//! the patch applier operate over, plus the patch data structures exchanged
//! between them. Every other Tree Delta crate depends on `tdelta-types`.
//!
//! # Key Types
//!
//! - [`DiffValue`] — Null / bool / number / string / array / object
//! - [`Key`] / [`Path`] — Addressing a location inside a value tree
//! - [`Operation`] / [`ArrayOp`] — A single patch instruction
//! - [`Patch`] — Ordered sequence of operations

pub mod error;
pub mod operation;
pub mod path;
pub mod value;

pub use error::TypeError;
pub use operation::{ArrayOp, Operation, Patch};
pub use path::{Key, Path};
pub use value::{DiffValue, ValueKind};

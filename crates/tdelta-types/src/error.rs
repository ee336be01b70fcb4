use thiserror::Error;

/// Errors produced by value model conversions.
#[derive(Debug, Error, PartialEq)]
pub enum TypeError {
    #[error("number {value} at {path} has no JSON representation")]
    NonFiniteNumber { path: String, value: f64 },
}

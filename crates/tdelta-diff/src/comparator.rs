//! Scalar equality used by the differencer.
//!
//! Containers are always compared structurally; only leaf pairs go through a
//! comparator.

use tdelta_types::DiffValue;

/// Decides whether two scalar values are equal.
pub trait ScalarComparator {
    fn scalars_equal(&self, base: &DiffValue, target: &DiffValue) -> bool;
}

/// Strict equality. Numbers must match bit-for-bit in value; NaN never
/// equals itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactComparator;

impl ScalarComparator for ExactComparator {
    fn scalars_equal(&self, base: &DiffValue, target: &DiffValue) -> bool {
        base == target
    }
}

/// Treats numbers within `epsilon` of each other as equal. Other scalars are
/// compared exactly.
#[derive(Clone, Copy, Debug)]
pub struct ToleranceComparator {
    epsilon: f64,
}

impl ToleranceComparator {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon: epsilon.abs(),
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl ScalarComparator for ToleranceComparator {
    fn scalars_equal(&self, base: &DiffValue, target: &DiffValue) -> bool {
        match (base, target) {
            (DiffValue::Number(a), DiffValue::Number(b)) => a == b || (a - b).abs() <= self.epsilon,
            _ => base == target,
        }
    }
}

impl<C: ScalarComparator + ?Sized> ScalarComparator for Box<C> {
    fn scalars_equal(&self, base: &DiffValue, target: &DiffValue) -> bool {
        (**self).scalars_equal(base, target)
    }
}

use serde::{Deserialize, Serialize};

use crate::path::Path;
use crate::value::DiffValue;

/// An index-addressed action inside an [`Operation::ArrayOps`] bundle.
///
/// Replay order is fixed regardless of the order the actions are listed in:
/// every `Set` first, then every `Insert` in listed order, then every
/// `Delete` from the highest index down.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ArrayOp {
    /// Overwrite an existing slot.
    Set { index: usize, value: DiffValue },
    /// Insert before `index`, shifting later elements right.
    Insert { index: usize, value: DiffValue },
    /// Remove the element at `index`.
    Delete { index: usize },
}

impl ArrayOp {
    pub fn index(&self) -> usize {
        match self {
            ArrayOp::Set { index, .. } | ArrayOp::Insert { index, .. } | ArrayOp::Delete { index } => {
                *index
            }
        }
    }
}

/// A single patch instruction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Assign `value` at `path`, creating missing ancestors.
    Set { path: Path, value: DiffValue },
    /// Remove the member or element at `path`.
    Delete { path: Path },
    /// Apply a bundle of index-addressed actions to the array at `path`.
    ArrayOps { path: Path, ops: Vec<ArrayOp> },
}

impl Operation {
    pub fn path(&self) -> &Path {
        match self {
            Operation::Set { path, .. }
            | Operation::Delete { path }
            | Operation::ArrayOps { path, .. } => path,
        }
    }

    pub fn set(path: Path, value: impl Into<DiffValue>) -> Self {
        Operation::Set {
            path,
            value: value.into(),
        }
    }

    pub fn delete(path: Path) -> Self {
        Operation::Delete { path }
    }

    pub fn array_ops(path: Path, ops: Vec<ArrayOp>) -> Self {
        Operation::ArrayOps { path, ops }
    }
}

/// An ordered sequence of operations turning a base value into a target.
///
/// A patch is plain data: it serializes as a JSON array of tagged records and
/// carries no behavior of its own.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Patch {
    operations: Vec<Operation>,
}

impl Patch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn push(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
    }

    /// Number of `Set` operations.
    pub fn sets(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| matches!(op, Operation::Set { .. }))
            .count()
    }

    /// Number of `Delete` operations.
    pub fn deletes(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| matches!(op, Operation::Delete { .. }))
            .count()
    }

    /// Number of `ArrayOps` bundles.
    pub fn array_bundles(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| matches!(op, Operation::ArrayOps { .. }))
            .count()
    }
}

impl From<Vec<Operation>> for Patch {
    fn from(operations: Vec<Operation>) -> Self {
        Self { operations }
    }
}

impl FromIterator<Operation> for Patch {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self {
            operations: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Patch {
    type Item = Operation;
    type IntoIter = std::vec::IntoIter<Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Patch {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;
    use serde_json::json;

    #[test]
    fn empty_patch() {
        let patch = Patch::new();
        assert!(patch.is_empty());
        assert_eq!(patch.len(), 0);
    }

    #[test]
    fn counters_by_variant() {
        let patch = Patch::from(vec![
            Operation::set(path!["a"], 1),
            Operation::delete(path!["b"]),
            Operation::array_ops(path!["c"], vec![ArrayOp::Delete { index: 0 }]),
            Operation::set(path!["d"], "x"),
        ]);
        assert_eq!(patch.len(), 4);
        assert_eq!(patch.sets(), 2);
        assert_eq!(patch.deletes(), 1);
        assert_eq!(patch.array_bundles(), 1);
        assert_eq!(patch.operations()[1].path(), &path!["b"]);
    }

    #[test]
    fn serializes_as_tagged_records() {
        let patch = Patch::from(vec![
            Operation::set(path!["items", 1usize, "b"], 3),
            Operation::array_ops(
                path!["items"],
                vec![ArrayOp::Insert {
                    index: 2,
                    value: DiffValue::from(json!({"c": 9})),
                }],
            ),
            Operation::delete(path![]),
        ]);

        let encoded = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            encoded,
            json!([
                {"op": "set", "path": ["items", 1, "b"], "value": 3.0},
                {"op": "array_ops", "path": ["items"], "ops": [
                    {"op": "insert", "index": 2, "value": {"c": 9.0}}
                ]},
                {"op": "delete", "path": []}
            ])
        );

        let decoded: Patch = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, patch);
    }

    #[test]
    fn array_op_index() {
        assert_eq!(ArrayOp::Delete { index: 4 }.index(), 4);
        assert_eq!(
            ArrayOp::Set {
                index: 2,
                value: DiffValue::Null
            }
            .index(),
            2
        );
    }
}

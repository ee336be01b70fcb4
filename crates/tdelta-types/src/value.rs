use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TypeError;
use crate::path::{Key, Path};

/// A tree-shaped, JSON-like value.
///
/// Objects are kept in a `BTreeMap`, so member enumeration is always sorted
/// and never depends on insertion order. Number comparison is exact `f64`
/// equality.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiffValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<DiffValue>),
    Object(BTreeMap<String, DiffValue>),
}

/// The variant of a [`DiffValue`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        f.write_str(name)
    }
}

impl DiffValue {
    /// An empty object.
    pub fn empty_object() -> Self {
        DiffValue::Object(BTreeMap::new())
    }

    /// An empty array.
    pub fn empty_array() -> Self {
        DiffValue::Array(Vec::new())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            DiffValue::Null => ValueKind::Null,
            DiffValue::Bool(_) => ValueKind::Bool,
            DiffValue::Number(_) => ValueKind::Number,
            DiffValue::String(_) => ValueKind::String,
            DiffValue::Array(_) => ValueKind::Array,
            DiffValue::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DiffValue::Null)
    }

    /// Returns `true` for arrays and objects.
    pub fn is_container(&self) -> bool {
        matches!(self, DiffValue::Array(_) | DiffValue::Object(_))
    }

    /// Returns `true` when both values are arrays or both are objects.
    pub fn same_container_kind(&self, other: &DiffValue) -> bool {
        matches!(
            (self, other),
            (DiffValue::Array(_), DiffValue::Array(_)) | (DiffValue::Object(_), DiffValue::Object(_))
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DiffValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DiffValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DiffValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<DiffValue>> {
        match self {
            DiffValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<DiffValue>> {
        match self {
            DiffValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, DiffValue>> {
        match self {
            DiffValue::Object(members) => Some(members),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut BTreeMap<String, DiffValue>> {
        match self {
            DiffValue::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Reads the child addressed by `key`. Scalars have no children.
    pub fn get(&self, key: &Key) -> Option<&DiffValue> {
        match self {
            DiffValue::Array(items) => key.as_index().and_then(|i| items.get(i)),
            DiffValue::Object(members) => members.get(&*key.member_name()),
            _ => None,
        }
    }

    /// Mutable counterpart of [`DiffValue::get`].
    pub fn get_mut(&mut self, key: &Key) -> Option<&mut DiffValue> {
        match self {
            DiffValue::Array(items) => key.as_index().and_then(move |i| items.get_mut(i)),
            DiffValue::Object(members) => members.get_mut(&*key.member_name()),
            _ => None,
        }
    }

    /// Resolves `path` by reading only; never creates anything.
    pub fn pointer(&self, path: &Path) -> Option<&DiffValue> {
        path.keys()
            .iter()
            .try_fold(self, |current, key| current.get(key))
    }

    /// Converts into a `serde_json::Value`.
    ///
    /// Integral numbers within the exactly representable `f64` range become
    /// JSON integers. NaN and infinities have no JSON form and are rejected.
    pub fn to_json(&self) -> Result<Value, TypeError> {
        let mut path = Path::root();
        to_json_at(self, &mut path)
    }
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn to_json_at(value: &DiffValue, path: &mut Path) -> Result<Value, TypeError> {
    Ok(match value {
        DiffValue::Null => Value::Null,
        DiffValue::Bool(b) => Value::Bool(*b),
        DiffValue::Number(n) => number_to_json(*n).ok_or_else(|| TypeError::NonFiniteNumber {
            path: path.to_string(),
            value: *n,
        })?,
        DiffValue::String(s) => Value::String(s.clone()),
        DiffValue::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                path.push(i);
                let converted = to_json_at(item, path);
                path.pop();
                out.push(converted?);
            }
            Value::Array(out)
        }
        DiffValue::Object(members) => {
            let mut out = serde_json::Map::new();
            for (name, member) in members {
                path.push(name.as_str());
                let converted = to_json_at(member, path);
                path.pop();
                out.insert(name.clone(), converted?);
            }
            Value::Object(out)
        }
    })
}

fn number_to_json(n: f64) -> Option<Value> {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Some(Value::from(n as i64))
    } else {
        serde_json::Number::from_f64(n).map(Value::Number)
    }
}

impl From<Value> for DiffValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => DiffValue::Null,
            Value::Bool(b) => DiffValue::Bool(b),
            Value::Number(n) => n.as_f64().map_or(DiffValue::Null, DiffValue::Number),
            Value::String(s) => DiffValue::String(s),
            Value::Array(items) => DiffValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(members) => DiffValue::Object(
                members
                    .into_iter()
                    .map(|(name, member)| (name, member.into()))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for DiffValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for DiffValue {
                fn from(n: $ty) -> Self {
                    DiffValue::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i32, i64, u32, u64, usize, f32, f64);

impl From<bool> for DiffValue {
    fn from(b: bool) -> Self {
        DiffValue::Bool(b)
    }
}

impl From<&str> for DiffValue {
    fn from(s: &str) -> Self {
        DiffValue::String(s.to_owned())
    }
}

impl From<String> for DiffValue {
    fn from(s: String) -> Self {
        DiffValue::String(s)
    }
}

impl From<Vec<DiffValue>> for DiffValue {
    fn from(items: Vec<DiffValue>) -> Self {
        DiffValue::Array(items)
    }
}

impl From<BTreeMap<String, DiffValue>> for DiffValue {
    fn from(members: BTreeMap<String, DiffValue>) -> Self {
        DiffValue::Object(members)
    }
}

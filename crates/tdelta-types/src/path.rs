use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single path segment: either an array index or an object member name.
///
/// Serialized untagged, so a path reads naturally as `["items", 1, "b"]`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Position within an array.
    Index(usize),
    /// Member name within an object.
    Name(String),
}

impl Key {
    /// Returns `true` for [`Key::Index`].
    pub fn is_index(&self) -> bool {
        matches!(self, Key::Index(_))
    }

    /// The array position this key addresses.
    ///
    /// A `Name` counts as a position only when it is a canonical decimal
    /// integer (`"3"`, not `"03"` or `"+3"`).
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(name) => name
                .parse::<usize>()
                .ok()
                .filter(|i| i.to_string() == *name),
        }
    }

    /// The object member name this key addresses. Indices map to their
    /// decimal form.
    pub fn member_name(&self) -> Cow<'_, str> {
        match self {
            Key::Index(i) => Cow::Owned(i.to_string()),
            Key::Name(name) => Cow::Borrowed(name),
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(name) => write!(f, "{name:?}"),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(name) => f.write_str(&name.replace('~', "~0").replace('/', "~1")),
        }
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_owned())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

/// An ordered sequence of keys. The empty path addresses the root.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<Key>);

impl Path {
    pub fn new(keys: Vec<Key>) -> Self {
        Self(keys)
    }

    /// The root path.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    pub fn push(&mut self, key: impl Into<Key>) {
        self.0.push(key.into());
    }

    pub fn pop(&mut self) -> Option<Key> {
        self.0.pop()
    }

    /// A new path extending this one by `key`.
    pub fn child(&self, key: impl Into<Key>) -> Self {
        let mut keys = Vec::with_capacity(self.0.len() + 1);
        keys.extend_from_slice(&self.0);
        keys.push(key.into());
        Self(keys)
    }

    /// Splits off the final key, returning the parent keys and the last key.
    /// `None` at the root.
    pub fn split_last(&self) -> Option<(&[Key], &Key)> {
        self.0.split_last().map(|(last, parent)| (parent, last))
    }

    /// The path made of the first `len` keys.
    pub fn prefix(&self, len: usize) -> Self {
        Self(self.0[..len.min(self.0.len())].to_vec())
    }
}

/// Renders as a JSON Pointer: `/items/1/b`, with the root as `""`.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in &self.0 {
            write!(f, "/{key}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.0).finish()
    }
}

impl From<Vec<Key>> for Path {
    fn from(keys: Vec<Key>) -> Self {
        Self(keys)
    }
}

impl FromIterator<Key> for Path {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Builds a [`Path`] from a list of member names and indices.
///
/// ```
/// use tdelta_types::{path, Key};
///
/// let p = path!["items", 1usize, "b"];
/// assert_eq!(p.keys()[1], Key::Index(1));
/// assert_eq!(p.to_string(), "/items/1/b");
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::root()
    };
    ($($key:expr),+ $(,)?) => {
        $crate::Path::new(vec![$($crate::Key::from($key)),+])
    };
}

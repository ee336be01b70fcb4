//! Error types for the patch crate.

use tdelta_types::{Path, ValueKind};

/// Mismatches between a patch and the value it is replayed against.
///
/// Only strict replay produces these; lenient replay degrades instead.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PatchError {
    /// An `ArrayOps` bundle addressed a value that is not an array.
    #[error("expected an array at '{path}', found {found}")]
    NotAnArray { path: Path, found: ValueKind },

    /// A write had to pass through, or land in, a value that cannot hold the
    /// next key.
    #[error("cannot address '{path}' through a {found}")]
    PathConflict { path: Path, found: ValueKind },

    /// A delete addressed a location whose parent does not exist.
    #[error("no container holds '{path}'")]
    MissingParent { path: Path },

    /// A delete addressed a member or element that does not exist.
    #[error("nothing to delete at '{path}'")]
    MissingMember { path: Path },

    /// An index-addressed action fell outside the array.
    #[error("index {index} out of bounds for array of length {len} at '{path}'")]
    IndexOutOfBounds { path: Path, index: usize, len: usize },

    /// A non-root operation followed deletion of the root.
    #[error("root was deleted before operation at '{path}'")]
    RootAbsent { path: Path },
}

/// Convenience alias for patch results.
pub type PatchResult<T> = Result<T, PatchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use tdelta_types::path;

    #[test]
    fn messages_render_paths_as_pointers() {
        let err = PatchError::IndexOutOfBounds {
            path: path!["items", 2usize],
            index: 7,
            len: 3,
        };
        assert_eq!(
            err.to_string(),
            "index 7 out of bounds for array of length 3 at '/items/2'"
        );

        let err = PatchError::NotAnArray {
            path: path![],
            found: ValueKind::Object,
        };
        assert_eq!(err.to_string(), "expected an array at '', found object");
    }
}

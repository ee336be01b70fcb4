//! Path resolution inside a working value.
//!
//! Reads never create anything. Writes create missing ancestors, choosing an
//! array when the next key is an index and an object otherwise.

use tdelta_types::{DiffValue, Key, Path};
use tracing::warn;

use crate::config::ApplyMode;
use crate::error::{PatchError, PatchResult};

/// A fresh, empty container able to hold `key`.
pub(crate) fn container_for(key: &Key) -> DiffValue {
    match key {
        Key::Index(_) => DiffValue::empty_array(),
        Key::Name(_) => DiffValue::empty_object(),
    }
}

/// Resolves `keys` by reading only.
pub(crate) fn resolve_mut<'a>(root: &'a mut DiffValue, keys: &[Key]) -> Option<&'a mut DiffValue> {
    keys.iter().try_fold(root, |current, key| current.get_mut(key))
}

fn accepts(value: &DiffValue, key: &Key) -> bool {
    match value {
        DiffValue::Object(_) => true,
        DiffValue::Array(_) => key.as_index().is_some(),
        _ => false,
    }
}

/// Makes `value` able to hold `key`, replacing it in lenient mode.
fn ensure_accepts(
    value: &mut DiffValue,
    key: &Key,
    path: &Path,
    depth: usize,
    mode: ApplyMode,
) -> PatchResult<()> {
    if accepts(value, key) {
        return Ok(());
    }
    let at = path.prefix(depth);
    match mode {
        ApplyMode::Strict => Err(PatchError::PathConflict {
            path: at,
            found: value.kind(),
        }),
        ApplyMode::Lenient => {
            if !value.is_null() {
                warn!(path = %at, found = %value.kind(), "replacing value that cannot hold the next key");
            }
            *value = container_for(key);
            Ok(())
        }
    }
}

/// Fetches the child at `key`, creating it as a container for `next` when
/// absent. `container` must already accept `key`.
fn child_or_create<'a>(
    container: &'a mut DiffValue,
    key: &Key,
    next: &Key,
    path: &Path,
    depth: usize,
    mode: ApplyMode,
) -> PatchResult<&'a mut DiffValue> {
    match container {
        DiffValue::Object(members) => Ok(members
            .entry(key.member_name().into_owned())
            .or_insert_with(|| container_for(next))),
        DiffValue::Array(items) => {
            let index = key.as_index().unwrap_or(items.len());
            if index < items.len() {
                return Ok(&mut items[index]);
            }
            check_append(items, index, path, depth, mode)?;
            items.push(container_for(next));
            let last = items.len() - 1;
            Ok(&mut items[last])
        }
        other => Err(PatchError::PathConflict {
            path: path.prefix(depth),
            found: other.kind(),
        }),
    }
}

/// Writes past the end of an array append instead of padding; strict mode
/// only allows writing right at the end.
fn check_append(
    items: &[DiffValue],
    index: usize,
    path: &Path,
    depth: usize,
    mode: ApplyMode,
) -> PatchResult<()> {
    if index > items.len() && mode == ApplyMode::Strict {
        return Err(PatchError::IndexOutOfBounds {
            path: path.prefix(depth),
            index,
            len: items.len(),
        });
    }
    Ok(())
}

/// Writes `value` at the non-root `path` below `root`.
pub(crate) fn write(
    root: &mut DiffValue,
    path: &Path,
    value: DiffValue,
    mode: ApplyMode,
) -> PatchResult<()> {
    let keys = path.keys();
    let Some((last, parents)) = keys.split_last() else {
        *root = value;
        return Ok(());
    };

    let mut current = root;
    for (depth, key) in parents.iter().enumerate() {
        ensure_accepts(current, key, path, depth, mode)?;
        current = child_or_create(current, key, &keys[depth + 1], path, depth, mode)?;
    }

    let depth = parents.len();
    ensure_accepts(current, last, path, depth, mode)?;
    match current {
        DiffValue::Object(members) => {
            members.insert(last.member_name().into_owned(), value);
        }
        DiffValue::Array(items) => {
            let index = last.as_index().unwrap_or(items.len());
            if index < items.len() {
                items[index] = value;
            } else {
                check_append(items, index, path, depth, mode)?;
                items.push(value);
            }
        }
        other => {
            return Err(PatchError::PathConflict {
                path: path.prefix(depth),
                found: other.kind(),
            })
        }
    }
    Ok(())
}

/// Removes the member or element at the non-root `path` below `root`.
pub(crate) fn remove(root: &mut DiffValue, path: &Path, mode: ApplyMode) -> PatchResult<()> {
    let Some((last, parents)) = path.keys().split_last() else {
        return Ok(());
    };

    let removed = match resolve_mut(root, parents) {
        Some(DiffValue::Array(items)) => match last.as_index() {
            Some(index) if index < items.len() => {
                items.remove(index);
                true
            }
            Some(index) if mode == ApplyMode::Strict => {
                return Err(PatchError::IndexOutOfBounds {
                    path: path.prefix(parents.len()),
                    index,
                    len: items.len(),
                })
            }
            _ => false,
        },
        Some(DiffValue::Object(members)) => members.remove(&*last.member_name()).is_some(),
        Some(_) | None => {
            return match mode {
                ApplyMode::Strict => Err(PatchError::MissingParent { path: path.clone() }),
                ApplyMode::Lenient => Ok(()),
            }
        }
    };

    if !removed && mode == ApplyMode::Strict {
        return Err(PatchError::MissingMember { path: path.clone() });
    }
    Ok(())
}

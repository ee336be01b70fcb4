//! Object differencing: member-wise comparison over the union of names.

use std::collections::{BTreeMap, BTreeSet};

use tdelta_types::{DiffValue, Operation, Path};

use crate::differ::Step;

/// Produces the steps for two objects at `path`, in sorted member order.
///
/// Presence is ownership: a member holding `Null` is present.
pub(crate) fn diff_objects<'a>(
    base: &'a BTreeMap<String, DiffValue>,
    target: &'a BTreeMap<String, DiffValue>,
    path: &Path,
) -> Vec<Step<'a>> {
    let names: BTreeSet<&String> = base.keys().chain(target.keys()).collect();

    names
        .into_iter()
        .filter_map(|name| {
            let member_path = path.child(name.as_str());
            match (base.get(name), target.get(name)) {
                (None, Some(added)) => Some(Step::Emit(Operation::Set {
                    path: member_path,
                    value: added.clone(),
                })),
                (Some(_), None) => Some(Step::Emit(Operation::Delete { path: member_path })),
                (Some(old), Some(new)) => Some(Step::Compare {
                    base: old,
                    target: new,
                    path: member_path,
                }),
                (None, None) => None,
            }
        })
        .collect()
}

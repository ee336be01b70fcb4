//! Patch replay engine.

use tdelta_types::{ArrayOp, DiffValue, Operation, Patch, Path};
use tracing::{debug, trace, warn};

use crate::array_ops::replay_array_ops;
use crate::config::{ApplyMode, PatchConfig};
use crate::error::{PatchError, PatchResult};
use crate::navigate::{container_for, remove, resolve_mut, write};

/// Replays patches against copies of base values.
///
/// The base is never modified. Replay works on a private copy whose root may
/// become absent (`None`) when a patch deletes it; later `Set`s at the root
/// bring it back.
#[derive(Clone, Debug, Default)]
pub struct Patcher {
    config: PatchConfig,
}

impl Patcher {
    pub fn new(config: PatchConfig) -> Self {
        Self { config }
    }

    /// A patcher that degrades instead of failing.
    pub fn lenient() -> Self {
        Self::new(PatchConfig::lenient())
    }

    /// A patcher that stops at the first mismatch.
    pub fn strict() -> Self {
        Self::new(PatchConfig::strict())
    }

    pub fn config(&self) -> &PatchConfig {
        &self.config
    }

    /// Replay `patch` against a copy of `base`.
    ///
    /// Returns `Ok(None)` when the root ends up deleted. Errors are only
    /// possible in strict mode; a failed strict replay leaves nothing behind.
    pub fn apply(&self, base: &DiffValue, patch: &Patch) -> PatchResult<Option<DiffValue>> {
        let mut working = Some(base.clone());
        for operation in patch {
            self.apply_operation(&mut working, operation)?;
        }
        debug!(
            operations = patch.len(),
            root_deleted = working.is_none(),
            mode = ?self.config.mode,
            "patch applied"
        );
        Ok(working)
    }

    fn mode(&self) -> ApplyMode {
        self.config.mode
    }

    fn apply_operation(
        &self,
        working: &mut Option<DiffValue>,
        operation: &Operation,
    ) -> PatchResult<()> {
        trace!(path = %operation.path(), "applying operation");
        match operation {
            Operation::Set { path, value } => self.set(working, path, value.clone()),
            Operation::Delete { path } => self.delete(working, path),
            Operation::ArrayOps { path, ops } => self.array_ops(working, path, ops),
        }
    }

    fn set(&self, working: &mut Option<DiffValue>, path: &Path, value: DiffValue) -> PatchResult<()> {
        let Some(first) = path.keys().first() else {
            *working = Some(value);
            return Ok(());
        };
        if working.is_none() && self.mode() == ApplyMode::Strict {
            return Err(PatchError::RootAbsent { path: path.clone() });
        }
        let root = working.get_or_insert_with(|| container_for(first));
        write(root, path, value, self.mode())
    }

    fn delete(&self, working: &mut Option<DiffValue>, path: &Path) -> PatchResult<()> {
        if path.is_root() {
            *working = None;
            return Ok(());
        }
        match working {
            Some(root) => remove(root, path, self.mode()),
            None if self.mode() == ApplyMode::Strict => {
                Err(PatchError::RootAbsent { path: path.clone() })
            }
            None => Ok(()),
        }
    }

    fn array_ops(
        &self,
        working: &mut Option<DiffValue>,
        path: &Path,
        ops: &[ArrayOp],
    ) -> PatchResult<()> {
        let found = match working.as_mut().and_then(|root| resolve_mut(root, path.keys())) {
            Some(DiffValue::Array(items)) => {
                return replay_array_ops(items, ops, path, self.mode());
            }
            Some(other) => Some(other.kind()),
            None => None,
        };

        if let Some(found) = found {
            if self.mode() == ApplyMode::Strict {
                return Err(PatchError::NotAnArray {
                    path: path.clone(),
                    found,
                });
            }
            warn!(path = %path, %found, "array bundle targets a non-array; replacing it");
        }

        let mut items = Vec::new();
        replay_array_ops(&mut items, ops, path, self.mode())?;
        self.set(working, path, DiffValue::Array(items))
    }
}

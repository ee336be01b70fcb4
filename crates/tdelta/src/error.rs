use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("patch error: {0}")]
    Patch(#[from] tdelta_patch::PatchError),

    #[error("conversion error: {0}")]
    Conversion(#[from] tdelta_types::TypeError),
}

pub type EngineResult<T> = Result<T, EngineError>;

use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("marker {marker:?} not found in {path:?}")]
    Format { path: PathBuf, marker: String },

    #[error("{0}")]
    IOError(#[from] io::Error),

    #[error("{path:?} is not valid {encoding}")]
    Decode { path: PathBuf, encoding: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

//! Error types for definition loading and value binding.
//!
//! Layout itself never fails; only the boundary where definitions, bound
//! values and configuration enter the engine can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid attribute `{attribute}` at {path}: {reason}")]
    InvalidAttribute {
        path: String,
        attribute: &'static str,
        reason: String,
    },

    #[error("unknown binding: {0}")]
    UnknownBinding(String),

    #[error("binding `{name}` expects a {expected} value")]
    BindingKind { name: String, expected: &'static str },

    #[error("binding `{0}` is used by leaves of different kinds")]
    ConflictingBinding(String),
}

pub type Result<T> = std::result::Result<T, Error>;

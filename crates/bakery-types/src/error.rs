use thiserror::Error;

/// Errors produced when decoding a [`Cake`](crate::Cake).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing kind separator in cake: {0:?}")]
    MissingKind(String),

    #[error("unknown cake kind: {0:?}")]
    UnknownKind(String),

    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

use bakery_types::ParseError;

/// Errors from rack operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RackError {
    /// The names and values sequences differ in length.
    #[error("names and values differ in length: {names} names, {values} values")]
    LengthMismatch { names: usize, values: usize },

    /// A name occurs more than once in the encoded form.
    #[error("duplicate name in rack: {0:?}")]
    DuplicateName(String),

    /// The bytes are not a `[names, values]` JSON pair.
    #[error("malformed rack encoding: {0}")]
    Encoding(String),

    /// A value is not a valid cake string.
    #[error("invalid cake in rack: {0}")]
    InvalidCake(#[from] ParseError),

    /// `remove` was called with a name that is not in the rack.
    #[error("name not found in rack: {0:?}")]
    NotFound(String),
}

impl RackError {
    /// Returns `true` for errors raised while decoding a rack.
    pub fn is_format_error(&self) -> bool {
        !matches!(self, Self::NotFound(_))
    }
}

/// Result alias for rack operations.
pub type RackResult<T> = Result<T, RackError>;

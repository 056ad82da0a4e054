use thiserror::Error;

/// Top-level error type for the planar geometry primitives.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A value does not have the expected shape (not a point record, not a
    /// coordinate pair, unknown unit tag...).
    #[error("invalid type: {0}")]
    InvalidType(String),

    /// A numeric parameter violates a domain constraint, or the resulting
    /// geometry would be degenerate.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// A string coordinate does not parse to a finite number.
    #[error("invalid number format: '{input}'")]
    InvalidNumberFormat { input: String },

    /// Decoding JSON text or a data record failed.
    #[error("malformed input {input}: {reason}")]
    MalformedInput { input: String, reason: String },
}

/// Coarse classification of an [`Error`], independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidType,
    InvalidRange,
    InvalidNumberFormat,
    MalformedInput,
}

impl Error {
    /// Returns the class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidType(_) => ErrorKind::InvalidType,
            Self::InvalidRange(_) => ErrorKind::InvalidRange,
            Self::InvalidNumberFormat { .. } => ErrorKind::InvalidNumberFormat,
            Self::MalformedInput { .. } => ErrorKind::MalformedInput,
        }
    }

    pub(crate) fn range(msg: impl Into<String>) -> Self {
        Self::InvalidRange(msg.into())
    }

    pub(crate) fn invalid_type(msg: impl Into<String>) -> Self {
        Self::InvalidType(msg.into())
    }

    pub(crate) fn malformed(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

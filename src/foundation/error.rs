/// Convenience result type used across scrollyte.
pub type ScrollyteResult<T> = Result<T, ScrollyteError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ScrollyteError {
    /// Invalid scene data or options.
    #[error("validation error: {0}")]
    Validation(String),

    /// Timing constants or hold/fade zones that violate the calculus invariants.
    #[error("timing error: {0}")]
    Timing(String),

    /// Errors while applying a scroll tick.
    #[error("runtime error: {0}")]
    Runtime(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollyteError {
    /// Build a [`ScrollyteError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollyteError::Timing`] value.
    pub fn timing(msg: impl Into<String>) -> Self {
        Self::Timing(msg.into())
    }

    /// Build a [`ScrollyteError::Runtime`] value.
    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    /// Build a [`ScrollyteError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

/// Result alias used throughout the crate.
pub type SeqlineResult<T> = Result<T, SeqlineError>;

/// Errors produced while parsing or compiling a sequence.
///
/// A compilation either returns a complete plan or one of these; nothing is partially
/// committed.
#[derive(thiserror::Error, Debug)]
pub enum SeqlineError {
    /// Malformed input: bad durations, times, keyframe lists, targets.
    #[error("validation error: {0}")]
    Validation(String),

    /// Positioning references something that does not exist, e.g. an undeclared label.
    #[error("configuration error: {0}")]
    Config(String),

    /// A named easing is not known to the registry.
    #[error("easing error: {0}")]
    Easing(String),

    /// Repeat count or repeat variant cannot be expanded.
    #[error("repeat error: {0}")]
    Repeat(String),

    /// The spring oracle rejected the parameters.
    #[error("spring error: {0}")]
    Spring(String),

    /// Boundary (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SeqlineError {
    /// Build a [`SeqlineError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SeqlineError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`SeqlineError::Easing`].
    pub fn easing(msg: impl Into<String>) -> Self {
        Self::Easing(msg.into())
    }

    /// Build a [`SeqlineError::Repeat`].
    pub fn repeat(msg: impl Into<String>) -> Self {
        Self::Repeat(msg.into())
    }

    /// Build a [`SeqlineError::Spring`].
    pub fn spring(msg: impl Into<String>) -> Self {
        Self::Spring(msg.into())
    }

    /// Build a [`SeqlineError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SeqlineError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

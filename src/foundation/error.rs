/// Convenience result type used across splitview.
pub type SplitResult<T> = Result<T, SplitError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum SplitError {
    /// A split percentage outside `[0, 100]`.
    #[error("invalid split percent: {0} (expected 0..=100)")]
    InvalidPercent(i32),

    /// Malformed animation request (bounds or duration).
    #[error("animation error: {0}")]
    Animation(String),

    /// Invalid user-provided configuration or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from collaborators or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SplitError {
    /// Build a [`SplitError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`SplitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SplitError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

/// Convenience result type used across slidestack.
pub type StackResult<T> = Result<T, StackError>;

/// Top-level error taxonomy used by composition APIs.
#[derive(thiserror::Error, Debug)]
pub enum StackError {
    /// Invalid caller-provided geometry, configuration, or image data.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A canvas or intermediate buffer could not be allocated.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    /// A source image could not be decoded, encoded, or resampled.
    #[error("codec failure: {0}")]
    Codec(String),

    /// A batch run was cancelled between group compositions.
    #[error("cancelled: {0}")]
    Cancelled(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StackError {
    /// Build a [`StackError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`StackError::ResourceExhausted`] value.
    pub fn resource_exhausted(msg: impl Into<String>) -> Self {
        Self::ResourceExhausted(msg.into())
    }

    /// Build a [`StackError::Codec`] value.
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }

    /// Build a [`StackError::Cancelled`] value.
    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }
}

impl From<image::ImageError> for StackError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Limits(e) => Self::ResourceExhausted(e.to_string()),
            image::ImageError::IoError(e) => Self::Other(anyhow::Error::new(e)),
            other => Self::Codec(other.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

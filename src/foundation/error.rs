pub type SequenceResult<T> = Result<T, SequenceError>;

/// Error type shared by every fallible operation in the crate.
#[derive(thiserror::Error, Debug)]
pub enum SequenceError {
    /// Configuration rejected before any work was done.
    #[error("validation error: {0}")]
    Validation(String),

    /// The host could not supply something mount needs (anchor element, canvas).
    #[error("initialization error: {0}")]
    Initialization(String),

    /// A frame image could not be fetched or decoded.
    #[error("load error: {0}")]
    Load(String),

    /// A draw onto the canvas failed.
    #[error("render error: {0}")]
    Render(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SequenceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn initialization(msg: impl Into<String>) -> Self {
        Self::Initialization(msg.into())
    }

    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

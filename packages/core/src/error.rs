//! Error types for dotkey stores.

use thiserror::Error;

/// Errors produced by flattening and the codec boundary.
///
/// Every failure is reported synchronously as a returned value; nothing
/// here is transient and nothing retries.
#[derive(Debug, Error)]
pub enum Error {
    /// Flatten was asked to treat a non-container value as a root container.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// What was expected at the failing position.
        message: String,
    },

    /// Text could not be decoded into a nested value.
    #[error("decode error: {message}")]
    Decode {
        /// The underlying decoder message.
        message: String,
    },

    /// A nested value could not be encoded to text.
    #[error("encode error: {message}")]
    Encode {
        /// The underlying encoder message.
        message: String,
    },
}

impl Error {
    /// Create an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }

    /// Create an encode error.
    pub fn encode(message: impl Into<String>) -> Self {
        Error::Encode {
            message: message.into(),
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for sopsgen operations.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for sopsgen operations.
///
/// Each variant corresponds to one failure class of the generation
/// pipeline. Per-source failures are wrapped in [`Error::Context`] with the
/// originating source declaration so the top-level message is
/// self-locating.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or mismatched generator descriptor
    #[error("{0}")]
    Validation(String),

    /// Source file could not be read
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Path of the unreadable file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The decryption backend refused or failed to decrypt
    #[error("{message}")]
    Decryption {
        /// Summary of the decryption failure
        message: String,
        /// User-facing detail reported by the backend, if any
        detail: Option<String>,
    },

    /// Unrecognized or disallowed content format for the source kind
    #[error("{0}")]
    Format(String),

    /// Malformed document content or invalid UTF-8
    #[error("{0}")]
    Parse(String),

    /// Malformed `[key=]path` file-source entry
    #[error("{0}")]
    Specification(String),

    /// A wrapped error carrying the context it occurred in
    #[error("{context}: {source}")]
    Context {
        /// Describes where the inner error occurred
        context: String,
        /// The wrapped error
        #[source]
        source: Box<Error>,
    },
}

/// A specialized Result type for sopsgen operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap this error with a context prefix such as `env source a.env`.
    pub fn context(self, context: impl Into<String>) -> Self {
        Error::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Walk the error chain for a decryption detail intended for the user.
    pub fn user_detail(&self) -> Option<&str> {
        match self {
            Error::Decryption { detail, .. } => detail.as_deref(),
            Error::Context { source, .. } => source.user_detail(),
            _ => None,
        }
    }
}

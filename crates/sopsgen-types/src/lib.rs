//! # sopsgen Types
//!
//! Shared building blocks for the sopsgen crates:
//!
//! - The [`Error`] taxonomy and [`Result`] alias used across the pipeline
//! - The [`SourceFormat`] classifier mapping source paths to content formats
//! - The [`Decryptor`] capability trait implemented by decryption backends
//!
//! ## Example
//!
//! ```
//! use sopsgen_types::SourceFormat;
//!
//! assert_eq!(SourceFormat::for_path("secrets.env"), SourceFormat::Dotenv);
//! assert_eq!(SourceFormat::for_path("cert.pem"), SourceFormat::Binary);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod format;
pub mod traits;

// Re-export common types for convenience
pub use errors::{Error, Result};
pub use format::SourceFormat;
pub use traits::Decryptor;

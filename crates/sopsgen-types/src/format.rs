//! Content-format classification for source paths.

use std::fmt;

/// Content format of a secret source, derived from its filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Structured YAML document
    Yaml,
    /// Structured JSON document
    Json,
    /// Line-oriented `KEY=value` dotenv file
    Dotenv,
    /// Opaque bytes, usable only as a single-file source
    Binary,
}

impl SourceFormat {
    /// Classify a source path by filename extension.
    ///
    /// Matching is by suffix only and case-sensitive; there is no content
    /// sniffing. Unknown extensions classify as [`SourceFormat::Binary`].
    pub fn for_path(path: &str) -> Self {
        if path.ends_with(".yaml") || path.ends_with(".yml") {
            SourceFormat::Yaml
        } else if path.ends_with(".json") {
            SourceFormat::Json
        } else if path.ends_with(".env") {
            SourceFormat::Dotenv
        } else {
            SourceFormat::Binary
        }
    }

    /// The format tag handed to the decryption backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Yaml => "yaml",
            SourceFormat::Json => "json",
            SourceFormat::Dotenv => "dotenv",
            SourceFormat::Binary => "binary",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

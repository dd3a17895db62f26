//! Source resolution: read, decrypt, parse, and merge declared sources.

use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use sopsgen_types::{Decryptor, Error, Result, SourceFormat};
use tracing::debug;

use crate::descriptor::{GeneratorDescriptor, KvMap};
use crate::parse;

/// Resolve every declared source into one ordered data map.
///
/// Whole-document sources are processed first, then single-file sources,
/// each in declaration order. A later source silently overwrites keys
/// produced by an earlier one; this last-write-wins merge is part of the
/// tool's contract and must not be turned into a conflict error.
///
/// The first failing source aborts resolution; its error is wrapped with
/// the originating declaration.
pub fn resolve(descriptor: &GeneratorDescriptor, decryptor: &dyn Decryptor) -> Result<KvMap> {
    let mut data = KvMap::new();

    for source in &descriptor.env_sources {
        resolve_env_source(source, decryptor, &mut data)
            .map_err(|e| e.context(format!("env source {}", source)))?;
    }

    for source in &descriptor.file_sources {
        resolve_file_source(source, decryptor, &mut data)
            .map_err(|e| e.context(format!("file source {}", source)))?;
    }

    Ok(data)
}

fn resolve_env_source(source: &str, decryptor: &dyn Decryptor, data: &mut KvMap) -> Result<()> {
    let content = read_source(source)?;
    let format = SourceFormat::for_path(source);
    debug!("decrypting env source {} as {}", source, format);
    let plaintext = decryptor.decrypt(&content, format)?;

    match format {
        SourceFormat::Dotenv => parse::dotenv(&plaintext, data),
        SourceFormat::Yaml => parse::yaml(&plaintext, data),
        SourceFormat::Json => parse::json(&plaintext, data),
        SourceFormat::Binary => Err(Error::Format(
            "unknown file format, use dotenv, yaml or json".to_string(),
        )),
    }
}

fn resolve_file_source(source: &str, decryptor: &dyn Decryptor, data: &mut KvMap) -> Result<()> {
    let spec = FileSpec::parse(source)?;
    let content = read_source(&spec.path)?;
    let format = SourceFormat::for_path(&spec.path);
    debug!("decrypting file source {} as {}", spec.path, format);
    let plaintext = decryptor.decrypt(&content, format)?;

    data.insert(spec.key, general_purpose::STANDARD.encode(plaintext));
    Ok(())
}

fn read_source(path: &str) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| Error::Io {
        path: path.into(),
        source,
    })
}

/// A parsed `[key=]path` single-file source declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    /// Key the file's content is stored under
    pub key: String,
    /// Path of the file to read
    pub path: String,
}

impl FileSpec {
    /// Parse a `[key=]path` declaration.
    ///
    /// Without `=` the key defaults to the path's final component. With
    /// exactly one `=` the left side is the key and the right side the
    /// path; neither may be empty. Keys and paths cannot themselves
    /// contain `=`.
    pub fn parse(source: &str) -> Result<Self> {
        let components: Vec<&str> = source.split('=').collect();
        match components.as_slice() {
            [_] => Ok(FileSpec {
                key: base_name(source).to_string(),
                path: source.to_string(),
            }),
            [key, path] => {
                if key.is_empty() {
                    Err(Error::Specification(format!(
                        "key name for file path {} missing",
                        path
                    )))
                } else if path.is_empty() {
                    Err(Error::Specification(format!(
                        "file path for key name {} missing",
                        key
                    )))
                } else {
                    Ok(FileSpec {
                        key: (*key).to_string(),
                        path: (*path).to_string(),
                    })
                }
            }
            _ => Err(Error::Specification(
                "key names or file paths cannot contain '='".to_string(),
            )),
        }
    }
}

fn base_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

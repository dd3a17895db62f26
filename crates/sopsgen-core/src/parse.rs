//! Content parsers turning decrypted plaintext into key/value pairs.
//!
//! Every parser base64-encodes values with the standard padded alphabet and
//! merges pairs into the caller's map, overwriting existing keys.

use base64::{engine::general_purpose, Engine as _};
use sopsgen_types::{Error, Result};

use crate::descriptor::KvMap;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Parse dotenv plaintext, merging each `KEY=value` pair into `data`.
///
/// Lines are left-trimmed first; blank lines and `#` comments are skipped.
/// Every remaining line must contain `=`. Line numbers in errors are
/// 0-based and count every line, skipped or not.
pub(crate) fn dotenv(content: &[u8], data: &mut KvMap) -> Result<()> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    let text = std::str::from_utf8(content)
        .map_err(|_| Error::Parse("invalid utf8 sequence".to_string()))?;

    for (line_num, line) in text.lines().enumerate() {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (key, value) = line.split_once('=').ok_or_else(|| {
            Error::Parse(format!("requires value: {}", line)).context(format!("line {}", line_num))
        })?;

        data.insert(key.to_string(), general_purpose::STANDARD.encode(value));
    }

    Ok(())
}

/// Parse a flat YAML string-to-string mapping, merging entries into `data`.
///
/// An empty or `null` document yields no pairs.
pub(crate) fn yaml(content: &[u8], data: &mut KvMap) -> Result<()> {
    let entries: Option<KvMap> = serde_yaml::from_slice(content)
        .map_err(|e| Error::Parse(format!("invalid YAML document: {}", e)))?;

    for (key, value) in entries.unwrap_or_default() {
        data.insert(key, general_purpose::STANDARD.encode(value));
    }

    Ok(())
}

/// Parse a flat JSON string-to-string object, merging entries into `data`.
///
/// A `null` document yields no pairs.
pub(crate) fn json(content: &[u8], data: &mut KvMap) -> Result<()> {
    let entries: Option<KvMap> = serde_json::from_slice(content)
        .map_err(|e| Error::Parse(format!("invalid JSON document: {}", e)))?;

    for (key, value) in entries.unwrap_or_default() {
        data.insert(key, general_purpose::STANDARD.encode(value));
    }

    Ok(())
}

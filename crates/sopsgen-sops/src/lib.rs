//! # sopsgen SOPS backend
//!
//! The production [`Decryptor`]: a client for the external `sops` binary.
//! sopsgen never implements cryptography itself; key discovery, key-group
//! policy, and the decision of whether input is encrypted at all are
//! entirely SOPS's.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use sopsgen_types::{Decryptor, Error, Result, SourceFormat};
use tracing::debug;

/// Decryption backend that shells out to SOPS.
///
/// Ciphertext is staged into a temporary file and decrypted with
/// `sops --decrypt --input-type <fmt> --output-type <fmt>`, where `<fmt>`
/// is the classifier tag for the source path. SOPS's stderr is preserved as
/// the user-facing failure detail.
#[derive(Debug, Clone)]
pub struct SopsClient {
    binary: PathBuf,
}

impl SopsClient {
    /// Create a client using the `sops` binary from `PATH`.
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("sops"),
        }
    }

    /// Create a client using a specific sops binary.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for SopsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Decryptor for SopsClient {
    fn decrypt(&self, ciphertext: &[u8], format: SourceFormat) -> Result<Vec<u8>> {
        let mut staged = tempfile::Builder::new()
            .prefix("sopsgen-")
            .tempfile()
            .map_err(|e| Error::Decryption {
                message: format!("cannot stage encrypted content: {}", e),
                detail: None,
            })?;
        staged.write_all(ciphertext).map_err(|e| Error::Decryption {
            message: format!("cannot stage encrypted content: {}", e),
            detail: None,
        })?;

        debug!(
            "running {} --decrypt on staged content as {}",
            self.binary.display(),
            format
        );
        let output = Command::new(&self.binary)
            .arg("--decrypt")
            .arg("--input-type")
            .arg(format.as_str())
            .arg("--output-type")
            .arg(format.as_str())
            .arg(staged.path())
            .output()
            .map_err(|e| Error::Decryption {
                message: format!("cannot run {}: {}", self.binary.display(), e),
                detail: None,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::Decryption {
                message: format!("{} failed: {}", self.binary.display(), output.status),
                detail: if stderr.is_empty() { None } else { Some(stderr) },
            });
        }

        Ok(output.stdout)
    }
}

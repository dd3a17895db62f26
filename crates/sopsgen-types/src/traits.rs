//! Capability traits implemented by external collaborators.

use crate::errors::Result;
use crate::format::SourceFormat;

/// Decryption capability for possibly-encrypted source material.
///
/// The pipeline supplies raw file bytes and the format tag derived from the
/// source path; the implementation decides for itself whether the bytes are
/// actually encrypted and whether it is authorized to decrypt them. sopsgen
/// itself never implements cryptography.
pub trait Decryptor {
    /// Decrypt `ciphertext` declared as `format`, returning plaintext bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decryption`](crate::Error::Decryption) when the
    /// material cannot be decrypted; the optional detail field carries any
    /// user-facing explanation from the backend.
    fn decrypt(&self, ciphertext: &[u8], format: SourceFormat) -> Result<Vec<u8>>;
}

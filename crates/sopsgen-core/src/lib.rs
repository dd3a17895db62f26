//! # sopsgen Core
//!
//! The source-resolution pipeline turning a generator descriptor into a
//! Kubernetes Secret manifest:
//!
//! 1. Load and validate the [`GeneratorDescriptor`]
//! 2. For each declared source, in declaration order: classify its format,
//!    decrypt it through a [`Decryptor`], and parse the plaintext into
//!    key/value pairs
//! 3. Fold all pairs into one ordered, last-write-wins data map
//! 4. Assemble the final [`SecretManifest`] with its kustomize annotations
//!
//! The pipeline is fully synchronous and sequential; source order is a
//! correctness requirement, not an implementation detail.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod descriptor;
mod parse;
pub mod resolve;
pub mod secret;

pub use descriptor::{GeneratorDescriptor, KvMap, ObjectMeta, TypeMeta, API_VERSION, KIND};
pub use resolve::{resolve, FileSpec};
pub use secret::{SecretManifest, BEHAVIOR_ANNOTATION, NEEDS_HASH_ANNOTATION};

use std::path::Path;

use sopsgen_types::{Decryptor, Result};

/// Generate a Secret from a validated descriptor.
pub fn generate(
    descriptor: &GeneratorDescriptor,
    decryptor: &dyn Decryptor,
) -> Result<SecretManifest> {
    let data = resolve::resolve(descriptor, decryptor)?;
    Ok(SecretManifest::assemble(descriptor, data))
}

/// Process a descriptor file end to end, returning the Secret as YAML.
pub fn process_file(path: impl AsRef<Path>, decryptor: &dyn Decryptor) -> Result<String> {
    let descriptor = GeneratorDescriptor::load(path)?;
    let secret = generate(&descriptor, decryptor)?;
    secret.to_yaml()
}

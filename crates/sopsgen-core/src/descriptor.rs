//! Generator descriptor loading and validation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sopsgen_types::{Error, Result};
use std::path::Path;

/// Ordered string-to-string map used for labels, annotations, and data.
pub type KvMap = IndexMap<String, String>;

/// apiVersion every generator descriptor must declare.
pub const API_VERSION: &str = "sopsgen.io/v1beta1";

/// kind every generator descriptor must declare.
pub const KIND: &str = "SopsSecretGenerator";

/// Resource type identity shared by descriptors and generated Secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMeta {
    /// API group and version of the resource
    #[serde(rename = "apiVersion", default)]
    pub api_version: String,

    /// Resource kind
    #[serde(default)]
    pub kind: String,
}

/// Kubernetes object metadata carried from the descriptor to the Secret.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Object name
    #[serde(default)]
    pub name: String,

    /// Target namespace
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    /// Object labels
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub labels: KvMap,

    /// Object annotations
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub annotations: KvMap,
}

/// The input document declaring what Secret to generate, and from which
/// sources.
///
/// Constructed once by [`GeneratorDescriptor::load`] or
/// [`GeneratorDescriptor::from_bytes`] and immutable afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorDescriptor {
    /// Declared resource identity, checked against the expected pair
    #[serde(flatten)]
    pub type_meta: TypeMeta,

    /// Metadata copied onto the generated Secret
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Whole-document sources, each yielding multiple key/value pairs
    #[serde(rename = "envs", default)]
    pub env_sources: Vec<String>,

    /// `[key=]path` single-file sources, each yielding one value
    #[serde(rename = "files", default)]
    pub file_sources: Vec<String>,

    /// kustomize merge behavior, passed through as an annotation
    #[serde(default)]
    pub behavior: String,

    /// Suppress the kustomize name-suffix-hash annotation
    #[serde(rename = "disableNameSuffixHash", default)]
    pub disable_name_suffix_hash: bool,

    /// Secret type, passed through verbatim
    #[serde(rename = "type", default)]
    pub secret_type: String,
}

impl GeneratorDescriptor {
    /// Load and validate a descriptor from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&content, API_VERSION, KIND)
    }

    /// Parse and validate a descriptor against an expected identity.
    ///
    /// The expected apiVersion/kind pair is passed in rather than read from
    /// global state, so alternative identities can be accepted under test.
    pub fn from_bytes(
        content: &[u8],
        expected_api_version: &str,
        expected_kind: &str,
    ) -> Result<Self> {
        let descriptor: Self = serde_yaml::from_slice(content)
            .map_err(|e| Error::Parse(format!("invalid generator document: {}", e)))?;

        if descriptor.type_meta.api_version != expected_api_version
            || descriptor.type_meta.kind != expected_kind
        {
            return Err(Error::Validation(format!(
                "input must be apiVersion {}, kind {}",
                expected_api_version, expected_kind
            )));
        }

        if descriptor.metadata.name.is_empty() {
            return Err(Error::Validation(
                "input must contain metadata.name value".to_string(),
            ));
        }

        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(content: &str) -> Result<GeneratorDescriptor> {
        GeneratorDescriptor::from_bytes(content.as_bytes(), API_VERSION, KIND)
    }

    #[test]
    fn test_full_descriptor() {
        let descriptor = parse(concat!(
            "apiVersion: sopsgen.io/v1beta1\n",
            "kind: SopsSecretGenerator\n",
            "metadata:\n",
            "  name: app-secrets\n",
            "  namespace: prod\n",
            "  labels:\n",
            "    app: web\n",
            "envs:\n",
            "  - secrets.env\n",
            "files:\n",
            "  - cert.pem\n",
            "behavior: merge\n",
            "disableNameSuffixHash: true\n",
            "type: Opaque\n",
        ))
        .unwrap();

        assert_eq!(descriptor.metadata.name, "app-secrets");
        assert_eq!(descriptor.metadata.namespace, "prod");
        assert_eq!(descriptor.env_sources, vec!["secrets.env"]);
        assert_eq!(descriptor.file_sources, vec!["cert.pem"]);
        assert_eq!(descriptor.behavior, "merge");
        assert!(descriptor.disable_name_suffix_hash);
        assert_eq!(descriptor.secret_type, "Opaque");
    }

    #[test]
    fn test_optional_fields_default() {
        let descriptor = parse(concat!(
            "apiVersion: sopsgen.io/v1beta1\n",
            "kind: SopsSecretGenerator\n",
            "metadata:\n",
            "  name: minimal\n",
        ))
        .unwrap();

        assert!(descriptor.env_sources.is_empty());
        assert!(descriptor.file_sources.is_empty());
        assert!(descriptor.behavior.is_empty());
        assert!(!descriptor.disable_name_suffix_hash);
        assert!(descriptor.secret_type.is_empty());
        assert!(descriptor.metadata.namespace.is_empty());
    }

    #[test]
    fn test_mismatched_kind_is_rejected() {
        let err = parse(concat!(
            "apiVersion: sopsgen.io/v1beta1\n",
            "kind: ConfigMapGenerator\n",
            "metadata:\n",
            "  name: nope\n",
        ))
        .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("apiVersion sopsgen.io/v1beta1"));
    }

    #[test]
    fn test_mismatched_api_version_is_rejected() {
        let err = parse(concat!(
            "apiVersion: sopsgen.io/v1\n",
            "kind: SopsSecretGenerator\n",
            "metadata:\n",
            "  name: nope\n",
        ))
        .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let err = parse(concat!(
            "apiVersion: sopsgen.io/v1beta1\n",
            "kind: SopsSecretGenerator\n",
            "metadata: {}\n",
        ))
        .unwrap_err();

        assert!(err.to_string().contains("metadata.name"));
    }

    #[test]
    fn test_expected_identity_is_parameterized() {
        let content = concat!(
            "apiVersion: other.io/v1\n",
            "kind: OtherGenerator\n",
            "metadata:\n",
            "  name: ok\n",
        );

        assert!(GeneratorDescriptor::from_bytes(content.as_bytes(), API_VERSION, KIND).is_err());
        assert!(
            GeneratorDescriptor::from_bytes(content.as_bytes(), "other.io/v1", "OtherGenerator")
                .is_ok()
        );
    }

    #[test]
    fn test_load_reports_unreadable_path() {
        let err = GeneratorDescriptor::load("no/such/descriptor.yaml").unwrap_err();

        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("no/such/descriptor.yaml"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "apiVersion: sopsgen.io/v1beta1\nkind: SopsSecretGenerator\nmetadata:\n  name: from-disk\n"
        )
        .unwrap();

        let descriptor = GeneratorDescriptor::load(file.path()).unwrap();
        assert_eq!(descriptor.metadata.name, "from-disk");
    }
}

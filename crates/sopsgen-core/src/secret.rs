//! Secret manifest assembly and serialization.

use serde::{Deserialize, Serialize};
use sopsgen_types::{Error, Result};

use crate::descriptor::{GeneratorDescriptor, KvMap, ObjectMeta, TypeMeta};

/// Annotation telling kustomize to append a content hash to the name.
pub const NEEDS_HASH_ANNOTATION: &str = "kustomize.config.k8s.io/needs-hash";

/// Annotation carrying the kustomize merge behavior.
pub const BEHAVIOR_ANNOTATION: &str = "kustomize.config.k8s.io/behavior";

/// A generated Kubernetes Secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretManifest {
    /// Fixed `v1`/`Secret` identity
    #[serde(flatten)]
    pub type_meta: TypeMeta,

    /// Metadata derived from the descriptor
    pub metadata: ObjectMeta,

    /// Key to base64-encoded value map; serialized even when empty
    pub data: KvMap,

    /// Secret type, omitted when empty
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub secret_type: String,
}

impl SecretManifest {
    /// Assemble the Secret from descriptor metadata and resolved data.
    ///
    /// Annotations are the descriptor's own plus the computed kustomize
    /// ones; no validation happens here beyond what descriptor loading
    /// already did.
    pub fn assemble(descriptor: &GeneratorDescriptor, data: KvMap) -> Self {
        let mut annotations = descriptor.metadata.annotations.clone();
        if !descriptor.disable_name_suffix_hash {
            annotations.insert(NEEDS_HASH_ANNOTATION.to_string(), "true".to_string());
        }
        if !descriptor.behavior.is_empty() {
            annotations.insert(BEHAVIOR_ANNOTATION.to_string(), descriptor.behavior.clone());
        }

        SecretManifest {
            type_meta: TypeMeta {
                api_version: "v1".to_string(),
                kind: "Secret".to_string(),
            },
            metadata: ObjectMeta {
                name: descriptor.metadata.name.clone(),
                namespace: descriptor.metadata.namespace.clone(),
                labels: descriptor.metadata.labels.clone(),
                annotations,
            },
            data,
            secret_type: descriptor.secret_type.clone(),
        }
    }

    /// Serialize the Secret as a YAML document.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| Error::Parse(format!("cannot serialize Secret: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{API_VERSION, KIND};

    fn descriptor(extra: &str) -> GeneratorDescriptor {
        let document = format!(
            "apiVersion: {}\nkind: {}\nmetadata:\n  name: example\n{}",
            API_VERSION, KIND, extra
        );
        GeneratorDescriptor::from_bytes(document.as_bytes(), API_VERSION, KIND).unwrap()
    }

    #[test]
    fn test_needs_hash_annotation_by_default() {
        let secret = SecretManifest::assemble(&descriptor(""), KvMap::new());

        assert_eq!(
            secret.metadata.annotations.get(NEEDS_HASH_ANNOTATION),
            Some(&"true".to_string())
        );
    }

    #[test]
    fn test_needs_hash_annotation_suppressed() {
        let secret = SecretManifest::assemble(
            &descriptor("disableNameSuffixHash: true\n"),
            KvMap::new(),
        );

        assert!(!secret.metadata.annotations.contains_key(NEEDS_HASH_ANNOTATION));
    }

    #[test]
    fn test_behavior_annotation() {
        let secret = SecretManifest::assemble(&descriptor("behavior: replace\n"), KvMap::new());

        assert_eq!(
            secret.metadata.annotations.get(BEHAVIOR_ANNOTATION),
            Some(&"replace".to_string())
        );
    }

    #[test]
    fn test_descriptor_annotations_are_kept() {
        let secret = SecretManifest::assemble(
            &descriptor("  annotations:\n    team: payments\n"),
            KvMap::new(),
        );

        assert_eq!(
            secret.metadata.annotations.get("team"),
            Some(&"payments".to_string())
        );
    }

    #[test]
    fn test_type_and_namespace_pass_through() {
        let secret = SecretManifest::assemble(
            &descriptor("  namespace: prod\ntype: kubernetes.io/tls\n"),
            KvMap::new(),
        );

        assert_eq!(secret.metadata.namespace, "prod");
        assert_eq!(secret.secret_type, "kubernetes.io/tls");
    }

    #[test]
    fn test_yaml_output_shape() {
        let mut data = KvMap::new();
        data.insert("FOO".to_string(), "YmFy".to_string());
        let secret = SecretManifest::assemble(&descriptor(""), data);

        let yaml = secret.to_yaml().unwrap();
        assert!(yaml.contains("apiVersion: v1"));
        assert!(yaml.contains("kind: Secret"));
        assert!(yaml.contains("name: example"));
        assert!(yaml.contains("FOO: YmFy"));
        // no namespace or type declared, so neither key appears
        assert!(!yaml.contains("namespace:"));
        assert!(!yaml.contains("type:"));
    }

    #[test]
    fn test_empty_data_is_still_serialized() {
        let secret = SecretManifest::assemble(&descriptor(""), KvMap::new());

        let yaml = secret.to_yaml().unwrap();
        assert!(yaml.contains("data: {}"));
    }
}

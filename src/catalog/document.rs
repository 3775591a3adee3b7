//! Serialized catalog layout.
//!
//! The catalog is produced by an external build pipeline. This module only describes its shape
//! so that it can be read with `serde_json`; [`crate::catalog::CatalogIndex`] turns it into the
//! lookup structures used during analysis.

use std::{collections::BTreeMap, io::Read};

use serde::{Deserialize, Serialize};

use crate::{model::Version, Result};

/// Root of a catalog document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatalogDocument {
    /// When the catalog was last rebuilt, as written by the build pipeline.
    #[serde(default)]
    pub last_modified: Option<String>,

    /// Name of the build that produced the catalog.
    #[serde(default)]
    pub built_by: Option<String>,

    /// Every known API.
    #[serde(default)]
    pub apis: Vec<ApiDefinition>,

    /// Identities of framework assemblies, without version and culture.
    #[serde(default)]
    pub framework_assembly_identities: Vec<String>,

    /// Every target platform the catalog knows about.
    #[serde(default)]
    pub supported_targets: Vec<TargetDefinition>,
}

/// One API in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiDefinition {
    /// Doc id of the API.
    pub doc_id: String,

    /// Doc id of the enclosing API (member to type, type to namespace).
    #[serde(default)]
    pub parent: Option<String>,

    /// Platform identifier to the version the API was introduced in.
    #[serde(default)]
    pub targets: BTreeMap<String, Version>,

    /// Free-form metadata. Known keys are listed in [`crate::catalog::MetadataKey`].
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// One platform version in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TargetDefinition {
    /// Platform identifier.
    pub identifier: String,

    /// Platform version.
    pub version: Version,

    /// Released targets are visible to users; unreleased ones can still be requested
    /// explicitly.
    #[serde(default)]
    pub is_released: bool,
}

impl CatalogDocument {
    /// Parse a catalog document from JSON text.
    ///
    /// # Errors
    /// Returns [`crate::Error::JsonError`] if the text is not a valid catalog document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a catalog document from a JSON stream.
    ///
    /// # Errors
    /// Returns [`crate::Error::JsonError`] if the stream is not a valid catalog document.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document() {
        let document = CatalogDocument::from_json(
            r#"{
                "LastModified": "2024-01-01",
                "Apis": [
                    {
                        "DocId": "M:Foo.Bar",
                        "Parent": "T:Foo",
                        "Targets": { "X": "2.0" },
                        "Metadata": { "Recommended Changes": "Use Baz" }
                    }
                ],
                "FrameworkAssemblyIdentities": ["System.Runtime"],
                "SupportedTargets": [
                    { "Identifier": "X", "Version": "2.0", "IsReleased": true }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(document.last_modified.as_deref(), Some("2024-01-01"));
        assert_eq!(document.apis.len(), 1);
        assert_eq!(document.apis[0].targets["X"], Version::new(2, 0));
        assert!(document.supported_targets[0].is_released);
    }

    #[test]
    fn test_parse_rejects_bad_version() {
        let result = CatalogDocument::from_json(
            r#"{ "SupportedTargets": [ { "Identifier": "X", "Version": "two" } ] }"#,
        );
        assert!(matches!(result, Err(crate::Error::JsonError(_))));
    }

    #[test]
    fn test_empty_document() {
        let document = CatalogDocument::from_reader("{}".as_bytes()).unwrap();
        assert_eq!(document, CatalogDocument::default());
    }
}

//! API usages and the dependency graph built from them.

use std::{
    collections::{HashMap, HashSet},
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

use crate::model::{AssemblyInfo, Version};

/// Dependency graph: for every API usage, the user assemblies that invoke it.
///
/// Produced by metadata extraction outside this crate. Equality of both key and value types is
/// identity-based (see [`MemberInfo`] and [`AssemblyInfo`]).
pub type Dependencies = HashMap<MemberInfo, HashSet<AssemblyInfo>>;

/// One referenced API.
///
/// A member is identified by its doc id and the assembly that declares it; the remaining fields
/// are analysis results filled in by [`crate::engine::AnalysisEngine`].
///
/// `target_status` runs parallel to the list of requested targets: `Some(version)` is the
/// version the API was introduced in on that target, `None` means the API is unsupported there.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInfo {
    member_doc_id: String,

    #[serde(default)]
    type_doc_id: Option<String>,

    #[serde(default)]
    defined_in_assembly_identity: Option<String>,

    /// Recommended replacement, from the recommendation provider.
    #[serde(default)]
    pub recommended_changes: Option<String>,

    /// Source compatible equivalent API, from the recommendation provider.
    #[serde(default)]
    pub source_compatible_change: Option<String>,

    /// Introduced version per requested target, `None` where unsupported.
    #[serde(default)]
    pub target_status: Vec<Option<Version>>,
}

impl MemberInfo {
    /// Create a usage of `member_doc_id` declared in `defined_in_assembly_identity`.
    ///
    /// A `None` declaring assembly denotes a primitive, which is always treated as framework.
    pub fn new(
        member_doc_id: impl Into<String>,
        defined_in_assembly_identity: Option<&str>,
    ) -> Self {
        Self {
            member_doc_id: member_doc_id.into(),
            type_doc_id: None,
            defined_in_assembly_identity: defined_in_assembly_identity.map(str::to_string),
            recommended_changes: None,
            source_compatible_change: None,
            target_status: Vec::new(),
        }
    }

    /// Set the doc id of the declaring type. Leave unset for entries that denote a type.
    #[must_use]
    pub fn with_type_doc_id(mut self, type_doc_id: impl Into<String>) -> Self {
        self.type_doc_id = Some(type_doc_id.into());
        self
    }

    /// Doc id of the referenced API.
    #[must_use]
    pub fn member_doc_id(&self) -> &str {
        &self.member_doc_id
    }

    /// Doc id of the declaring type; `None` when this entry is itself a type.
    #[must_use]
    pub fn type_doc_id(&self) -> Option<&str> {
        self.type_doc_id.as_deref()
    }

    /// Display name of the assembly declaring the API.
    #[must_use]
    pub fn defined_in_assembly_identity(&self) -> Option<&str> {
        self.defined_in_assembly_identity.as_deref()
    }

    /// True if this entry denotes a type rather than a member of one.
    #[must_use]
    pub fn is_type(&self) -> bool {
        self.type_doc_id.is_none()
    }

    /// True if every entry of `target_status` is supported.
    ///
    /// A member with no status at all is vacuously supported.
    #[must_use]
    pub fn is_supported_across_targets(&self) -> bool {
        self.target_status.iter().all(Option::is_some)
    }
}

impl PartialEq for MemberInfo {
    fn eq(&self, other: &Self) -> bool {
        self.member_doc_id == other.member_doc_id
            && self.defined_in_assembly_identity == other.defined_in_assembly_identity
    }
}

impl Eq for MemberInfo {}

impl Hash for MemberInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.member_doc_id.hash(state);
        self.defined_in_assembly_identity.hash(state);
    }
}

impl fmt::Display for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.defined_in_assembly_identity {
            Some(assembly) => write!(f, "{} [{}]", self.member_doc_id, assembly),
            None => write!(f, "{}", self.member_doc_id),
        }
    }
}

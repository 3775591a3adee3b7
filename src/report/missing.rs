//! Missing APIs as presented in a report.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::{MemberInfo, Version};

/// One API that is unsupported on at least one target, with the assemblies calling it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingMemberInfo {
    doc_id: String,
    type_doc_id: Option<String>,
    defined_in_assembly_identity: Option<String>,
    recommended_changes: Option<String>,
    source_compatible_change: Option<String>,
    target_status: Vec<Option<Version>>,
    used_in: BTreeSet<String>,
}

impl MissingMemberInfo {
    pub(crate) fn new<'a, I>(member: &MemberInfo, callers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            doc_id: member.member_doc_id().to_string(),
            type_doc_id: member.type_doc_id().map(str::to_string),
            defined_in_assembly_identity: member.defined_in_assembly_identity().map(str::to_string),
            recommended_changes: member.recommended_changes.clone(),
            source_compatible_change: member.source_compatible_change.clone(),
            target_status: member.target_status.clone(),
            used_in: callers.into_iter().map(str::to_string).collect(),
        }
    }

    /// Doc id of the API.
    #[must_use]
    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }

    /// Doc id of the declaring type, `None` when the API is a type.
    #[must_use]
    pub fn type_doc_id(&self) -> Option<&str> {
        self.type_doc_id.as_deref()
    }

    /// Doc id of the type this API groups under: its declaring type, or itself.
    #[must_use]
    pub fn group_doc_id(&self) -> &str {
        self.type_doc_id.as_deref().unwrap_or(&self.doc_id)
    }

    /// Assembly declaring the API.
    #[must_use]
    pub fn defined_in_assembly_identity(&self) -> Option<&str> {
        self.defined_in_assembly_identity.as_deref()
    }

    /// Recommended replacement.
    #[must_use]
    pub fn recommended_changes(&self) -> Option<&str> {
        self.recommended_changes.as_deref()
    }

    /// Source compatible equivalent.
    #[must_use]
    pub fn source_compatible_change(&self) -> Option<&str> {
        self.source_compatible_change.as_deref()
    }

    /// Introduced version per target, `None` where unsupported.
    #[must_use]
    pub fn target_status(&self) -> &[Option<Version>] {
        &self.target_status
    }

    /// True if the API is unsupported on the target at `target_index`.
    #[must_use]
    pub fn is_missing_on(&self, target_index: usize) -> bool {
        !matches!(self.target_status.get(target_index), Some(Some(_)))
    }

    /// Identities of the assemblies calling the API. Empty when the report was built without
    /// a dependency graph.
    #[must_use]
    pub fn used_in(&self) -> &BTreeSet<String> {
        &self.used_in
    }
}

/// Missing APIs grouped by type.
///
/// A type appears here when it is missing itself, when any of its members is missing, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingTypeInfo {
    doc_id: String,
    is_type_missing: bool,
    target_status: Vec<Option<Version>>,
    recommended_changes: Option<String>,
    used_in: BTreeSet<String>,
    members: Vec<MissingMemberInfo>,
}

impl MissingTypeInfo {
    pub(crate) fn new(doc_id: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            is_type_missing: false,
            target_status: Vec::new(),
            recommended_changes: None,
            used_in: BTreeSet::new(),
            members: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, missing: &MissingMemberInfo) {
        self.used_in.extend(missing.used_in.iter().cloned());

        if missing.type_doc_id.is_none() {
            self.is_type_missing = true;
            self.target_status = missing.target_status.clone();
            self.recommended_changes = missing.recommended_changes.clone();
        } else {
            self.members.push(missing.clone());
        }
    }

    pub(crate) fn merge(&mut self, other: MissingTypeInfo) {
        if other.is_type_missing {
            self.is_type_missing = true;
            self.target_status = other.target_status;
            self.recommended_changes = other.recommended_changes;
        }
        self.used_in.extend(other.used_in);
        self.members.extend(other.members);
    }

    pub(crate) fn sort_members(&mut self) {
        self.members.sort_by(|a, b| {
            a.doc_id
                .cmp(&b.doc_id)
                .then_with(|| a.defined_in_assembly_identity.cmp(&b.defined_in_assembly_identity))
        });
    }

    /// Doc id of the type.
    #[must_use]
    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }

    /// True if the type itself is missing, not only some of its members.
    #[must_use]
    pub fn is_type_missing(&self) -> bool {
        self.is_type_missing
    }

    /// Introduced version of the type per target. Empty unless the type itself is missing.
    #[must_use]
    pub fn target_status(&self) -> &[Option<Version>] {
        &self.target_status
    }

    /// Recommended replacement for the type.
    #[must_use]
    pub fn recommended_changes(&self) -> Option<&str> {
        self.recommended_changes.as_deref()
    }

    /// Identities of the assemblies using the type or any of its missing members.
    #[must_use]
    pub fn used_in(&self) -> &BTreeSet<String> {
        &self.used_in
    }

    /// Missing members of the type, sorted by doc id.
    #[must_use]
    pub fn members(&self) -> &[MissingMemberInfo] {
        &self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing(doc_id: &str, type_doc_id: Option<&str>, callers: &[&str]) -> MissingMemberInfo {
        let mut member = MemberInfo::new(doc_id, None);
        if let Some(type_doc_id) = type_doc_id {
            member = member.with_type_doc_id(type_doc_id);
        }
        member.target_status = vec![None, Some(Version::new(2, 0))];
        MissingMemberInfo::new(&member, callers.iter().copied())
    }

    #[test]
    fn test_member_status() {
        let member = missing("M:T.A", Some("T:T"), &["App"]);
        assert!(member.is_missing_on(0));
        assert!(!member.is_missing_on(1));
        assert!(member.is_missing_on(2));
        assert_eq!(member.group_doc_id(), "T:T");
        assert_eq!(missing("T:T", None, &[]).group_doc_id(), "T:T");
    }

    #[test]
    fn test_type_grouping() {
        let mut left = MissingTypeInfo::new("T:T");
        left.add(&missing("M:T.B", Some("T:T"), &["B"]));

        let mut right = MissingTypeInfo::new("T:T");
        right.add(&missing("T:T", None, &["A"]));
        right.add(&missing("M:T.A", Some("T:T"), &["A"]));

        left.merge(right);
        left.sort_members();

        assert!(left.is_type_missing());
        assert_eq!(left.target_status().len(), 2);
        assert_eq!(left.used_in().len(), 2);
        let members: Vec<&str> = left.members().iter().map(MissingMemberInfo::doc_id).collect();
        assert_eq!(members, vec!["M:T.A", "M:T.B"]);
    }
}

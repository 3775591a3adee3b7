//! Shared fixtures for unit tests.

use std::collections::HashSet;

use crate::{
    catalog::CatalogIndex,
    model::{AssemblyInfo, Dependencies, MemberInfo},
};

/// A framework assembly listed in [`sample_catalog`].
pub(crate) const FRAMEWORK_ASSEMBLY: &str =
    "System.Runtime, Version=4.2.0.0, Culture=neutral, PublicKeyToken=b03f5f7f11d50a3a";

const SAMPLE_CATALOG: &str = r#"{
    "LastModified": "2024-05-01",
    "BuiltBy": "unit-tests",
    "Apis": [
        { "DocId": "M:Foo.Bar", "Parent": "T:Foo", "Targets": { "X": "2.0" } },
        {
            "DocId": "T:Foo",
            "Parent": "N:Root",
            "Targets": { "X": "1.0" },
            "Metadata": { "Recommended Changes": "Use Baz instead" }
        },
        { "DocId": "N:Root", "Targets": { "X": "1.0" } },
        {
            "DocId": "M:Foo.Old",
            "Targets": { "Y": "1.0" },
            "Metadata": { "SourceCompatibleEquivalent": "M:Foo.Bar" }
        }
    ],
    "FrameworkAssemblyIdentities": [
        "System.Runtime, PublicKeyToken=b03f5f7f11d50a3a"
    ],
    "SupportedTargets": [
        { "Identifier": "X", "Version": "1.0", "IsReleased": true },
        { "Identifier": "X", "Version": "2.0", "IsReleased": true },
        { "Identifier": "Y", "Version": "1.0", "IsReleased": true },
        { "Identifier": "Y", "Version": "2.0", "IsReleased": false },
        { "Identifier": "Hidden", "Version": "1.0", "IsReleased": false },
        { "Identifier": ".NET Framework", "Version": "4.5", "IsReleased": true },
        { "Identifier": ".NET Framework", "Version": "4.6", "IsReleased": true },
        { "Identifier": ".NET Framework", "Version": "4.7", "IsReleased": true }
    ]
}"#;

/// Small catalog covering every lookup path.
///
/// - `M:Foo.Bar` is on X 2.0 and inherits its recommendation from `T:Foo`
/// - `T:Foo` and `N:Root` are on X 1.0
/// - `M:Foo.Old` is only on Y 1.0, with `M:Foo.Bar` as source compatible equivalent
/// - Y 2.0 and Hidden 1.0 are unreleased
pub(crate) fn sample_catalog() -> CatalogIndex {
    CatalogIndex::from_json(SAMPLE_CATALOG).unwrap()
}

/// A member declared in [`FRAMEWORK_ASSEMBLY`].
pub(crate) fn framework_member(doc_id: &str) -> MemberInfo {
    MemberInfo::new(doc_id, Some(FRAMEWORK_ASSEMBLY))
}

/// Build a dependency graph from members and the identities of their callers.
pub(crate) fn dependencies(edges: &[(MemberInfo, &[&str])]) -> Dependencies {
    edges
        .iter()
        .map(|(member, callers)| {
            let callers: HashSet<AssemblyInfo> =
                callers.iter().map(|caller| AssemblyInfo::new(*caller)).collect();
            (member.clone(), callers)
        })
        .collect()
}

//! Package substitution suggestions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Target;

/// A package that can replace an assembly on some targets.
///
/// `supported_versions` maps each target to the package version supporting it; an empty
/// version string means the package exists but has no release for that target.
/// `assembly_info` is the identity of the assembly the package was matched against, when the
/// match was guessed from an assembly name.
///
/// Ordering is by package id first, which is the order suggestions are reported in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuGetPackageInfo {
    /// Package identifier.
    pub package_id: String,

    /// Identity of the assembly this package was matched to.
    #[serde(default)]
    pub assembly_info: Option<String>,

    /// Package version per supported target.
    #[serde(default)]
    pub supported_versions: BTreeMap<Target, String>,
}

impl NuGetPackageInfo {
    /// Create a package suggestion with no supported targets.
    pub fn new(package_id: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            assembly_info: None,
            supported_versions: BTreeMap::new(),
        }
    }

    /// Associate the suggestion with an assembly identity.
    #[must_use]
    pub fn for_assembly(mut self, assembly_identity: impl Into<String>) -> Self {
        self.assembly_info = Some(assembly_identity.into());
        self
    }

    /// Record the package version supporting `target`.
    #[must_use]
    pub fn with_version(mut self, target: Target, version: impl Into<String>) -> Self {
        self.supported_versions.insert(target, version.into());
        self
    }

    /// True if the package has a non-empty version for `target`.
    #[must_use]
    pub fn supports(&self, target: &Target) -> bool {
        self.supported_versions
            .get(target)
            .is_some_and(|version| !version.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Version;

    #[test]
    fn test_supports_requires_non_empty_version() {
        let core = Target::new(".NET Core", Version::new(2, 0));
        let net = Target::new(".NET Framework", Version::new(4, 5));
        let std = Target::new(".NET Standard", Version::new(2, 0));

        let package = NuGetPackageInfo::new("System.Drawing.Common")
            .with_version(core.clone(), "4.5.0")
            .with_version(net.clone(), "  ");

        assert!(package.supports(&core));
        assert!(!package.supports(&net));
        assert!(!package.supports(&std));
    }

    #[test]
    fn test_equality_covers_all_fields() {
        let target = Target::new(".NET Core", Version::new(2, 0));
        let a = NuGetPackageInfo::new("Pkg").with_version(target.clone(), "1.0");
        let b = NuGetPackageInfo::new("Pkg").with_version(target.clone(), "1.0");
        let c = a.clone().for_assembly("Lib");
        let d = NuGetPackageInfo::new("Pkg").with_version(target, "2.0");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_ordering_by_package_id() {
        let mut packages = vec![
            NuGetPackageInfo::new("Zeta"),
            NuGetPackageInfo::new("Alpha").for_assembly("B"),
            NuGetPackageInfo::new("Alpha").for_assembly("A"),
        ];
        packages.sort();

        assert_eq!(packages[0].package_id, "Alpha");
        assert_eq!(packages[0].assembly_info.as_deref(), Some("A"));
        assert_eq!(packages[2].package_id, "Zeta");
    }

    #[test]
    fn test_serde_target_keys() {
        let package = NuGetPackageInfo::new("Pkg")
            .with_version(Target::new(".NET Core", Version::new(2, 0)), "1.0");
        let json = serde_json::to_string(&package).unwrap();
        assert!(json.contains("\".NET Core,Version=v2.0\":\"1.0\""));

        let back: NuGetPackageInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, package);
    }
}

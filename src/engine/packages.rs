//! Package substitution lookups.

use std::{collections::HashMap, io::Read};

use crate::{
    diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics},
    model::{simple_name, NuGetPackageInfo, Target},
    Result,
};

/// Source of packages that can stand in for an assembly.
///
/// Implementations may be backed by a remote service; the analysis engine calls them from
/// worker threads, so they must be thread-safe.
pub trait PackageFinder: Send + Sync {
    /// Packages that replace `assembly_identity`, restricted to `targets`.
    ///
    /// Each returned package carries `assembly_identity` in its `assembly_info` field.
    fn find_packages(&self, assembly_identity: &str, targets: &[Target]) -> Vec<NuGetPackageInfo>;
}

/// A finder that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPackageFinder;

impl PackageFinder for NoPackageFinder {
    fn find_packages(&self, _: &str, _: &[Target]) -> Vec<NuGetPackageInfo> {
        Vec::new()
    }
}

/// In-memory package finder keyed by assembly simple name.
///
/// Simple names match case-insensitively, so `Newtonsoft.Json, Version=9.0.0.0` finds the
/// packages registered for `newtonsoft.json`.
///
/// # Examples
///
/// ```rust
/// use portscope::engine::{PackageFinder, PackageIndex};
/// use portscope::model::{NuGetPackageInfo, Target, Version};
///
/// let core = Target::new(".NET Core", Version::new(2, 0));
/// let index = PackageIndex::new().with_package(
///     "System.Drawing",
///     NuGetPackageInfo::new("System.Drawing.Common").with_version(core.clone(), "4.5.0"),
/// );
///
/// let found = index.find_packages("System.Drawing, Version=4.0.0.0", &[core]);
/// assert_eq!(found[0].package_id, "System.Drawing.Common");
/// assert_eq!(found[0].assembly_info.as_deref(), Some("System.Drawing, Version=4.0.0.0"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageIndex {
    packages: HashMap<String, Vec<NuGetPackageInfo>>,
}

impl PackageIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `package` as a replacement for the assembly named `assembly_name`.
    #[must_use]
    pub fn with_package(mut self, assembly_name: &str, package: NuGetPackageInfo) -> Self {
        self.insert(assembly_name, package);
        self
    }

    /// Register `package` as a replacement for the assembly named `assembly_name`.
    pub fn insert(&mut self, assembly_name: &str, package: NuGetPackageInfo) {
        self.packages
            .entry(simple_name(assembly_name).to_lowercase())
            .or_default()
            .push(package);
    }

    /// Build an index from a JSON array of packages, each naming the assembly it replaces in
    /// `assemblyInfo`.
    ///
    /// # Errors
    /// Returns [`crate::Error::JsonError`] if the text is not a JSON array of packages.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_with_diagnostics(json, &Diagnostics::new())
    }

    /// Same as [`PackageIndex::from_json`], reporting packages that do not name the assembly
    /// they replace into `diagnostics`. Such packages are skipped.
    ///
    /// # Errors
    /// Returns [`crate::Error::JsonError`] if the text is not a JSON array of packages.
    pub fn from_json_with_diagnostics(json: &str, diagnostics: &Diagnostics) -> Result<Self> {
        Ok(Self::from_packages(serde_json::from_str(json)?, diagnostics))
    }

    /// Same as [`PackageIndex::from_json`], reading from a stream.
    ///
    /// # Errors
    /// Returns [`crate::Error::JsonError`] if the stream is not a JSON array of packages.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::from_packages(
            serde_json::from_reader(reader)?,
            &Diagnostics::new(),
        ))
    }

    fn from_packages(packages: Vec<NuGetPackageInfo>, diagnostics: &Diagnostics) -> Self {
        let mut index = Self::new();
        for package in packages {
            match package.assembly_info.clone() {
                Some(assembly) => index.insert(&assembly, package),
                None => diagnostics.push(Diagnostic::new(
                    DiagnosticSeverity::Warning,
                    DiagnosticCategory::Package,
                    format!(
                        "Package '{}' does not name an assembly, skipping",
                        package.package_id
                    ),
                )),
            }
        }
        index
    }

    /// Number of assembly names with registered packages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// True if no packages are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl PackageFinder for PackageIndex {
    fn find_packages(&self, assembly_identity: &str, targets: &[Target]) -> Vec<NuGetPackageInfo> {
        let Some(packages) = self
            .packages
            .get(&simple_name(assembly_identity).to_lowercase())
        else {
            return Vec::new();
        };

        packages
            .iter()
            .map(|package| NuGetPackageInfo {
                package_id: package.package_id.clone(),
                assembly_info: Some(assembly_identity.to_string()),
                supported_versions: package
                    .supported_versions
                    .iter()
                    .filter(|(target, _)| targets.contains(target))
                    .map(|(target, version)| (target.clone(), version.clone()))
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Version;

    fn core() -> Target {
        Target::new(".NET Core", Version::new(2, 0))
    }

    fn framework() -> Target {
        Target::new(".NET Framework", Version::new(4, 7))
    }

    #[test]
    fn test_lookup_is_case_insensitive_on_simple_name() {
        let index = PackageIndex::new().with_package(
            "Newtonsoft.Json",
            NuGetPackageInfo::new("Newtonsoft.Json").with_version(core(), "12.0.1"),
        );

        let found = index.find_packages("newtonsoft.json, Version=9.0.0.0", &[core()]);
        assert_eq!(found.len(), 1);
        assert!(found[0].supports(&core()));
        assert!(index.find_packages("Other", &[core()]).is_empty());
    }

    #[test]
    fn test_results_restricted_to_requested_targets() {
        let index = PackageIndex::new().with_package(
            "Lib",
            NuGetPackageInfo::new("Lib.Package")
                .with_version(core(), "1.0")
                .with_version(framework(), "1.0"),
        );

        let found = index.find_packages("Lib", &[core()]);
        assert_eq!(found[0].supported_versions.len(), 1);
        assert!(!found[0].supports(&framework()));
    }

    #[test]
    fn test_from_json() {
        let index = PackageIndex::from_json(
            r#"[
                { "packageId": "Lib.Package", "assemblyInfo": "Lib",
                  "supportedVersions": { ".NET Core,Version=v2.0": "1.0" } },
                { "packageId": "Orphan" }
            ]"#,
        )
        .unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index.find_packages("Lib", &[core()])[0].package_id, "Lib.Package");
    }

    #[test]
    fn test_orphan_package_is_reported() {
        let diagnostics = Diagnostics::new();
        let index = PackageIndex::from_json_with_diagnostics(
            r#"[ { "packageId": "Orphan" }, { "packageId": "Lib.Package", "assemblyInfo": "Lib" } ]"#,
            &diagnostics,
        )
        .unwrap();

        assert_eq!(index.len(), 1);
        let reported = diagnostics.by_category(DiagnosticCategory::Package);
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].severity, DiagnosticSeverity::Warning);
        assert!(reported[0].message.contains("Orphan"));
    }

    #[test]
    fn test_no_package_finder() {
        assert!(NoPackageFinder.find_packages("Lib", &[core()]).is_empty());
    }
}

//! The finished report.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{
    model::{simple_name, AnalyzeRequestFlags, BreakingChangeDependency, NuGetPackageInfo, Target},
    report::{AssemblyUsageInfo, MissingMemberInfo, MissingTypeInfo},
};

/// Aggregated result of one analysis, as consumed by report writers.
///
/// A `ReportingResult` is only ever handed out by [`crate::report::ReportGenerator`] once all of
/// its aggregation has finished, and it has no mutating methods. Any number of writers may read
/// the same result concurrently.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingResult {
    pub(crate) submission_id: String,
    pub(crate) targets: Vec<Target>,
    pub(crate) request_flags: AnalyzeRequestFlags,
    pub(crate) referenced_types: BTreeSet<String>,
    pub(crate) missing_dependencies: Vec<MissingMemberInfo>,
    pub(crate) missing_types: Vec<MissingTypeInfo>,
    pub(crate) unresolved_assemblies: BTreeMap<String, BTreeSet<String>>,
    pub(crate) unresolved_user_assemblies: Vec<String>,
    pub(crate) assemblies_with_errors: Vec<String>,
    pub(crate) assembly_usage: Vec<AssemblyUsageInfo>,
    pub(crate) assembly_name_map: BTreeMap<String, String>,
    pub(crate) nuget_packages: Vec<NuGetPackageInfo>,
    pub(crate) breaking_changes: Vec<BreakingChangeDependency>,
}

impl ReportingResult {
    /// Identifier of the submission the report belongs to.
    #[must_use]
    pub fn submission_id(&self) -> &str {
        &self.submission_id
    }

    /// Targets, in the order every per-target list of the report follows.
    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Options the analysis ran with.
    #[must_use]
    pub fn request_flags(&self) -> AnalyzeRequestFlags {
        self.request_flags
    }

    /// Doc ids of all types referenced by the analyzed code, missing or not.
    #[must_use]
    pub fn referenced_types(&self) -> &BTreeSet<String> {
        &self.referenced_types
    }

    /// Every missing API, sorted by doc id.
    #[must_use]
    pub fn missing_dependencies(&self) -> &[MissingMemberInfo] {
        &self.missing_dependencies
    }

    /// Missing APIs unsupported on the target at `target_index`.
    #[must_use]
    pub fn missing_dependencies_for(&self, target_index: usize) -> Vec<&MissingMemberInfo> {
        self.missing_dependencies
            .iter()
            .filter(|missing| missing.is_missing_on(target_index))
            .collect()
    }

    /// Missing APIs grouped by type, sorted by type doc id.
    #[must_use]
    pub fn missing_types(&self) -> &[MissingTypeInfo] {
        &self.missing_types
    }

    /// Unresolved assemblies and the assemblies referencing them.
    #[must_use]
    pub fn unresolved_assemblies(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.unresolved_assemblies
    }

    /// Unresolved assemblies that are neither framework nor user assemblies.
    #[must_use]
    pub fn unresolved_user_assemblies(&self) -> &[String] {
        &self.unresolved_user_assemblies
    }

    /// Assemblies that failed to load.
    #[must_use]
    pub fn assemblies_with_errors(&self) -> &[String] {
        &self.assemblies_with_errors
    }

    /// Usage statistics per calling assembly, sorted by identity.
    #[must_use]
    pub fn assembly_usage(&self) -> &[AssemblyUsageInfo] {
        &self.assembly_usage
    }

    /// Display name per assembly identity.
    #[must_use]
    pub fn assembly_name_map(&self) -> &BTreeMap<String, String> {
        &self.assembly_name_map
    }

    /// Display name of an assembly: its simple name, unless another assembly in the report
    /// shares that simple name, in which case the full identity.
    #[must_use]
    pub fn display_name<'a>(&'a self, assembly_identity: &'a str) -> &'a str {
        self.assembly_name_map
            .get(assembly_identity)
            .map_or_else(|| simple_name(assembly_identity), String::as_str)
    }

    /// Package suggestions, sorted.
    #[must_use]
    pub fn nuget_packages(&self) -> &[NuGetPackageInfo] {
        &self.nuget_packages
    }

    /// Breaking changes reached by user code.
    #[must_use]
    pub fn breaking_changes(&self) -> &[BreakingChangeDependency] {
        &self.breaking_changes
    }

    /// Breaking changes grouped by calling assembly identity.
    #[must_use]
    pub fn breaking_changes_by_assembly(&self) -> BTreeMap<&str, Vec<&BreakingChangeDependency>> {
        let mut grouped: BTreeMap<&str, Vec<&BreakingChangeDependency>> = BTreeMap::new();
        for dependency in &self.breaking_changes {
            grouped
                .entry(dependency.dependant_assembly.assembly_identity())
                .or_default()
                .push(dependency);
        }
        grouped
    }
}

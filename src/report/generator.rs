//! Aggregation of analysis results into a [`ReportingResult`].

use std::collections::{BTreeMap, BTreeSet, HashMap};

use dashmap::DashMap;
use rayon::prelude::*;

use crate::{
    model::{
        simple_name, AnalyzeRequestFlags, AssemblyInfo, BreakingChangeDependency, Dependencies,
        MemberInfo, NuGetPackageInfo, Target, Version,
    },
    report::{AssemblyUsageInfo, MissingMemberInfo, MissingTypeInfo, ReportingResult},
};

static NO_UNRESOLVED: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

/// Everything the report is computed from.
///
/// Only `targets` and `submission_id` are required; the remaining inputs default to empty.
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    /// Requested targets.
    pub targets: &'a [Target],
    /// Submission identifier.
    pub submission_id: &'a str,
    /// Options the analysis ran with.
    pub request_flags: AnalyzeRequestFlags,
    /// The full dependency graph. Without it, missing APIs are not attributed to callers and
    /// no usage statistics are produced.
    pub all_dependencies: Option<&'a Dependencies>,
    /// Output of [`crate::engine::AnalysisEngine::find_members_not_in_targets`].
    pub missing_dependencies: &'a [MemberInfo],
    /// Unresolved assemblies and the assemblies referencing them.
    pub unresolved_assemblies: &'a BTreeMap<String, BTreeSet<String>>,
    /// Unresolved assemblies that are neither framework nor user assemblies.
    pub unresolved_user_assemblies: &'a [String],
    /// Assemblies that failed to load.
    pub assemblies_with_errors: &'a [String],
    /// Package suggestions.
    pub nuget_packages: &'a [NuGetPackageInfo],
    /// Breaking changes reached by user code.
    pub breaking_changes: &'a [BreakingChangeDependency],
}

impl<'a> ReportInput<'a> {
    /// Input with no results yet.
    #[must_use]
    pub fn new(targets: &'a [Target], submission_id: &'a str) -> Self {
        Self {
            targets,
            submission_id,
            request_flags: AnalyzeRequestFlags::default(),
            all_dependencies: None,
            missing_dependencies: &[],
            unresolved_assemblies: &NO_UNRESOLVED,
            unresolved_user_assemblies: &[],
            assemblies_with_errors: &[],
            nuget_packages: &[],
            breaking_changes: &[],
        }
    }

    /// Set the request flags.
    #[must_use]
    pub fn with_request_flags(mut self, flags: AnalyzeRequestFlags) -> Self {
        self.request_flags = flags;
        self
    }

    /// Set the dependency graph.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: &'a Dependencies) -> Self {
        self.all_dependencies = Some(dependencies);
        self
    }

    /// Set the missing members.
    #[must_use]
    pub fn with_missing_dependencies(mut self, missing: &'a [MemberInfo]) -> Self {
        self.missing_dependencies = missing;
        self
    }

    /// Set the unresolved assemblies.
    #[must_use]
    pub fn with_unresolved_assemblies(
        mut self,
        unresolved: &'a BTreeMap<String, BTreeSet<String>>,
    ) -> Self {
        self.unresolved_assemblies = unresolved;
        self
    }

    /// Set the unresolved user assemblies.
    #[must_use]
    pub fn with_unresolved_user_assemblies(mut self, unresolved: &'a [String]) -> Self {
        self.unresolved_user_assemblies = unresolved;
        self
    }

    /// Set the assemblies that failed to load.
    #[must_use]
    pub fn with_assemblies_with_errors(mut self, assemblies: &'a [String]) -> Self {
        self.assemblies_with_errors = assemblies;
        self
    }

    /// Set the package suggestions.
    #[must_use]
    pub fn with_nuget_packages(mut self, packages: &'a [NuGetPackageInfo]) -> Self {
        self.nuget_packages = packages;
        self
    }

    /// Set the breaking changes.
    #[must_use]
    pub fn with_breaking_changes(mut self, breaking_changes: &'a [BreakingChangeDependency]) -> Self {
        self.breaking_changes = breaking_changes;
        self
    }
}

/// Builds [`ReportingResult`]s.
///
/// Missing APIs are attributed to their callers in parallel, with each worker grouping into
/// its own partial map; the partial maps are merged once all workers have finished. Usage
/// counters are accumulated in a `DashMap` keyed by [`AssemblyInfo`], so every instance
/// describing the same assembly feeds the same counters. The result is assembled only after
/// both passes have joined.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportGenerator;

impl ReportGenerator {
    /// Create a generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Aggregate `input` into a report.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use portscope::model::{AssemblyInfo, Dependencies, MemberInfo, Target, Version};
    /// use portscope::report::{ReportGenerator, ReportInput};
    /// use std::collections::HashSet;
    ///
    /// let caller = AssemblyInfo::new("App, Version=1.0");
    /// let mut missing = MemberInfo::new("M:Foo.Bar", None);
    /// missing.target_status = vec![None];
    ///
    /// let mut dependencies = Dependencies::new();
    /// dependencies.insert(missing.clone(), HashSet::from([caller.clone()]));
    ///
    /// let targets = [Target::new("X", Version::new(1, 0))];
    /// let missing = [missing];
    /// let report = ReportGenerator::new().compute_report(
    ///     ReportInput::new(&targets, "1")
    ///         .with_dependencies(&dependencies)
    ///         .with_missing_dependencies(&missing),
    /// );
    ///
    /// assert_eq!(report.missing_dependencies()[0].used_in().len(), 1);
    /// assert_eq!(report.assembly_usage()[0].usage_data()[0].unavailable_api_calls, 1);
    /// assert_eq!(report.display_name("App, Version=1.0"), "App");
    /// ```
    #[must_use]
    pub fn compute_report(&self, input: ReportInput<'_>) -> ReportingResult {
        let referenced_types: BTreeSet<String> = input
            .all_dependencies
            .map(|dependencies| {
                dependencies
                    .keys()
                    .filter(|member| member.is_type())
                    .map(|member| member.member_doc_id().to_string())
                    .collect()
            })
            .unwrap_or_default();

        let missing_dependencies = Self::attribute_missing(&input);
        let missing_types = Self::group_by_type(&missing_dependencies);

        let assembly_usage = match input.all_dependencies {
            Some(dependencies) => {
                Self::compute_usage(input.targets, dependencies, input.missing_dependencies)
            }
            None => Vec::new(),
        };

        let assembly_name_map = Self::compute_name_map(
            assembly_usage
                .iter()
                .map(|usage| usage.source_assembly().assembly_identity())
                .chain(
                    missing_dependencies
                        .iter()
                        .flat_map(|missing| missing.used_in().iter().map(String::as_str)),
                ),
        );

        let mut nuget_packages = input.nuget_packages.to_vec();
        nuget_packages.sort();

        log::debug!(
            "Report {}: {} missing APIs in {} types, {} assemblies",
            input.submission_id,
            missing_dependencies.len(),
            missing_types.len(),
            assembly_usage.len()
        );

        ReportingResult {
            submission_id: input.submission_id.to_string(),
            targets: input.targets.to_vec(),
            request_flags: input.request_flags,
            referenced_types,
            missing_dependencies,
            missing_types,
            unresolved_assemblies: input.unresolved_assemblies.clone(),
            unresolved_user_assemblies: input.unresolved_user_assemblies.to_vec(),
            assemblies_with_errors: input.assemblies_with_errors.to_vec(),
            assembly_usage,
            assembly_name_map,
            nuget_packages,
            breaking_changes: input.breaking_changes.to_vec(),
        }
    }

    fn attribute_missing(input: &ReportInput<'_>) -> Vec<MissingMemberInfo> {
        let mut missing: Vec<MissingMemberInfo> = input
            .missing_dependencies
            .par_iter()
            .map(|member| {
                let callers = input
                    .all_dependencies
                    .and_then(|dependencies| dependencies.get(member))
                    .into_iter()
                    .flatten()
                    .map(AssemblyInfo::assembly_identity);
                MissingMemberInfo::new(member, callers)
            })
            .collect();

        missing.sort_by(|a, b| {
            a.doc_id()
                .cmp(b.doc_id())
                .then_with(|| a.defined_in_assembly_identity().cmp(&b.defined_in_assembly_identity()))
        });
        missing
    }

    fn group_by_type(missing: &[MissingMemberInfo]) -> Vec<MissingTypeInfo> {
        let grouped: BTreeMap<String, MissingTypeInfo> = missing
            .par_iter()
            .fold(BTreeMap::new, |mut partial: BTreeMap<String, MissingTypeInfo>, member| {
                partial
                    .entry(member.group_doc_id().to_string())
                    .or_insert_with(|| MissingTypeInfo::new(member.group_doc_id()))
                    .add(member);
                partial
            })
            .reduce(BTreeMap::new, |mut left, right| {
                for (doc_id, type_info) in right {
                    match left.get_mut(&doc_id) {
                        Some(existing) => existing.merge(type_info),
                        None => {
                            left.insert(doc_id, type_info);
                        }
                    }
                }
                left
            });

        grouped
            .into_values()
            .map(|mut type_info| {
                type_info.sort_members();
                type_info
            })
            .collect()
    }

    fn compute_usage(
        targets: &[Target],
        dependencies: &Dependencies,
        missing: &[MemberInfo],
    ) -> Vec<AssemblyUsageInfo> {
        let status: HashMap<&MemberInfo, &[Option<Version>]> = missing
            .iter()
            .map(|member| (member, member.target_status.as_slice()))
            .collect();

        let usage: DashMap<AssemblyInfo, AssemblyUsageInfo> = DashMap::new();

        dependencies.par_iter().for_each(|(member, callers)| {
            let availability: Vec<bool> = match status.get(member) {
                None => vec![true; targets.len()],
                Some(target_status) => targets
                    .iter()
                    .enumerate()
                    .map(|(index, target)| {
                        matches!(target_status.get(index), Some(Some(introduced)) if introduced <= target.version())
                    })
                    .collect(),
            };

            for caller in callers {
                let mut entry = usage
                    .entry(caller.clone())
                    .or_insert_with(|| AssemblyUsageInfo::new(caller.clone(), targets.len()));
                for (index, available) in availability.iter().enumerate() {
                    entry.record(index, *available);
                }
            }
        });

        let mut usage: Vec<AssemblyUsageInfo> = usage.into_iter().map(|(_, info)| info).collect();
        usage.sort_by(|a, b| {
            let (a, b) = (a.source_assembly(), b.source_assembly());
            a.assembly_identity()
                .cmp(b.assembly_identity())
                .then_with(|| a.target_framework_moniker().cmp(&b.target_framework_moniker()))
        });
        usage
    }

    fn compute_name_map<'a>(identities: impl Iterator<Item = &'a str>) -> BTreeMap<String, String> {
        let mut by_simple_name: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for identity in identities {
            by_simple_name
                .entry(simple_name(identity))
                .or_default()
                .insert(identity);
        }

        let mut names = BTreeMap::new();
        for (simple, identities) in by_simple_name {
            let ambiguous = identities.len() > 1;
            for identity in identities {
                let display = if ambiguous { identity } else { simple };
                names.insert(identity.to_string(), display.to_string());
            }
        }
        names
    }
}

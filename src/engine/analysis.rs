//! Core portability analysis over a dependency graph.
//!
//! Every operation is a pure function of its arguments and the collaborators held by the
//! [`AnalysisEngine`]; one engine serves any number of requests concurrently.

use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
    sync::Arc,
};

use rayon::prelude::*;

use crate::{
    catalog::{BreakingChangeIndex, CatalogIndex, CatalogRecommendations, RecommendationProvider},
    config::FULL_FRAMEWORK_IDENTIFIER,
    engine::{NoPackageFinder, PackageFinder},
    model::{
        strip_version_and_culture, AssemblyInfo, BreakingChangeDependency, Dependencies,
        IgnoreAssemblyInfo, MemberInfo, NuGetPackageInfo, Target, Version,
    },
};

/// Classifies API usages against a catalog.
///
/// The engine holds the catalog, a recommendation provider, a package finder and the
/// breaking change index. It keeps no per-request state.
///
/// # Examples
///
/// ```rust
/// use portscope::catalog::CatalogIndex;
/// use portscope::engine::AnalysisEngine;
/// use portscope::model::{AssemblyInfo, Dependencies, MemberInfo, Target, Version};
/// use std::collections::HashSet;
/// use std::sync::Arc;
///
/// let catalog = Arc::new(CatalogIndex::from_json(r#"{
///     "Apis": [ { "DocId": "M:Foo.Bar", "Targets": { "X": "2.0" } } ],
///     "SupportedTargets": [ { "Identifier": "X", "Version": "2.0", "IsReleased": true } ]
/// }"#)?);
/// let engine = AnalysisEngine::new(catalog);
///
/// let mut dependencies = Dependencies::new();
/// dependencies.insert(
///     MemberInfo::new("M:Foo.Bar", None),
///     HashSet::from([AssemblyInfo::new("App, Version=1.0")]),
/// );
///
/// let targets = [Target::new("X", Version::new(1, 0))];
/// let missing = engine.find_members_not_in_targets(&targets, &HashSet::new(), &dependencies);
/// assert_eq!(missing.len(), 1);
/// assert_eq!(missing[0].target_status, vec![None]);
/// # Ok::<(), portscope::Error>(())
/// ```
#[derive(Clone)]
pub struct AnalysisEngine {
    catalog: Arc<CatalogIndex>,
    recommendations: Arc<dyn RecommendationProvider>,
    package_finder: Arc<dyn PackageFinder>,
    breaking_changes: Arc<BreakingChangeIndex>,
    full_framework_identifier: String,
}

impl AnalysisEngine {
    /// Create an engine with catalog recommendations, no package finder and no breaking
    /// changes.
    pub fn new(catalog: Arc<CatalogIndex>) -> Self {
        Self {
            recommendations: Arc::new(CatalogRecommendations::new(Arc::clone(&catalog))),
            catalog,
            package_finder: Arc::new(NoPackageFinder),
            breaking_changes: Arc::new(BreakingChangeIndex::default()),
            full_framework_identifier: FULL_FRAMEWORK_IDENTIFIER.to_string(),
        }
    }

    /// Replace the recommendation provider.
    #[must_use]
    pub fn with_recommendations(mut self, provider: Arc<dyn RecommendationProvider>) -> Self {
        self.recommendations = provider;
        self
    }

    /// Replace the package finder.
    #[must_use]
    pub fn with_package_finder(mut self, finder: Arc<dyn PackageFinder>) -> Self {
        self.package_finder = finder;
        self
    }

    /// Replace the breaking change index.
    #[must_use]
    pub fn with_breaking_changes(mut self, index: Arc<BreakingChangeIndex>) -> Self {
        self.breaking_changes = index;
        self
    }

    /// Replace the platform family breaking changes are evaluated against.
    #[must_use]
    pub fn with_full_framework_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.full_framework_identifier = identifier.into();
        self
    }

    /// The catalog this engine analyzes against.
    #[must_use]
    pub fn catalog(&self) -> &Arc<CatalogIndex> {
        &self.catalog
    }

    /// Identities of a set of user assemblies, for the `submitted` arguments below.
    #[must_use]
    pub fn submitted_identities(user_assemblies: &[AssemblyInfo]) -> HashSet<String> {
        user_assemblies
            .iter()
            .map(|assembly| assembly.assembly_identity().to_string())
            .collect()
    }

    /// True if `member` is a framework API rather than user code.
    ///
    /// A member declared in one of the `submitted` assemblies is never framework, whatever the
    /// catalog says. A member without a declaring assembly is a primitive and always framework.
    /// Otherwise the declaring assembly (without version and culture) must be a framework
    /// assembly and the doc id must be in the catalog.
    #[must_use]
    pub fn member_is_in_framework(&self, member: &MemberInfo, submitted: &HashSet<String>) -> bool {
        let Some(defined_in) = member.defined_in_assembly_identity() else {
            return true;
        };

        if submitted.contains(defined_in) {
            return false;
        }

        self.catalog
            .is_framework_assembly(&strip_version_and_culture(defined_in))
            && self.catalog.is_framework_member(member.member_doc_id())
    }

    /// Framework members that are unsupported on at least one of `targets`.
    ///
    /// Members the catalog does not list on any released target are left out, since there is
    /// nothing useful to say about them. Each returned member carries its per-target status
    /// and recommendations. The result is sorted by doc id, then declaring assembly.
    #[must_use]
    pub fn find_members_not_in_targets(
        &self,
        targets: &[Target],
        submitted: &HashSet<String>,
        dependencies: &Dependencies,
    ) -> Vec<MemberInfo> {
        let mut missing: Vec<MemberInfo> = dependencies
            .par_iter()
            .filter_map(|(member, _)| self.check_member(member, targets, submitted))
            .collect();

        missing.sort_by(compare_members);
        log::debug!(
            "{} of {} members are not supported on every target",
            missing.len(),
            dependencies.len()
        );
        missing
    }

    fn check_member(
        &self,
        member: &MemberInfo,
        targets: &[Target],
        submitted: &HashSet<String>,
    ) -> Option<MemberInfo> {
        if !self.member_is_in_framework(member, submitted) {
            return None;
        }

        let doc_id = member.member_doc_id();
        if self.catalog.supported_versions(doc_id).is_empty() {
            return None;
        }

        let target_status: Vec<Option<Version>> = targets
            .iter()
            .map(|target| self.target_status(doc_id, target))
            .collect();

        if target_status.iter().all(Option::is_some) {
            return None;
        }

        let mut missing = member.clone();
        missing.target_status = target_status;
        missing.recommended_changes = self.recommendations.recommended_change(doc_id);
        missing.source_compatible_change = self.recommendations.source_compatible_change(doc_id);
        Some(missing)
    }

    /// Introduced version of `doc_id` on `target`, retrying once with its source-compatible
    /// equivalent.
    fn target_status(&self, doc_id: &str, target: &Target) -> Option<Version> {
        let membership = self.catalog.is_member_in_target(doc_id, target);
        if membership.is_supported() {
            return membership.introduced_version();
        }

        let equivalent = self.catalog.source_compatibility_equivalent(doc_id)?;
        let membership = self.catalog.is_member_in_target(equivalent, target);
        if membership.is_supported() {
            membership.introduced_version()
        } else {
            None
        }
    }

    /// Breaking changes reached by user code, one entry per change, calling assembly and
    /// member.
    ///
    /// Only evaluated when `targets` contains the full-framework family. A change applies when
    /// at least one requested full-framework version lies in its window. Retargeting-only
    /// changes are included only with `show_retargeting`. Changes listed in `suppress_ids` and
    /// calls from ignored assemblies are dropped. The result is sorted by change id, calling
    /// assembly and member.
    #[must_use]
    pub fn find_breaking_changes(
        &self,
        targets: &[Target],
        dependencies: &Dependencies,
        assemblies_to_ignore: &[IgnoreAssemblyInfo],
        suppress_ids: &[String],
        submitted: &HashSet<String>,
        show_retargeting: bool,
    ) -> Vec<BreakingChangeDependency> {
        let framework_versions: Vec<Version> = targets
            .iter()
            .filter(|target| target.is_identifier(&self.full_framework_identifier))
            .map(|target| *target.version())
            .collect();

        if framework_versions.is_empty() {
            return Vec::new();
        }

        let suppressed: HashSet<&str> = suppress_ids.iter().map(String::as_str).collect();

        let mut found: Vec<BreakingChangeDependency> = dependencies
            .par_iter()
            .filter(|(member, _)| self.member_is_in_framework(member, submitted))
            .flat_map_iter(|(member, callers)| {
                self.breaking_changes
                    .for_api(member.member_doc_id())
                    .iter()
                    .filter(|change| show_retargeting || !change.is_retargeting)
                    .filter(|change| !suppressed.contains(change.id.as_str()))
                    .filter(|change| {
                        framework_versions
                            .iter()
                            .any(|version| change.applies_to(version))
                    })
                    .flat_map(move |change| {
                        callers
                            .iter()
                            .filter(move |caller| {
                                !assemblies_to_ignore.iter().any(|ignore| {
                                    ignore.matches(caller.assembly_identity(), targets)
                                })
                            })
                            .map(move |caller| BreakingChangeDependency {
                                breaking_change: (**change).clone(),
                                dependant_assembly: caller.clone(),
                                member: member.clone(),
                            })
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        found.sort_by(|a, b| {
            a.breaking_change
                .id
                .cmp(&b.breaking_change.id)
                .then_with(|| {
                    a.dependant_assembly
                        .assembly_identity()
                        .cmp(b.dependant_assembly.assembly_identity())
                })
                .then_with(|| compare_members(&a.member, &b.member))
        });
        found
    }

    /// User assemblies excluded from breaking change analysis by an ignore entry.
    #[must_use]
    pub fn find_breaking_change_skipped_assemblies(
        &self,
        targets: &[Target],
        user_assemblies: &[AssemblyInfo],
        assemblies_to_ignore: &[IgnoreAssemblyInfo],
    ) -> Vec<AssemblyInfo> {
        user_assemblies
            .iter()
            .filter(|assembly| {
                assemblies_to_ignore
                    .iter()
                    .any(|ignore| ignore.matches(assembly.assembly_identity(), targets))
            })
            .cloned()
            .collect()
    }

    /// Unresolved assemblies that belong neither to the framework nor to the user's set.
    #[must_use]
    pub fn find_unreferenced_assemblies<I, S>(
        &self,
        unresolved: I,
        user_assemblies: &[AssemblyInfo],
    ) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        unresolved
            .into_iter()
            .filter_map(|identity| {
                let identity = identity.as_ref();
                let is_user = user_assemblies
                    .iter()
                    .any(|assembly| assembly.assembly_identity().eq_ignore_ascii_case(identity));
                if is_user
                    || self
                        .catalog
                        .is_framework_assembly(&strip_version_and_culture(identity))
                {
                    None
                } else {
                    Some(identity.to_string())
                }
            })
            .collect()
    }

    /// User assemblies that can be dropped from the analysis because packages cover them.
    ///
    /// An assembly is removed only when it was not explicitly specified and, for every
    /// requested target, some package for it has a non-empty version. An empty target list
    /// removes nothing, even for assemblies that have packages.
    #[must_use]
    pub fn compute_assemblies_to_remove(
        &self,
        user_assemblies: &[AssemblyInfo],
        targets: &[Target],
        packages: &[NuGetPackageInfo],
    ) -> HashSet<AssemblyInfo> {
        if targets.is_empty() {
            return HashSet::new();
        }

        let mut by_assembly: HashMap<&str, Vec<&NuGetPackageInfo>> = HashMap::new();
        for package in packages {
            if let Some(assembly) = package.assembly_info.as_deref() {
                by_assembly.entry(assembly).or_default().push(package);
            }
        }

        user_assemblies
            .iter()
            .filter(|assembly| !assembly.is_explicitly_specified())
            .filter(|assembly| {
                by_assembly
                    .get(assembly.assembly_identity())
                    .is_some_and(|candidates| {
                        targets
                            .iter()
                            .all(|target| candidates.iter().any(|package| package.supports(target)))
                    })
            })
            .cloned()
            .collect()
    }

    /// Package suggestions for user assemblies.
    #[must_use]
    pub fn nuget_packages_for_assemblies(
        &self,
        user_assemblies: &[AssemblyInfo],
        targets: &[Target],
    ) -> Vec<NuGetPackageInfo> {
        let identities: Vec<&str> = user_assemblies
            .iter()
            .map(AssemblyInfo::assembly_identity)
            .collect();
        self.find_packages(&identities, targets)
    }

    /// Package suggestions for unresolved assemblies.
    #[must_use]
    pub fn nuget_packages_for_unresolved<S: AsRef<str>>(
        &self,
        unresolved: &[S],
        targets: &[Target],
    ) -> Vec<NuGetPackageInfo> {
        let identities: Vec<&str> = unresolved.iter().map(AsRef::as_ref).collect();
        self.find_packages(&identities, targets)
    }

    fn find_packages(&self, identities: &[&str], targets: &[Target]) -> Vec<NuGetPackageInfo> {
        let mut packages: Vec<NuGetPackageInfo> = identities
            .par_iter()
            .flat_map_iter(|identity| self.package_finder.find_packages(identity, targets))
            .collect();
        packages.sort();
        packages.dedup();
        packages
    }

    /// Remove calls from `assemblies_to_remove` out of the graph.
    ///
    /// Members left without callers are dropped. Filtering is idempotent.
    #[must_use]
    pub fn filter_dependencies(
        &self,
        dependencies: &Dependencies,
        assemblies_to_remove: &HashSet<AssemblyInfo>,
    ) -> Dependencies {
        if assemblies_to_remove.is_empty() {
            return dependencies.clone();
        }

        dependencies
            .iter()
            .filter_map(|(member, callers)| {
                let remaining: HashSet<AssemblyInfo> =
                    callers.difference(assemblies_to_remove).cloned().collect();
                (!remaining.is_empty()).then(|| (member.clone(), remaining))
            })
            .collect()
    }
}

impl std::fmt::Debug for AnalysisEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisEngine")
            .field("apis", &self.catalog.api_count())
            .field("breaking_changes", &self.breaking_changes.len())
            .field("full_framework_identifier", &self.full_framework_identifier)
            .finish_non_exhaustive()
    }
}

fn compare_members(a: &MemberInfo, b: &MemberInfo) -> Ordering {
    a.member_doc_id()
        .cmp(b.member_doc_id())
        .then_with(|| {
            a.defined_in_assembly_identity()
                .cmp(&b.defined_in_assembly_identity())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::BreakingChange,
        test::{dependencies, framework_member, sample_catalog, FRAMEWORK_ASSEMBLY},
    };

    fn engine() -> AnalysisEngine {
        AnalysisEngine::new(Arc::new(sample_catalog()))
    }

    fn x(major: u32) -> Target {
        Target::new("X", Version::new(major, 0))
    }

    fn net(minor: u32) -> Target {
        Target::new(".NET Framework", Version::new(4, minor))
    }

    #[test]
    fn test_member_is_in_framework() {
        let engine = engine();
        let none = HashSet::new();

        assert!(engine.member_is_in_framework(&MemberInfo::new("M:Whatever", None), &none));
        assert!(engine.member_is_in_framework(&framework_member("M:Foo.Bar"), &none));
        // Declaring assembly matches but the doc id is unknown
        assert!(!engine.member_is_in_framework(&framework_member("M:Not.There"), &none));
        assert!(!engine.member_is_in_framework(
            &MemberInfo::new("M:Foo.Bar", Some("MyLib, Version=1.0")),
            &none
        ));
    }

    #[test]
    fn test_framework_identity_keys_any_case() {
        let engine = engine();
        let member = MemberInfo::new(
            "M:Foo.Bar",
            Some("System.Runtime, version=4.2.0.0, culture=neutral, publickeytoken=b03f5f7f11d50a3a"),
        );

        assert!(engine.member_is_in_framework(&member, &HashSet::new()));
        let graph = dependencies(&[(member, &["App"])]);
        let missing = engine.find_members_not_in_targets(&[x(1)], &HashSet::new(), &graph);
        assert_eq!(missing.len(), 1);
    }

    #[test]
    fn test_submitted_assembly_is_never_framework() {
        let engine = engine();
        let member = framework_member("M:Foo.Bar");
        let submitted = HashSet::from([FRAMEWORK_ASSEMBLY.to_string()]);

        assert!(!engine.member_is_in_framework(&member, &submitted));
        let missing =
            engine.find_members_not_in_targets(&[x(1)], &submitted, &dependencies(&[(member, &["App"])]));
        assert!(missing.is_empty());
    }

    #[test]
    fn test_find_members_not_in_targets() {
        let engine = engine();
        let graph = dependencies(&[
            (MemberInfo::new("M:Foo.Bar", None), &["App, Version=1.0"]),
            (MemberInfo::new("T:Foo", None), &["App, Version=1.0"]),
            (MemberInfo::new("M:Unknown", None), &["App, Version=1.0"]),
        ]);

        let missing = engine.find_members_not_in_targets(&[x(1), x(2)], &HashSet::new(), &graph);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].member_doc_id(), "M:Foo.Bar");
        assert_eq!(missing[0].target_status, vec![None, Some(Version::new(2, 0))]);
        assert!(!missing[0].is_supported_across_targets());
        assert_eq!(missing[0].recommended_changes.as_deref(), Some("Use Baz instead"));

        assert!(engine
            .find_members_not_in_targets(&[x(2)], &HashSet::new(), &graph)
            .is_empty());
    }

    #[test]
    fn test_source_compatible_retry() {
        let engine = engine();
        let graph = dependencies(&[(MemberInfo::new("M:Foo.Old", None), &["App"])]);

        // Not on X itself, but its equivalent M:Foo.Bar is on X 2.0
        assert!(engine
            .find_members_not_in_targets(&[x(2)], &HashSet::new(), &graph)
            .is_empty());

        let missing = engine.find_members_not_in_targets(&[x(1)], &HashSet::new(), &graph);
        assert_eq!(missing[0].target_status, vec![None]);
        assert_eq!(missing[0].source_compatible_change.as_deref(), Some("M:Foo.Bar"));
    }

    #[test]
    fn test_output_is_sorted() {
        let engine = engine();
        let graph = dependencies(&[
            (MemberInfo::new("M:Foo.Old", None), &["App"]),
            (MemberInfo::new("M:Foo.Bar", None), &["App"]),
        ]);

        let missing = engine.find_members_not_in_targets(&[x(1)], &HashSet::new(), &graph);
        let ids: Vec<&str> = missing.iter().map(MemberInfo::member_doc_id).collect();
        assert_eq!(ids, vec!["M:Foo.Bar", "M:Foo.Old"]);
    }

    fn breaking_engine(retargeting: bool) -> AnalysisEngine {
        let mut change = BreakingChange::new("100", Version::new(4, 5));
        change.version_fixed = Some(Version::new(4, 7));
        change.is_retargeting = retargeting;
        change.applicable_apis.insert("M:Foo.Bar".to_string());

        engine().with_breaking_changes(Arc::new(BreakingChangeIndex::new(vec![change])))
    }

    #[test]
    fn test_breaking_changes_window_and_fan_out() {
        let engine = breaking_engine(false);
        let graph = dependencies(&[(framework_member("M:Foo.Bar"), &["A", "B"])]);
        let none = HashSet::new();

        let found = engine.find_breaking_changes(&[net(6)], &graph, &[], &[], &none, false);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].dependant_assembly.assembly_identity(), "A");
        assert_eq!(found[1].dependant_assembly.assembly_identity(), "B");

        assert!(engine
            .find_breaking_changes(&[net(7)], &graph, &[], &[], &none, false)
            .is_empty());
        assert_eq!(
            engine
                .find_breaking_changes(&[net(4), net(5)], &graph, &[], &[], &none, false)
                .len(),
            2
        );
        // Not a full-framework target
        assert!(engine
            .find_breaking_changes(&[x(1)], &graph, &[], &[], &none, false)
            .is_empty());
    }

    #[test]
    fn test_breaking_changes_filters() {
        let graph = dependencies(&[(framework_member("M:Foo.Bar"), &["A", "B"])]);
        let none = HashSet::new();

        let retargeting = breaking_engine(true);
        assert!(retargeting
            .find_breaking_changes(&[net(5)], &graph, &[], &[], &none, false)
            .is_empty());
        assert_eq!(
            retargeting
                .find_breaking_changes(&[net(5)], &graph, &[], &[], &none, true)
                .len(),
            2
        );

        let engine = breaking_engine(false);
        assert!(engine
            .find_breaking_changes(&[net(5)], &graph, &[], &["100".to_string()], &none, false)
            .is_empty());

        let ignore = [IgnoreAssemblyInfo::new("a")];
        let found = engine.find_breaking_changes(&[net(5)], &graph, &ignore, &[], &none, false);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].dependant_assembly.assembly_identity(), "B");
    }

    #[test]
    fn test_skipped_assemblies() {
        let engine = engine();
        let users = [AssemblyInfo::new("A"), AssemblyInfo::new("B")];
        let ignore = [
            IgnoreAssemblyInfo::new("a"),
            IgnoreAssemblyInfo::new("B").for_targets(&[net(5)]),
        ];

        let skipped = engine.find_breaking_change_skipped_assemblies(&[net(5)], &users, &ignore);
        assert_eq!(skipped.len(), 2);

        let skipped =
            engine.find_breaking_change_skipped_assemblies(&[net(5), net(6)], &users, &ignore);
        assert_eq!(skipped, vec![AssemblyInfo::new("A")]);
    }

    #[test]
    fn test_unreferenced_assemblies() {
        let engine = engine();
        let users = [AssemblyInfo::new("Mine, Version=1.0")];
        let unresolved = [
            "System.Runtime, Version=4.2.0.0, Culture=neutral, PublicKeyToken=b03f5f7f11d50a3a",
            "mine, Version=1.0",
            "ThirdParty, Version=3.0",
        ];

        assert_eq!(
            engine.find_unreferenced_assemblies(unresolved, &users),
            vec!["ThirdParty, Version=3.0".to_string()]
        );
    }

    #[test]
    fn test_compute_assemblies_to_remove() {
        let engine = engine();
        let users = [
            AssemblyInfo::new("Covered"),
            AssemblyInfo::new("Explicit").explicitly_specified(true),
            AssemblyInfo::new("Partial"),
        ];
        let packages = [
            NuGetPackageInfo::new("P1")
                .for_assembly("Covered")
                .with_version(x(1), "1.0"),
            NuGetPackageInfo::new("P2")
                .for_assembly("Covered")
                .with_version(x(2), "1.0"),
            NuGetPackageInfo::new("P3")
                .for_assembly("Explicit")
                .with_version(x(1), "1.0")
                .with_version(x(2), "1.0"),
            NuGetPackageInfo::new("P4")
                .for_assembly("Partial")
                .with_version(x(1), "1.0")
                .with_version(x(2), ""),
        ];

        let removed = engine.compute_assemblies_to_remove(&users, &[x(1), x(2)], &packages);
        assert_eq!(removed, HashSet::from([AssemblyInfo::new("Covered")]));
        assert!(engine
            .compute_assemblies_to_remove(&users, &[], &packages)
            .is_empty());
    }

    #[test]
    fn test_filter_dependencies_is_idempotent() {
        let engine = engine();
        let graph = dependencies(&[
            (MemberInfo::new("M:A", None), &["Keep", "Drop"]),
            (MemberInfo::new("M:B", None), &["Drop"]),
        ]);

        assert_eq!(engine.filter_dependencies(&graph, &HashSet::new()), graph);

        let remove = HashSet::from([AssemblyInfo::new("Drop")]);
        let once = engine.filter_dependencies(&graph, &remove);
        let twice = engine.filter_dependencies(&once, &remove);

        assert_eq!(once, twice);
        assert_eq!(once.len(), 1);
        assert_eq!(
            once[&MemberInfo::new("M:A", None)],
            HashSet::from([AssemblyInfo::new("Keep")])
        );
    }

    #[test]
    fn test_package_lookups_are_sorted_and_unique() {
        let finder = crate::engine::PackageIndex::new()
            .with_package("Lib", NuGetPackageInfo::new("Zeta").with_version(x(1), "1.0"))
            .with_package("Lib", NuGetPackageInfo::new("Alpha").with_version(x(1), "1.0"));
        let engine = engine().with_package_finder(Arc::new(finder));

        let found = engine.nuget_packages_for_unresolved(&["Lib", "Lib"], &[x(1)]);
        let ids: Vec<&str> = found.iter().map(|p| p.package_id.as_str()).collect();
        assert_eq!(ids, vec!["Alpha", "Zeta"]);

        let found = engine.nuget_packages_for_assemblies(&[AssemblyInfo::new("Lib")], &[x(1)]);
        assert_eq!(found.len(), 2);
    }
}

//! End-to-end handling of one analysis request.

use std::{collections::HashSet, sync::Arc};

use crate::{
    config::AnalysisConfig,
    diagnostics::{Diagnostic, Diagnostics},
    engine::{AnalysisEngine, DependencyOrderer, TargetResolver},
    model::{
        AnalyzeRequest, AnalyzeRequestFlags, AnalyzeResponse, IgnoreAssemblyInfo, NuGetPackageInfo,
    },
    report::{ReportGenerator, ReportInput, ReportingResult},
    Result,
};

/// Everything produced for one request.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    /// The response.
    pub response: AnalyzeResponse,
    /// The aggregated report.
    pub report: ReportingResult,
    /// Soft issues found while handling the request.
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs the full analysis pipeline for requests.
///
/// Targets are resolved first; an unknown target fails the request before any other work is
/// done. The remaining steps never fail and report oddities as diagnostics.
///
/// # Examples
///
/// ```rust
/// use portscope::catalog::CatalogIndex;
/// use portscope::engine::{AnalysisEngine, RequestAnalyzer};
/// use portscope::model::{AnalyzeRequest, AssemblyInfo, MemberInfo};
/// use portscope::AnalysisConfig;
/// use std::collections::HashSet;
/// use std::sync::Arc;
///
/// let catalog = Arc::new(CatalogIndex::from_json(r#"{
///     "Apis": [ { "DocId": "M:Foo.Bar", "Targets": { "X": "2.0" } } ],
///     "SupportedTargets": [
///         { "Identifier": "X", "Version": "1.0", "IsReleased": true },
///         { "Identifier": "X", "Version": "2.0", "IsReleased": true }
///     ]
/// }"#)?);
/// let analyzer = RequestAnalyzer::new(
///     AnalysisEngine::new(catalog),
///     AnalysisConfig::default().with_default_targets("X"),
/// );
///
/// let mut request = AnalyzeRequest::default();
/// request.targets = vec!["X, Version=1.0".to_string()];
/// request.dependencies.insert(
///     MemberInfo::new("M:Foo.Bar", None),
///     HashSet::from([AssemblyInfo::new("App, Version=1.0")]),
/// );
///
/// let response = analyzer.analyze(&request, "submission-1")?;
/// assert_eq!(response.missing_dependencies.len(), 1);
/// # Ok::<(), portscope::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RequestAnalyzer {
    engine: AnalysisEngine,
    resolver: TargetResolver,
    generator: ReportGenerator,
    config: AnalysisConfig,
}

impl RequestAnalyzer {
    /// Create an analyzer. Default targets are resolved against the engine's catalog now.
    pub fn new(engine: AnalysisEngine, config: AnalysisConfig) -> Self {
        let engine = engine.with_full_framework_identifier(config.full_framework_identifier.clone());
        let resolver =
            TargetResolver::from_config(Arc::clone(engine.catalog()), &config, &Diagnostics::new());

        Self {
            engine,
            resolver,
            generator: ReportGenerator::new(),
            config,
        }
    }

    /// The engine requests are analyzed with.
    #[must_use]
    pub fn engine(&self) -> &AnalysisEngine {
        &self.engine
    }

    /// The resolver request targets are resolved with.
    #[must_use]
    pub fn resolver(&self) -> &TargetResolver {
        &self.resolver
    }

    /// Analyze `request`.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownTarget`] if a requested target is not in the catalog.
    pub fn analyze(&self, request: &AnalyzeRequest, submission_id: &str) -> Result<AnalyzeResponse> {
        Ok(self.analyze_with_report(request, submission_id)?.response)
    }

    /// Analyze `request` and aggregate the report.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownTarget`] if a requested target is not in the catalog.
    pub fn analyze_with_report(
        &self,
        request: &AnalyzeRequest,
        submission_id: &str,
    ) -> Result<AnalysisOutput> {
        let targets = self
            .resolver
            .map_targets_to_explicit_versions(&request.targets)?;

        log::debug!(
            "Analyzing '{}' ({} members, {} assemblies) against {} targets",
            request.application_name,
            request.dependencies.len(),
            request.user_assemblies.len(),
            targets.len()
        );

        let diagnostics = Arc::new(Diagnostics::new());
        let flags = request.request_flags;
        let engine = &self.engine;

        let mut assemblies_to_ignore: Vec<IgnoreAssemblyInfo> = request.assemblies_to_ignore.clone();
        if !flags.contains(AnalyzeRequestFlags::NO_DEFAULT_IGNORE_FILE) {
            assemblies_to_ignore.extend(self.config.default_ignored_assemblies.iter().cloned());
        }

        let submitted = AnalysisEngine::submitted_identities(&request.user_assemblies);

        let user_packages = engine.nuget_packages_for_assemblies(&request.user_assemblies, &targets);
        let assemblies_to_remove =
            engine.compute_assemblies_to_remove(&request.user_assemblies, &targets, &user_packages);
        let dependencies = engine.filter_dependencies(&request.dependencies, &assemblies_to_remove);

        let missing_dependencies = if flags.contains(AnalyzeRequestFlags::SHOW_NON_PORTABLE_APIS) {
            engine.find_members_not_in_targets(&targets, &submitted, &dependencies)
        } else {
            Vec::new()
        };

        let unresolved_user_assemblies = engine.find_unreferenced_assemblies(
            request.unresolved_assemblies.keys(),
            &request.user_assemblies,
        );

        let (breaking_changes, breaking_change_skipped_assemblies) =
            if flags.contains(AnalyzeRequestFlags::SHOW_BREAKING_CHANGES) {
                (
                    engine.find_breaking_changes(
                        &targets,
                        &dependencies,
                        &assemblies_to_ignore,
                        &request.breaking_changes_to_suppress,
                        &submitted,
                        flags.contains(AnalyzeRequestFlags::SHOW_RETARGETING_ISSUES),
                    ),
                    engine.find_breaking_change_skipped_assemblies(
                        &targets,
                        &request.user_assemblies,
                        &assemblies_to_ignore,
                    ),
                )
            } else {
                (Vec::new(), Vec::new())
            };

        let removed_identities: HashSet<&str> = assemblies_to_remove
            .iter()
            .map(|assembly| assembly.assembly_identity())
            .collect();
        let mut nuget_packages: Vec<NuGetPackageInfo> = engine
            .nuget_packages_for_unresolved(&unresolved_user_assemblies, &targets)
            .into_iter()
            .chain(user_packages.into_iter().filter(|package| {
                package
                    .assembly_info
                    .as_deref()
                    .is_some_and(|assembly| removed_identities.contains(assembly))
            }))
            .collect();
        nuget_packages.sort();
        nuget_packages.dedup();

        let recommended_order = DependencyOrderer::new(Arc::clone(&diagnostics))
            .get_order(request.entry_point.as_deref(), &request.user_assemblies);

        let report = self.generator.compute_report(
            ReportInput::new(&targets, submission_id)
                .with_request_flags(flags)
                .with_dependencies(&dependencies)
                .with_missing_dependencies(&missing_dependencies)
                .with_unresolved_assemblies(&request.unresolved_assemblies)
                .with_unresolved_user_assemblies(&unresolved_user_assemblies)
                .with_assemblies_with_errors(&request.assemblies_with_errors)
                .with_nuget_packages(&nuget_packages)
                .with_breaking_changes(&breaking_changes),
        );

        let response = AnalyzeResponse {
            submission_id: submission_id.to_string(),
            application_name: request.application_name.clone(),
            catalog_last_updated: engine.catalog().last_modified().map(str::to_string),
            targets,
            missing_dependencies,
            unresolved_user_assemblies,
            breaking_changes,
            breaking_change_skipped_assemblies,
            recommended_order,
            nuget_packages,
            request_flags: flags,
        };

        Ok(AnalysisOutput {
            response,
            report,
            diagnostics: diagnostics.to_vec(),
        })
    }
}

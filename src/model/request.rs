//! Analysis requests and responses.

use std::collections::{BTreeMap, BTreeSet};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::model::{
    AssemblyInfo, BreakingChangeDependency, Dependencies, IgnoreAssemblyInfo, MemberInfo,
    NuGetPackageInfo, Target,
};

bitflags! {
    /// Options controlling which parts of an analysis run.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct AnalyzeRequestFlags: u32 {
        /// Report APIs that are not available on every requested target.
        const SHOW_NON_PORTABLE_APIS = 0x0001;
        /// Report breaking changes for the full-framework family.
        const SHOW_BREAKING_CHANGES = 0x0002;
        /// Include breaking changes that only apply when retargeting.
        const SHOW_RETARGETING_ISSUES = 0x0004;
        /// Do not merge the configured default ignore list into the request.
        const NO_DEFAULT_IGNORE_FILE = 0x0008;
    }
}

impl Default for AnalyzeRequestFlags {
    fn default() -> Self {
        Self::SHOW_NON_PORTABLE_APIS
    }
}

/// Input of one analysis request.
///
/// Everything in here is produced by metadata extraction and the caller's options; the request
/// is consumed read-only by [`crate::engine::RequestAnalyzer`].
#[derive(Debug, Clone, Default)]
pub struct AnalyzeRequest {
    /// Name of the analyzed application, echoed into the response.
    pub application_name: String,

    /// User-specified target strings. Empty means the configured defaults.
    pub targets: Vec<String>,

    /// API usages and their calling assemblies.
    pub dependencies: Dependencies,

    /// Assemblies discovered or supplied for analysis.
    pub user_assemblies: Vec<AssemblyInfo>,

    /// Assemblies that could not be resolved, with the assemblies referencing them.
    pub unresolved_assemblies: BTreeMap<String, BTreeSet<String>>,

    /// Assemblies that failed to load.
    pub assemblies_with_errors: Vec<String>,

    /// Assemblies excluded from breaking change analysis.
    pub assemblies_to_ignore: Vec<IgnoreAssemblyInfo>,

    /// Breaking change ids that must not be reported.
    pub breaking_changes_to_suppress: Vec<String>,

    /// Simple name of the entry point assembly, used to order the report.
    pub entry_point: Option<String>,

    /// Analysis options.
    pub request_flags: AnalyzeRequestFlags,
}

/// Result of one analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    /// Identifier of the submission this response answers.
    pub submission_id: String,

    /// Name of the analyzed application.
    pub application_name: String,

    /// Last-modified stamp of the catalog used.
    pub catalog_last_updated: Option<String>,

    /// Resolved targets, in the order statuses are reported.
    pub targets: Vec<Target>,

    /// APIs not supported on at least one target.
    pub missing_dependencies: Vec<MemberInfo>,

    /// Unresolved assemblies that are neither framework nor user assemblies.
    pub unresolved_user_assemblies: Vec<String>,

    /// Breaking changes reached by user code.
    pub breaking_changes: Vec<BreakingChangeDependency>,

    /// Assemblies excluded from breaking change analysis.
    pub breaking_change_skipped_assemblies: Vec<AssemblyInfo>,

    /// User assembly identities in dependency order from the entry point.
    pub recommended_order: Vec<String>,

    /// Package suggestions for removed and unresolved assemblies.
    pub nuget_packages: Vec<NuGetPackageInfo>,

    /// Options the analysis ran with.
    pub request_flags: AnalyzeRequestFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request() {
        let request = AnalyzeRequest::default();
        assert_eq!(
            request.request_flags,
            AnalyzeRequestFlags::SHOW_NON_PORTABLE_APIS
        );
        assert!(request.targets.is_empty());
        assert!(request.entry_point.is_none());
    }

    #[test]
    fn test_flags_serde() {
        let flags =
            AnalyzeRequestFlags::SHOW_BREAKING_CHANGES | AnalyzeRequestFlags::SHOW_NON_PORTABLE_APIS;
        let json = serde_json::to_string(&flags).unwrap();
        let back: AnalyzeRequestFlags = serde_json::from_str(&json).unwrap();
        assert_eq!(back, flags);
        assert!(back.contains(AnalyzeRequestFlags::SHOW_BREAKING_CHANGES));
        assert!(!back.contains(AnalyzeRequestFlags::SHOW_RETARGETING_ISSUES));
    }
}

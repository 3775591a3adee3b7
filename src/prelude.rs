//! # portscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the portscope library. Import this module to get quick access to the essential
//! types for portability analysis.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all portscope operations
pub use crate::Error;

/// The result type used throughout portscope
pub use crate::Result;

/// Service-level analysis settings
pub use crate::AnalysisConfig;

// ================================================================================================
// Catalog
// ================================================================================================

/// API availability lookups
pub use crate::catalog::{CatalogIndex, Membership};

/// Breaking changes and replacement advice
pub use crate::catalog::{BreakingChangeIndex, CatalogRecommendations, RecommendationProvider};

// ================================================================================================
// Analysis
// ================================================================================================

/// Main entry points for analyzing requests
pub use crate::engine::{AnalysisEngine, AnalysisOutput, RequestAnalyzer, TargetResolver};

/// Assembly ordering
pub use crate::engine::DependencyOrderer;

/// Package substitution
pub use crate::engine::{NoPackageFinder, PackageFinder, PackageIndex};

// ================================================================================================
// Data Model
// ================================================================================================

/// Versions, targets and identities
pub use crate::model::{AssemblyName, Target, Version};

/// Request and response types
pub use crate::model::{
    AnalyzeRequest, AnalyzeRequestFlags, AnalyzeResponse, AssemblyInfo, BreakingChange,
    BreakingChangeDependency, Dependencies, IgnoreAssemblyInfo, MemberInfo, NuGetPackageInfo,
};

// ================================================================================================
// Reports and Diagnostics
// ================================================================================================

/// Report aggregation and output
pub use crate::report::{
    JsonReportWriter, ReportGenerator, ReportInput, ReportWriter, ReportingResult,
};

/// Soft issues collected during analysis
pub use crate::diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics};

//! Portability reports.
//!
//! The [`ReportGenerator`] turns the output of the analysis engine into a [`ReportingResult`]:
//! missing APIs attributed to their callers and grouped by type, per-assembly usage statistics
//! against every target, and a display-name map that disambiguates assemblies sharing a simple
//! name. Report writers consume the finished result through the [`ReportWriter`] trait.
//!
//! # Key Components
//!
//! - [`ReportGenerator`] and [`ReportInput`] - Aggregation
//! - [`ReportingResult`] - Immutable report
//! - [`MissingMemberInfo`] and [`MissingTypeInfo`] - Missing APIs
//! - [`AssemblyUsageInfo`] and [`UsageData`] - Call counts per assembly and target
//! - [`ReportWriter`] and [`JsonReportWriter`] - Output formats

mod generator;
mod missing;
mod result;
mod usage;
mod writer;

pub use generator::{ReportGenerator, ReportInput};
pub use missing::{MissingMemberInfo, MissingTypeInfo};
pub use result::ReportingResult;
pub use usage::{AssemblyUsageInfo, UsageData};
pub use writer::{JsonReportWriter, ReportWriter, ResultFormatInformation};

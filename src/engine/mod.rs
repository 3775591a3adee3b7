//! Portability analysis.
//!
//! This module turns a dependency graph extracted from user binaries into analysis results:
//! which APIs are missing on which targets, which breaking changes user code reaches, which
//! assemblies packages can replace, and the order user assemblies depend on each other in.
//!
//! # Architecture
//!
//! - [`TargetResolver`] resolves the requested target strings against the catalog. It is the
//!   only step that can fail a request.
//! - [`AnalysisEngine`] performs the per-request computations. It is stateless and shared.
//! - [`DependencyOrderer`] orders user assemblies from the entry point.
//! - [`RequestAnalyzer`] drives all of the above for one [`crate::model::AnalyzeRequest`] and
//!   hands the results to the [`crate::report::ReportGenerator`].
//!
//! Package substitution goes through the [`PackageFinder`] trait; [`PackageIndex`] is an
//! in-memory implementation and [`NoPackageFinder`] disables the feature.
//!
//! # Thread Safety
//!
//! Every type here is [`Send`] and [`Sync`]. The per-member work of the engine runs on the
//! rayon thread pool.

mod analysis;
mod orderer;
mod packages;
mod request;
mod targets;

pub use analysis::AnalysisEngine;
pub use orderer::DependencyOrderer;
pub use packages::{NoPackageFinder, PackageFinder, PackageIndex};
pub use request::{AnalysisOutput, RequestAnalyzer};
pub use targets::TargetResolver;

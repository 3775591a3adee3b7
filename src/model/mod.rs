//! Data model shared by the catalog, the analysis engine and the report generator.
//!
//! # Key Components
//!
//! ## Identity
//! - [`Version`] - Dotted version with zero-padded comparison
//! - [`Target`] - Platform identifier and version, case-insensitive on the identifier
//! - [`AssemblyName`] - Parsed assembly display name
//!
//! ## Analysis Inputs
//! - [`AssemblyInfo`] - User assembly, equal by identity and target framework moniker
//! - [`MemberInfo`] - Referenced API, equal by doc id and declaring assembly
//! - [`Dependencies`] - API usage to calling assemblies
//! - [`IgnoreAssemblyInfo`] - Assembly ignore list entry
//! - [`AnalyzeRequest`] and [`AnalyzeRequestFlags`]
//!
//! ## Analysis Outputs
//! - [`BreakingChange`] and [`BreakingChangeDependency`]
//! - [`NuGetPackageInfo`] - Package substitution suggestion
//! - [`AnalyzeResponse`]
//!
//! # Thread Safety
//!
//! Every type in this module is [`Send`] and [`Sync`]. `AssemblyInfo` memoizes its hash in a
//! `OnceLock`, so even the lazily computed state is safe to share.

mod assembly;
mod breaking;
mod identity;
mod member;
mod package;
mod request;
mod target;
mod version;

pub use assembly::{AssemblyInfo, IgnoreAssemblyInfo};
pub use breaking::{BreakingChange, BreakingChangeDependency, BreakingChangeImpact};
pub use identity::{simple_name, strip_version_and_culture, AssemblyName};
pub use member::{Dependencies, MemberInfo};
pub use package::NuGetPackageInfo;
pub use request::{AnalyzeRequest, AnalyzeRequestFlags, AnalyzeResponse};
pub use target::Target;
pub use version::Version;

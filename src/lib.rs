// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(clippy::too_many_arguments)]

//! # portscope
//!
//! [![Crates.io](https://img.shields.io/crates/v/portscope.svg)](https://crates.io/crates/portscope)
//! [![Documentation](https://docs.rs/portscope/badge.svg)](https://docs.rs/portscope)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/portscope/blob/main/LICENSE-APACHE)
//!
//! API portability analysis for .NET assemblies. Given the APIs an application calls and a
//! catalog of which APIs exist on which versioned target platforms, `portscope` computes what is
//! missing on each requested target, which breaking changes the application reaches, which of
//! its dependencies a package can replace, and per-assembly portability statistics.
//!
//! Metadata extraction from binaries is not part of this crate; the input is an
//! [`model::AnalyzeRequest`] holding the already extracted dependency graph.
//!
//! ## Features
//!
//! - **📚 Catalog lookup** - Indexed API availability with parent-chain recommendations
//! - **🎯 Target resolution** - Bare platform names resolve to their latest released version
//! - **🔍 Missing API detection** - Parallel per-member analysis with source-compatible fallbacks
//! - **⚠️ Breaking changes** - Version-window matching with ignore lists and suppression
//! - **📦 Package substitution** - Assemblies replaceable by packages drop out of the analysis
//! - **📊 Reports** - Usage statistics, type grouping and deterministic ordering
//!
//! ## Quick Start
//!
//! ```rust
//! use portscope::prelude::*;
//! use std::collections::HashSet;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(CatalogIndex::from_json(r#"{
//!     "Apis": [
//!         { "DocId": "T:Foo", "Targets": { "X": "1.0" } },
//!         { "DocId": "M:Foo.Bar", "Parent": "T:Foo", "Targets": { "X": "2.0" } }
//!     ],
//!     "SupportedTargets": [
//!         { "Identifier": "X", "Version": "1.0", "IsReleased": true },
//!         { "Identifier": "X", "Version": "2.0", "IsReleased": true }
//!     ]
//! }"#)?);
//!
//! let analyzer = RequestAnalyzer::new(
//!     AnalysisEngine::new(catalog),
//!     AnalysisConfig::default().with_default_targets("X"),
//! );
//!
//! let mut request = AnalyzeRequest::default();
//! request.targets = vec!["X, Version=1.0".to_string()];
//! request.dependencies.insert(
//!     MemberInfo::new("M:Foo.Bar", None),
//!     HashSet::from([AssemblyInfo::new("App, Version=1.0.0.0")]),
//! );
//!
//! let output = analyzer.analyze_with_report(&request, "submission-1")?;
//! assert_eq!(output.response.missing_dependencies.len(), 1);
//! assert_eq!(output.report.missing_types().len(), 1);
//! # Ok::<(), portscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`catalog`] - API catalog, breaking changes and recommendations
//! - [`engine`] - Target resolution, analysis and dependency ordering
//! - [`report`] - Report aggregation and writers
//! - [`model`] - Request, response and identity types
//! - [`diagnostics`] - Soft issues collected during analysis
//! - [`config`] - Service-level settings
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Thread Safety
//!
//! The catalog is immutable after loading and is shared behind an `Arc`. Requests are
//! independent of each other and may be analyzed concurrently; inside a request the per-member
//! work runs on the rayon thread pool.
//!
//! ## Error Handling
//!
//! Only an unknown requested target fails a request, with [`Error::UnknownTarget`]. Everything
//! else that looks wrong in the input is recorded as a [`diagnostics::Diagnostic`] and the
//! analysis continues.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use portscope::prelude::*;
///
/// let target = Target::parse(".NET Core, Version=2.0")?;
/// assert_eq!(target.identifier(), ".NET Core");
/// # Ok::<(), portscope::Error>(())
/// ```
pub mod prelude;

pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod model;
pub mod report;

/// `portscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `portscope` Error type
///
/// The main error type for all operations in this crate.
pub use error::Error;

pub use config::AnalysisConfig;

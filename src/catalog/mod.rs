//! Catalog of known APIs and the platforms they are available on.
//!
//! The catalog is loaded once, indexed into a [`CatalogIndex`] and then shared read-only by
//! every analysis request through an `Arc`. Nothing in this module mutates after construction.
//!
//! # Key Components
//!
//! - [`CatalogDocument`] - Serialized catalog layout, read with `serde_json`
//! - [`CatalogIndex`] - Lookup index for API availability, targets and framework assemblies
//! - [`Membership`] - Availability of one API on one target
//! - [`MetadataKey`] - Typed catalog metadata keys
//! - [`BreakingChangeIndex`] - Breaking changes indexed by API
//! - [`RecommendationProvider`] - Replacement advice, with [`CatalogRecommendations`] reading
//!   it from catalog metadata
//!
//! # Examples
//!
//! ```rust
//! use portscope::catalog::{CatalogIndex, CatalogRecommendations, RecommendationProvider};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(CatalogIndex::from_json(r#"{
//!     "Apis": [
//!         { "DocId": "T:Foo", "Metadata": { "Recommended Changes": "Use Bar" } },
//!         { "DocId": "M:Foo.Baz", "Parent": "T:Foo", "Targets": { "X": "1.0" } }
//!     ]
//! }"#)?);
//!
//! let recommendations = CatalogRecommendations::new(Arc::clone(&catalog));
//! assert_eq!(recommendations.recommended_change("M:Foo.Baz").as_deref(), Some("Use Bar"));
//! # Ok::<(), portscope::Error>(())
//! ```

mod breaking;
mod document;
mod index;
mod metadata;
mod recommendations;

pub use breaking::BreakingChangeIndex;
pub use document::{ApiDefinition, CatalogDocument, TargetDefinition};
pub use index::{CatalogIndex, Membership};
pub use metadata::MetadataKey;
pub use recommendations::{CatalogRecommendations, RecommendationProvider};

//! Recommended replacements for unavailable APIs.

use std::sync::Arc;

use crate::catalog::{CatalogIndex, MetadataKey};

/// Source of replacement advice attached to missing members.
pub trait RecommendationProvider: Send + Sync {
    /// Suggested change for `doc_id`, if any.
    fn recommended_change(&self, doc_id: &str) -> Option<String>;

    /// Source-compatible replacement for `doc_id`, if any.
    fn source_compatible_change(&self, doc_id: &str) -> Option<String>;
}

/// Recommendations read from catalog metadata.
///
/// A member without advice of its own inherits the advice of its type, then of its namespace;
/// the first non-blank value found wins.
#[derive(Debug, Clone)]
pub struct CatalogRecommendations {
    catalog: Arc<CatalogIndex>,
}

impl CatalogRecommendations {
    /// Create a provider reading from `catalog`.
    pub fn new(catalog: Arc<CatalogIndex>) -> Self {
        Self { catalog }
    }

    fn lookup(&self, doc_id: &str, key: MetadataKey) -> Option<String> {
        std::iter::once(doc_id)
            .chain(self.catalog.ancestors(doc_id))
            .find_map(|id| {
                self.catalog
                    .metadata(id, key)
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
            })
            .map(str::to_string)
    }
}

impl RecommendationProvider for CatalogRecommendations {
    fn recommended_change(&self, doc_id: &str) -> Option<String> {
        self.lookup(doc_id, MetadataKey::RecommendedChanges)
    }

    fn source_compatible_change(&self, doc_id: &str) -> Option<String> {
        self.lookup(doc_id, MetadataKey::SourceCompatibleEquivalent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::sample_catalog;

    #[test]
    fn test_falls_back_to_ancestors() {
        let recommendations = CatalogRecommendations::new(Arc::new(sample_catalog()));

        // Declared on the type only
        assert_eq!(
            recommendations.recommended_change("M:Foo.Bar").as_deref(),
            Some("Use Baz instead")
        );
        assert_eq!(
            recommendations.recommended_change("T:Foo").as_deref(),
            Some("Use Baz instead")
        );
        assert_eq!(recommendations.recommended_change("M:Unknown"), None);
    }

    #[test]
    fn test_blank_value_is_skipped() {
        let catalog = CatalogIndex::from_json(
            r#"{ "Apis": [
                { "DocId": "M:T.M", "Parent": "T:T", "Metadata": { "Recommended Changes": "  " } },
                { "DocId": "T:T", "Parent": "N:N" },
                { "DocId": "N:N", "Metadata": { "Recommended Changes": "namespace advice" } }
            ] }"#,
        )
        .unwrap();
        let recommendations = CatalogRecommendations::new(Arc::new(catalog));

        assert_eq!(
            recommendations.recommended_change("M:T.M").as_deref(),
            Some("namespace advice")
        );
        assert_eq!(recommendations.source_compatible_change("M:T.M"), None);
    }
}

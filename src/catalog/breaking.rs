//! Breaking change lookup by API.

use std::{
    collections::{HashMap, HashSet},
    io::Read,
    sync::Arc,
};

use crate::{model::BreakingChange, Result};

/// Breaking changes indexed by the doc ids they apply to.
///
/// Each doc id lists every change at most once, even when the source records repeat a change
/// (a change is identified by its `id`; the first record wins).
#[derive(Debug, Default)]
pub struct BreakingChangeIndex {
    by_api: HashMap<String, Vec<Arc<BreakingChange>>>,
    count: usize,
}

impl BreakingChangeIndex {
    /// Index a set of breaking change records.
    #[must_use]
    pub fn new(changes: Vec<BreakingChange>) -> Self {
        let mut by_api: HashMap<String, Vec<Arc<BreakingChange>>> = HashMap::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut ids: HashSet<String> = HashSet::new();

        for change in changes {
            let change = Arc::new(change);
            ids.insert(change.id.clone());
            for api in &change.applicable_apis {
                if seen.insert((api.clone(), change.id.clone())) {
                    by_api
                        .entry(api.clone())
                        .or_default()
                        .push(Arc::clone(&change));
                }
            }
        }

        Self {
            by_api,
            count: ids.len(),
        }
    }

    /// Parse a JSON array of breaking change records.
    ///
    /// # Errors
    /// Returns [`crate::Error::JsonError`] if the text is not a JSON array of breaking changes.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Parse a JSON array of breaking change records from a stream.
    ///
    /// # Errors
    /// Returns [`crate::Error::JsonError`] if the stream is not a JSON array of breaking changes.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::new(serde_json::from_reader(reader)?))
    }

    /// Changes that apply to `doc_id`.
    #[must_use]
    pub fn for_api(&self, doc_id: &str) -> &[Arc<BreakingChange>] {
        self.by_api.get(doc_id).map_or(&[], Vec::as_slice)
    }

    /// Number of distinct change ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// True if no changes are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

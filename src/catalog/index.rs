//! Immutable lookup index over a catalog document.

use std::{
    collections::{HashMap, HashSet},
    io::Read,
};

use rayon::prelude::*;

use crate::{
    catalog::{ApiDefinition, CatalogDocument, MetadataKey},
    diagnostics::{DiagnosticCategory, Diagnostics},
    model::{Target, Version},
    Result,
};

/// Availability of an API on one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// The doc id is unknown, or the API does not exist on the target's platform at all.
    Absent,
    /// The API exists on the target; it was introduced in the contained version.
    Supported(Version),
    /// The API exists on the platform, but only from the contained version onwards, which is
    /// later than the target's version.
    Unsupported(Version),
}

impl Membership {
    /// True if the API can be used on the target.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        matches!(self, Membership::Supported(_))
    }

    /// Version of the platform the API was introduced in, when the platform has it at all.
    #[must_use]
    pub fn introduced_version(&self) -> Option<Version> {
        match self {
            Membership::Absent => None,
            Membership::Supported(version) | Membership::Unsupported(version) => Some(*version),
        }
    }
}

#[derive(Debug, Default)]
struct ApiRecord {
    parent: Option<String>,
    /// Keyed by [`Target::identifier_key`].
    introduced: HashMap<String, Version>,
    metadata: HashMap<MetadataKey, String>,
}

impl ApiRecord {
    fn from_definition(definition: ApiDefinition, diagnostics: &Diagnostics) -> Self {
        let mut introduced: HashMap<String, Version> = HashMap::with_capacity(definition.targets.len());
        for (identifier, version) in definition.targets {
            introduced
                .entry(Target::identifier_key(&identifier))
                .and_modify(|existing| *existing = (*existing).min(version))
                .or_insert(version);
        }

        let mut metadata = HashMap::new();
        for (key, value) in definition.metadata {
            match key.parse::<MetadataKey>() {
                Ok(key) => {
                    metadata.insert(key, value);
                }
                Err(_) => {
                    log::trace!("Ignoring metadata key '{}' on {}", key, definition.doc_id);
                    diagnostics.info(
                        DiagnosticCategory::Catalog,
                        format!(
                            "Unknown metadata key '{}' on {}",
                            key, definition.doc_id
                        ),
                    );
                }
            }
        }

        Self {
            parent: definition.parent.filter(|parent| !parent.is_empty()),
            introduced,
            metadata,
        }
    }

    fn merge(&mut self, other: ApiRecord) {
        if self.parent.is_none() {
            self.parent = other.parent;
        }

        for (identifier, version) in other.introduced {
            self.introduced
                .entry(identifier)
                .and_modify(|existing| *existing = (*existing).min(version))
                .or_insert(version);
        }

        for (key, value) in other.metadata {
            self.metadata.entry(key).or_insert(value);
        }
    }
}

/// Read-only index answering "is this API available on that platform" questions.
///
/// The index is built once from a [`CatalogDocument`] and shared through an `Arc` by every
/// consumer; it has no interior mutability and is safe to query from any number of threads.
///
/// Lookups never fail: an unknown doc id, identifier or assembly is a negative answer, since
/// the catalog is not expected to cover every API user code calls.
///
/// Platform identifiers compare case-insensitively. Doc ids and framework assembly identities
/// compare ordinally.
///
/// # Examples
///
/// ```rust
/// use portscope::catalog::CatalogIndex;
/// use portscope::model::{Target, Version};
///
/// let catalog = CatalogIndex::from_json(r#"{
///     "Apis": [ { "DocId": "M:Foo.Bar", "Targets": { "X": "2.0" } } ],
///     "SupportedTargets": [
///         { "Identifier": "X", "Version": "1.0", "IsReleased": true },
///         { "Identifier": "X", "Version": "2.0", "IsReleased": true }
///     ]
/// }"#)?;
///
/// assert!(catalog.is_framework_member("M:Foo.Bar"));
/// assert!(!catalog.is_member_in_target("M:Foo.Bar", &Target::new("X", Version::new(1, 0))).is_supported());
/// assert!(catalog.is_member_in_target("M:Foo.Bar", &Target::new("x", Version::new(2, 0))).is_supported());
/// assert_eq!(catalog.latest_version("X"), Some(Version::new(2, 0)));
/// # Ok::<(), portscope::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct CatalogIndex {
    apis: HashMap<String, ApiRecord>,
    framework_assemblies: HashSet<String>,
    public_targets: Vec<Target>,
    all_targets: Vec<Target>,
    known_targets: HashSet<Target>,
    /// Keyed by [`Target::identifier_key`]; public versions take precedence.
    latest_versions: HashMap<String, Version>,
    last_modified: Option<String>,
    built_by: Option<String>,
}

impl CatalogIndex {
    /// Index a catalog document.
    #[must_use]
    pub fn from_document(document: CatalogDocument) -> Self {
        Self::from_document_with_diagnostics(document, &Diagnostics::new())
    }

    /// Index a catalog document, reporting oddities such as unknown metadata keys or APIs
    /// without a doc id into `diagnostics`.
    ///
    /// API entries are converted in parallel and then merged in document order. An API listed
    /// more than once keeps the earliest introduced version per platform and the first value of
    /// each metadata key.
    pub fn from_document_with_diagnostics(
        document: CatalogDocument,
        diagnostics: &Diagnostics,
    ) -> Self {
        let CatalogDocument {
            last_modified,
            built_by,
            apis,
            framework_assembly_identities,
            supported_targets,
        } = document;

        let records: Vec<(String, ApiRecord)> = apis
            .into_par_iter()
            .filter_map(|definition| {
                if definition.doc_id.trim().is_empty() {
                    diagnostics.warning(DiagnosticCategory::Catalog, "API entry without a doc id");
                    return None;
                }
                let doc_id = definition.doc_id.clone();
                Some((doc_id, ApiRecord::from_definition(definition, diagnostics)))
            })
            .collect();

        let mut api_map: HashMap<String, ApiRecord> = HashMap::with_capacity(records.len());
        for (doc_id, record) in records {
            match api_map.get_mut(&doc_id) {
                Some(existing) => existing.merge(record),
                None => {
                    api_map.insert(doc_id, record);
                }
            }
        }

        let mut public_targets = Vec::new();
        let mut all_targets = Vec::new();
        let mut known_targets = HashSet::new();
        for definition in supported_targets {
            let target = Target::new(definition.identifier, definition.version);
            if !known_targets.insert(target.clone()) {
                // Released flag of the first occurrence wins
                continue;
            }
            if definition.is_released {
                public_targets.push(target.clone());
            }
            all_targets.push(target);
        }

        let mut latest_versions: HashMap<String, Version> = HashMap::new();
        for target in &all_targets {
            latest_versions
                .entry(Target::identifier_key(target.identifier()))
                .and_modify(|latest| *latest = (*latest).max(*target.version()))
                .or_insert(*target.version());
        }
        let mut latest_public: HashMap<String, Version> = HashMap::new();
        for target in &public_targets {
            latest_public
                .entry(Target::identifier_key(target.identifier()))
                .and_modify(|latest| *latest = (*latest).max(*target.version()))
                .or_insert(*target.version());
        }
        latest_versions.extend(latest_public);

        log::debug!(
            "Indexed catalog with {} APIs, {} framework assemblies, {} targets ({} public)",
            api_map.len(),
            framework_assembly_identities.len(),
            all_targets.len(),
            public_targets.len()
        );

        Self {
            apis: api_map,
            framework_assemblies: framework_assembly_identities.into_iter().collect(),
            public_targets,
            all_targets,
            known_targets,
            latest_versions,
            last_modified,
            built_by,
        }
    }

    /// Parse and index a catalog document from JSON text.
    ///
    /// # Errors
    /// Returns [`crate::Error::JsonError`] if the text is not a valid catalog document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::from_document(CatalogDocument::from_json(json)?))
    }

    /// Parse and index a catalog document from a JSON stream.
    ///
    /// # Errors
    /// Returns [`crate::Error::JsonError`] if the stream is not a valid catalog document.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::from_document(CatalogDocument::from_reader(reader)?))
    }

    /// True if `assembly_identity` (without version and culture) is a framework assembly.
    #[must_use]
    pub fn is_framework_assembly(&self, assembly_identity: &str) -> bool {
        self.framework_assemblies.contains(assembly_identity)
    }

    /// True if the catalog knows the API at all.
    #[must_use]
    pub fn is_framework_member(&self, doc_id: &str) -> bool {
        self.apis.contains_key(doc_id)
    }

    /// Availability of `doc_id` on `target`.
    ///
    /// Supported iff the API lists the target's platform and the target's version is at least
    /// the introduced version.
    #[must_use]
    pub fn is_member_in_target(&self, doc_id: &str, target: &Target) -> Membership {
        let Some(record) = self.apis.get(doc_id) else {
            return Membership::Absent;
        };

        match record
            .introduced
            .get(&Target::identifier_key(target.identifier()))
        {
            Some(introduced) if target.version() >= introduced => {
                Membership::Supported(*introduced)
            }
            Some(introduced) => Membership::Unsupported(*introduced),
            None => Membership::Absent,
        }
    }

    /// Doc id of a source-compatible replacement, when the catalog records one.
    #[must_use]
    pub fn source_compatibility_equivalent(&self, doc_id: &str) -> Option<&str> {
        self.metadata(doc_id, MetadataKey::SourceCompatibleEquivalent)
    }

    /// Recommended change recorded directly on `doc_id`.
    #[must_use]
    pub fn recommended_change(&self, doc_id: &str) -> Option<&str> {
        self.metadata(doc_id, MetadataKey::RecommendedChanges)
    }

    /// Raw metadata value for a known key.
    #[must_use]
    pub fn metadata(&self, doc_id: &str, key: MetadataKey) -> Option<&str> {
        self.apis
            .get(doc_id)
            .and_then(|record| record.metadata.get(&key))
            .map(String::as_str)
    }

    /// Enclosing APIs of `doc_id`, nearest first (type, then namespace).
    ///
    /// Parent links that loop back are followed only until an id repeats.
    #[must_use]
    pub fn ancestors<'a>(&'a self, doc_id: &'a str) -> Vec<&'a str> {
        let mut ancestors = Vec::new();
        let mut seen: HashSet<&str> = HashSet::from([doc_id]);

        let mut current = doc_id;
        while let Some(parent) = self
            .apis
            .get(current)
            .and_then(|record| record.parent.as_deref())
        {
            if !seen.insert(parent) {
                break;
            }
            ancestors.push(parent);
            current = parent;
        }

        ancestors
    }

    /// Public targets on which `doc_id` is supported, in catalog order.
    #[must_use]
    pub fn supported_versions(&self, doc_id: &str) -> Vec<Target> {
        if !self.apis.contains_key(doc_id) {
            return Vec::new();
        }

        self.public_targets
            .iter()
            .filter(|target| self.is_member_in_target(doc_id, target).is_supported())
            .cloned()
            .collect()
    }

    /// Released targets, in catalog order.
    #[must_use]
    pub fn public_targets(&self) -> &[Target] {
        &self.public_targets
    }

    /// Every target, released or not, in catalog order.
    #[must_use]
    pub fn all_targets(&self) -> &[Target] {
        &self.all_targets
    }

    /// True if the catalog lists `target` (case-insensitive on the identifier).
    #[must_use]
    pub fn is_known_target(&self, target: &Target) -> bool {
        self.known_targets.contains(target)
    }

    /// Latest version of a platform: the latest released one if any, otherwise the latest
    /// unreleased one.
    #[must_use]
    pub fn latest_version(&self, identifier: &str) -> Option<Version> {
        self.latest_versions
            .get(&Target::identifier_key(identifier))
            .copied()
    }

    /// Last-modified stamp of the catalog document.
    #[must_use]
    pub fn last_modified(&self) -> Option<&str> {
        self.last_modified.as_deref()
    }

    /// Build that produced the catalog document.
    #[must_use]
    pub fn built_by(&self) -> Option<&str> {
        self.built_by.as_deref()
    }

    /// Number of distinct APIs.
    #[must_use]
    pub fn api_count(&self) -> usize {
        self.apis.len()
    }
}

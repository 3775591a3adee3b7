//! Resolution of user target strings to catalog targets.

use std::{collections::HashSet, sync::Arc};

use crate::{
    catalog::CatalogIndex,
    config::AnalysisConfig,
    diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics},
    model::{Target, Version},
    Error, Result,
};

/// Turns the target strings of a request into fully qualified catalog targets.
///
/// A target string is either a bare platform identifier (`.NET Core`), which resolves to the
/// latest version the catalog knows, or an identifier with an explicit version
/// (`.NET Core, Version=2.0`). Every resolved target must exist in the catalog.
///
/// Default targets are derived once at construction from a `;`-separated list: for every
/// released platform mentioned in the list, the latest released version. Entries the catalog
/// does not know are skipped.
///
/// # Examples
///
/// ```rust
/// use portscope::catalog::CatalogIndex;
/// use portscope::engine::TargetResolver;
/// use std::sync::Arc;
///
/// let catalog = Arc::new(CatalogIndex::from_json(r#"{
///     "SupportedTargets": [
///         { "Identifier": "X", "Version": "1.0", "IsReleased": true },
///         { "Identifier": "X", "Version": "2.0", "IsReleased": true }
///     ]
/// }"#)?);
///
/// let resolver = TargetResolver::new(catalog, "X;Unknown");
/// assert_eq!(resolver.default_targets()[0].full_name(), "X,Version=v2.0");
///
/// let targets = resolver.map_targets_to_explicit_versions(&["x, Version=1.0"])?;
/// assert_eq!(targets[0].full_name(), "X,Version=v1.0");
/// assert!(resolver.map_targets_to_explicit_versions(&["NotARealPlatform"]).is_err());
/// # Ok::<(), portscope::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TargetResolver {
    catalog: Arc<CatalogIndex>,
    default_targets: Vec<Target>,
}

impl TargetResolver {
    /// Create a resolver with the given default target list.
    pub fn new(catalog: Arc<CatalogIndex>, default_targets: &str) -> Self {
        Self::with_diagnostics(catalog, default_targets, &Diagnostics::new())
    }

    /// Create a resolver, reporting skipped default target entries into `diagnostics`.
    pub fn with_diagnostics(
        catalog: Arc<CatalogIndex>,
        default_targets: &str,
        diagnostics: &Diagnostics,
    ) -> Self {
        let config = AnalysisConfig::default().with_default_targets(default_targets);
        Self::from_config(catalog, &config, diagnostics)
    }

    /// Create a resolver for the default target list of `config`, reporting skipped entries
    /// into `diagnostics`.
    pub fn from_config(
        catalog: Arc<CatalogIndex>,
        config: &AnalysisConfig,
        diagnostics: &Diagnostics,
    ) -> Self {
        let default_targets =
            Self::compute_default_targets(&catalog, config.default_target_entries(), diagnostics);
        log::debug!(
            "Default targets: {}",
            default_targets
                .iter()
                .map(Target::full_name)
                .collect::<Vec<_>>()
                .join("; ")
        );

        Self {
            catalog,
            default_targets,
        }
    }

    fn compute_default_targets<'a>(
        catalog: &CatalogIndex,
        entries: impl Iterator<Item = &'a str>,
        diagnostics: &Diagnostics,
    ) -> Vec<Target> {
        let mut identifiers: HashSet<String> = HashSet::new();

        for entry in entries {
            match Self::resolve_candidate(catalog, entry) {
                Some(target) => {
                    identifiers.insert(Target::identifier_key(target.identifier()));
                }
                None => diagnostics.push(
                    Diagnostic::new(
                        DiagnosticSeverity::Info,
                        DiagnosticCategory::Target,
                        "Skipping unknown default target",
                    )
                    .with_target(entry),
                ),
            }
        }

        let mut seen: HashSet<String> = HashSet::new();
        catalog
            .public_targets()
            .iter()
            .filter_map(|target| {
                let key = Target::identifier_key(target.identifier());
                if !identifiers.contains(&key) || !seen.insert(key) {
                    return None;
                }
                let latest = Self::latest_public_version(catalog, target.identifier())?;
                Some(Target::new(target.identifier(), latest))
            })
            .collect()
    }

    fn latest_public_version(catalog: &CatalogIndex, identifier: &str) -> Option<Version> {
        catalog
            .public_targets()
            .iter()
            .filter(|target| target.is_identifier(identifier))
            .map(|target| *target.version())
            .max()
    }

    /// Resolve one target string to the matching catalog target, in the catalog's spelling.
    fn resolve_candidate(catalog: &CatalogIndex, name: &str) -> Option<Target> {
        let (identifier, version) = Target::split_name(name).ok()?;
        let version = match version {
            Some(version) => version,
            None => catalog.latest_version(&identifier)?,
        };

        let candidate = Target::new(identifier, version);
        catalog
            .all_targets()
            .iter()
            .find(|known| **known == candidate)
            .cloned()
    }

    /// Targets used when a request names none.
    #[must_use]
    pub fn default_targets(&self) -> &[Target] {
        &self.default_targets
    }

    /// Resolve the target strings of a request.
    ///
    /// An empty list yields the default targets. Repeated targets are kept once, at their
    /// first position.
    ///
    /// # Errors
    /// Returns [`Error::UnknownTarget`] naming the first string that does not resolve to a
    /// catalog target. No target is returned in that case.
    pub fn map_targets_to_explicit_versions<S: AsRef<str>>(
        &self,
        user_targets: &[S],
    ) -> Result<Vec<Target>> {
        if user_targets.is_empty() {
            return Ok(self.default_targets.clone());
        }

        let mut resolved: Vec<Target> = Vec::with_capacity(user_targets.len());
        for name in user_targets {
            let name = name.as_ref();
            let target = Self::resolve_candidate(&self.catalog, name)
                .ok_or_else(|| Error::UnknownTarget(name.trim().to_string()))?;

            if !resolved.contains(&target) {
                resolved.push(target);
            }
        }

        Ok(resolved)
    }
}

//! Analysis configuration.
//!
//! Settings that are fixed for the lifetime of an analysis service rather than chosen per
//! request. They are typically read from a JSON file at startup.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::{model::IgnoreAssemblyInfo, Result};

/// Platform family whose servicing history breaking changes describe.
pub const FULL_FRAMEWORK_IDENTIFIER: &str = ".NET Framework";

/// Default target list used when a request names no targets.
pub const DEFAULT_TARGETS: &str = ".NET Framework;.NET Core;.NET Standard";

/// Configuration shared by every request handled by one [`crate::engine::RequestAnalyzer`].
///
/// Missing fields fall back to [`AnalysisConfig::default`] when deserializing.
///
/// # Examples
///
/// ```rust
/// use portscope::AnalysisConfig;
///
/// let config = AnalysisConfig::from_json(r#"{ "defaultTargets": ".NET Core" }"#)?;
/// assert_eq!(config.default_targets, ".NET Core");
/// assert_eq!(config.full_framework_identifier, ".NET Framework");
/// # Ok::<(), portscope::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisConfig {
    /// `;`-separated targets analyzed when a request names none. Entries may omit the version;
    /// only the platform identifiers matter.
    pub default_targets: String,

    /// Platform family breaking changes are evaluated against.
    pub full_framework_identifier: String,

    /// Ignore entries added to every request that does not opt out with
    /// [`crate::model::AnalyzeRequestFlags::NO_DEFAULT_IGNORE_FILE`].
    pub default_ignored_assemblies: Vec<IgnoreAssemblyInfo>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_targets: DEFAULT_TARGETS.to_string(),
            full_framework_identifier: FULL_FRAMEWORK_IDENTIFIER.to_string(),
            default_ignored_assemblies: Vec::new(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    /// Returns [`crate::Error::JsonError`] if the text is not a valid configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a configuration from a JSON stream.
    ///
    /// # Errors
    /// Returns [`crate::Error::JsonError`] if the stream is not a valid configuration.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Replace the default target list.
    #[must_use]
    pub fn with_default_targets(mut self, default_targets: impl Into<String>) -> Self {
        self.default_targets = default_targets.into();
        self
    }

    /// Replace the platform family used for breaking changes.
    #[must_use]
    pub fn with_full_framework_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.full_framework_identifier = identifier.into();
        self
    }

    /// Add an entry to the default ignore list.
    #[must_use]
    pub fn with_ignored_assembly(mut self, entry: IgnoreAssemblyInfo) -> Self {
        self.default_ignored_assemblies.push(entry);
        self
    }

    /// Non-empty entries of the default target list, trimmed.
    pub fn default_target_entries(&self) -> impl Iterator<Item = &str> {
        self.default_targets
            .split(';')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(
            config.default_target_entries().collect::<Vec<_>>(),
            vec![".NET Framework", ".NET Core", ".NET Standard"]
        );
        assert_eq!(config.full_framework_identifier, FULL_FRAMEWORK_IDENTIFIER);
        assert!(config.default_ignored_assemblies.is_empty());
    }

    #[test]
    fn test_entries_skip_blanks() {
        let config = AnalysisConfig::default().with_default_targets(" A ;; B, Version=1.0 ;");
        assert_eq!(
            config.default_target_entries().collect::<Vec<_>>(),
            vec!["A", "B, Version=1.0"]
        );
    }

    #[test]
    fn test_from_json() {
        let config = AnalysisConfig::from_json(
            r#"{
                "fullFrameworkIdentifier": "Desktop",
                "defaultIgnoredAssemblies": [ { "assemblyIdentity": "Legacy" } ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.default_targets, DEFAULT_TARGETS);
        assert_eq!(config.full_framework_identifier, "Desktop");
        assert_eq!(
            config.default_ignored_assemblies,
            vec![IgnoreAssemblyInfo::new("Legacy")]
        );
    }

    #[test]
    fn test_builders_round_trip() {
        let config = AnalysisConfig::default()
            .with_full_framework_identifier("Desktop")
            .with_ignored_assembly(IgnoreAssemblyInfo::new("Legacy"));
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(AnalysisConfig::from_reader(json.as_bytes()).unwrap(), config);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            AnalysisConfig::from_json("{ \"defaultTargets\": 5 }"),
            Err(crate::Error::JsonError(_))
        ));
    }
}

//! User assemblies and assembly ignore entries.

use std::{
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{Hash, Hasher},
    sync::OnceLock,
};

use serde::{Deserialize, Serialize};

use crate::model::{identity, Target};

/// An assembly taking part in an analysis request.
///
/// Assemblies are identified by their full display name and the target framework moniker they
/// were compiled against. Two `AssemblyInfo` values describing the same `(identity, moniker)`
/// pair are equal regardless of file version, explicit-specification flag or references, so
/// distinct instances produced by metadata extraction collapse into one entry when used as map
/// keys. The report generator depends on this for its per-assembly counters.
///
/// The hash of the two identity fields is computed once and memoized. Setters for those fields
/// reset the memoized value.
///
/// # Examples
///
/// ```rust
/// use portscope::model::AssemblyInfo;
///
/// let a = AssemblyInfo::new("App, Version=1.0").with_file_version("1.0.0.42");
/// let b = AssemblyInfo::new("App, Version=1.0").explicitly_specified(true);
/// assert_eq!(a, b);
/// assert_eq!(a.simple_name(), "App");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyInfo {
    assembly_identity: String,

    #[serde(default)]
    file_version: Option<String>,

    #[serde(default)]
    target_framework_moniker: Option<String>,

    #[serde(default)]
    is_explicitly_specified: bool,

    /// Full identities of the assemblies this assembly references.
    #[serde(default)]
    assembly_references: Vec<String>,

    #[serde(skip)]
    hash_cache: OnceLock<u64>,
}

impl AssemblyInfo {
    /// Create an assembly from its full display name.
    pub fn new(assembly_identity: impl Into<String>) -> Self {
        Self {
            assembly_identity: assembly_identity.into(),
            file_version: None,
            target_framework_moniker: None,
            is_explicitly_specified: false,
            assembly_references: Vec::new(),
            hash_cache: OnceLock::new(),
        }
    }

    /// Set the file version.
    #[must_use]
    pub fn with_file_version(mut self, file_version: impl Into<String>) -> Self {
        self.file_version = Some(file_version.into());
        self
    }

    /// Set the target framework moniker.
    #[must_use]
    pub fn with_target_framework_moniker(mut self, moniker: impl Into<String>) -> Self {
        self.set_target_framework_moniker(Some(moniker.into()));
        self
    }

    /// Mark the assembly as directly supplied by the user.
    #[must_use]
    pub fn explicitly_specified(mut self, value: bool) -> Self {
        self.is_explicitly_specified = value;
        self
    }

    /// Set the referenced assembly identities.
    #[must_use]
    pub fn with_references<I, S>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assembly_references = references.into_iter().map(Into::into).collect();
        self
    }

    /// Full display name.
    #[must_use]
    pub fn assembly_identity(&self) -> &str {
        &self.assembly_identity
    }

    /// Simple name, the part of the identity before the first comma.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        identity::simple_name(&self.assembly_identity)
    }

    /// File version, if known.
    #[must_use]
    pub fn file_version(&self) -> Option<&str> {
        self.file_version.as_deref()
    }

    /// Target framework moniker, if known.
    #[must_use]
    pub fn target_framework_moniker(&self) -> Option<&str> {
        self.target_framework_moniker.as_deref()
    }

    /// True if the user supplied this assembly directly rather than it being discovered as a
    /// dependency.
    #[must_use]
    pub fn is_explicitly_specified(&self) -> bool {
        self.is_explicitly_specified
    }

    /// Referenced assembly identities.
    #[must_use]
    pub fn assembly_references(&self) -> &[String] {
        &self.assembly_references
    }

    /// Replace the display name, invalidating the memoized hash.
    pub fn set_assembly_identity(&mut self, assembly_identity: impl Into<String>) {
        self.assembly_identity = assembly_identity.into();
        self.hash_cache = OnceLock::new();
    }

    /// Replace the target framework moniker, invalidating the memoized hash.
    pub fn set_target_framework_moniker(&mut self, moniker: Option<String>) {
        self.target_framework_moniker = moniker;
        self.hash_cache = OnceLock::new();
    }

    /// Replace the file version.
    pub fn set_file_version(&mut self, file_version: Option<String>) {
        self.file_version = file_version;
    }

    /// Replace the explicit-specification flag.
    pub fn set_explicitly_specified(&mut self, value: bool) {
        self.is_explicitly_specified = value;
    }

    fn identity_hash(&self) -> u64 {
        *self.hash_cache.get_or_init(|| {
            let mut hasher = DefaultHasher::new();
            self.assembly_identity.hash(&mut hasher);
            self.target_framework_moniker.hash(&mut hasher);
            hasher.finish()
        })
    }
}

impl PartialEq for AssemblyInfo {
    fn eq(&self, other: &Self) -> bool {
        self.assembly_identity == other.assembly_identity
            && self.target_framework_moniker == other.target_framework_moniker
    }
}

impl Eq for AssemblyInfo {}

impl Hash for AssemblyInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.identity_hash());
    }
}

impl fmt::Display for AssemblyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target_framework_moniker {
            Some(moniker) => write!(f, "{} ({})", self.assembly_identity, moniker),
            None => write!(f, "{}", self.assembly_identity),
        }
    }
}

/// An entry of an assembly ignore list.
///
/// Ignored assemblies are excluded from breaking change analysis. An entry with no
/// `targets_ignored` applies to every target; otherwise it applies only when every requested
/// target is listed by full name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IgnoreAssemblyInfo {
    /// Display name of the ignored assembly.
    pub assembly_identity: String,

    /// Full target names the entry is limited to. Empty means all targets.
    #[serde(default)]
    pub targets_ignored: Vec<String>,
}

impl IgnoreAssemblyInfo {
    /// An entry that ignores the assembly for every target.
    pub fn new(assembly_identity: impl Into<String>) -> Self {
        Self {
            assembly_identity: assembly_identity.into(),
            targets_ignored: Vec::new(),
        }
    }

    /// Limit the entry to the given targets.
    #[must_use]
    pub fn for_targets(mut self, targets: &[Target]) -> Self {
        self.targets_ignored = targets.iter().map(Target::full_name).collect();
        self
    }

    /// True if the entry ignores `assembly_identity` for the requested `targets`.
    ///
    /// Identity comparison is case-insensitive, as are the target names.
    #[must_use]
    pub fn matches(&self, assembly_identity: &str, targets: &[Target]) -> bool {
        if !self.assembly_identity.eq_ignore_ascii_case(assembly_identity) {
            return false;
        }

        if self.targets_ignored.is_empty() {
            return true;
        }

        targets.iter().all(|target| {
            let full_name = target.full_name();
            self.targets_ignored.iter().any(|ignored| {
                ignored.eq_ignore_ascii_case(&full_name)
                    || Target::parse(ignored).is_ok_and(|parsed| &parsed == target)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Version;
    use std::collections::HashSet;

    #[test]
    fn test_equality_ignores_non_identity_fields() {
        let a = AssemblyInfo::new("Lib, Version=1.0")
            .with_file_version("1.0.0.1")
            .with_references(["mscorlib"]);
        let b = AssemblyInfo::new("Lib, Version=1.0").explicitly_specified(true);
        assert_eq!(a, b);

        let set: HashSet<AssemblyInfo> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_moniker_participates_in_equality() {
        let a = AssemblyInfo::new("Lib").with_target_framework_moniker(".NETStandard,Version=v2.0");
        let b = AssemblyInfo::new("Lib").with_target_framework_moniker(".NETFramework,Version=v4.5");
        let c = AssemblyInfo::new("Lib");
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_hash_reset_on_mutation() {
        let mut a = AssemblyInfo::new("Lib");
        let mut set = HashSet::new();
        set.insert(a.clone());
        assert!(set.contains(&a));

        a.set_assembly_identity("Other");
        assert!(!set.contains(&a));
        assert!(set.contains(&AssemblyInfo::new("Lib")));

        a.set_assembly_identity("Lib");
        assert!(set.contains(&a));

        a.set_target_framework_moniker(Some("tfm".to_string()));
        assert!(!set.contains(&a));
    }

    #[test]
    fn test_serde_skips_hash_cache() {
        let a = AssemblyInfo::new("Lib, Version=2.0").explicitly_specified(true);
        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains("\"assemblyIdentity\":\"Lib, Version=2.0\""));
        assert!(!json.contains("hash"));

        let back: AssemblyInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
        assert!(back.is_explicitly_specified());
    }

    #[test]
    fn test_ignore_all_targets() {
        let entry = IgnoreAssemblyInfo::new("Lib, Version=1.0");
        let targets = [Target::new(".NET Framework", Version::new(4, 5))];
        assert!(entry.matches("lib, version=1.0", &targets));
        assert!(entry.matches("Lib, Version=1.0", &[]));
        assert!(!entry.matches("Other", &targets));
    }

    #[test]
    fn test_ignore_specific_targets() {
        let net45 = Target::new(".NET Framework", Version::new(4, 5));
        let net47 = Target::new(".NET Framework", Version::new(4, 7));
        let entry = IgnoreAssemblyInfo::new("Lib").for_targets(&[net45.clone()]);

        assert!(entry.matches("Lib", &[net45.clone()]));
        assert!(!entry.matches("Lib", &[net45.clone(), net47.clone()]));

        let spaced = IgnoreAssemblyInfo {
            assembly_identity: "Lib".to_string(),
            targets_ignored: vec![".NET Framework, Version=4.7".to_string()],
        };
        assert!(spaced.matches("Lib", &[net47]));
    }
}

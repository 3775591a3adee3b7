//! Target platform names.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    model::{identity::split_component, Version},
    Error, Result,
};

/// A target platform: a platform identifier and a version of it.
///
/// Identifiers compare case-insensitively (`.NET Framework` and `.net framework` are the same
/// platform); versions compare numerically. `Target` is used as a map key across the crate, so
/// `Hash`, `Eq` and `Ord` all follow these rules.
///
/// The canonical full name is `Identifier,Version=vX.Y`. Parsing additionally accepts the
/// spaced form `Identifier, Version=X.Y`.
///
/// # Examples
///
/// ```rust
/// use portscope::model::{Target, Version};
///
/// let target = Target::parse(".NET Framework, Version=4.5")?;
/// assert_eq!(target.identifier(), ".NET Framework");
/// assert_eq!(target.version(), &Version::new(4, 5));
/// assert_eq!(target.full_name(), ".NET Framework,Version=v4.5");
/// assert_eq!(target, Target::parse(".net framework,Version=v4.5.0")?);
/// # Ok::<(), portscope::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Target {
    identifier: String,
    version: Version,
}

impl Target {
    /// Create a target from an identifier and a version.
    pub fn new(identifier: impl Into<String>, version: Version) -> Self {
        Self {
            identifier: identifier.into().trim().to_string(),
            version,
        }
    }

    /// Parse a full target name that carries an explicit version.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the identifier is empty, the version component is
    /// missing, or the version cannot be parsed.
    pub fn parse(full_name: &str) -> Result<Self> {
        let (identifier, version) = Self::split_name(full_name)?;
        match version {
            Some(version) => Ok(Self::new(identifier, version)),
            None => Err(malformed_error!(
                "Target '{}' does not specify a version",
                full_name
            )),
        }
    }

    /// Split a target string into its identifier and optional version.
    ///
    /// This is the lenient form used when resolving user input, where a bare identifier means
    /// "latest version".
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the identifier is empty or a version component is present
    /// but invalid.
    pub fn split_name(name: &str) -> Result<(String, Option<Version>)> {
        let mut parts = name.split(',').map(str::trim);
        let identifier = parts.next().unwrap_or_default();
        if identifier.is_empty() {
            return Err(malformed_error!("Target name '{}' has no identifier", name));
        }

        let mut version = None;
        for (key, value) in parts.filter_map(split_component) {
            if key.eq_ignore_ascii_case("Version") {
                version = Some(Version::parse(value)?);
            }
        }

        Ok((identifier.to_string(), version))
    }

    /// Platform identifier, as written.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Platform version.
    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Canonical full name, `Identifier,Version=vX.Y`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{},Version=v{}", self.identifier, self.version)
    }

    /// Whether this target belongs to the given platform family (case-insensitive).
    #[must_use]
    pub fn is_identifier(&self, identifier: &str) -> bool {
        self.identifier.to_lowercase() == identifier.trim().to_lowercase()
    }

    /// Normalized lookup key for a platform identifier.
    ///
    /// Every identifier-keyed map in the crate is keyed by this value.
    #[must_use]
    pub fn identifier_key(identifier: &str) -> String {
        identifier.trim().to_lowercase()
    }
}

impl PartialEq for Target {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && Self::identifier_key(&self.identifier) == Self::identifier_key(&other.identifier)
    }
}

impl Eq for Target {}

impl Hash for Target {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Self::identifier_key(&self.identifier).hash(state);
        self.version.hash(state);
    }
}

impl PartialOrd for Target {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Target {
    fn cmp(&self, other: &Self) -> Ordering {
        Self::identifier_key(&self.identifier)
            .cmp(&Self::identifier_key(&other.identifier))
            .then_with(|| self.version.cmp(&other.version))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Target {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashSet};

    #[test]
    fn test_parse_forms() {
        let compact = Target::parse(".NET Core,Version=v2.0").unwrap();
        let spaced = Target::parse(".NET Core, Version=2.0").unwrap();
        assert_eq!(compact, spaced);
        assert_eq!(compact.full_name(), ".NET Core,Version=v2.0");
    }

    #[test]
    fn test_parse_key_case_and_spacing() {
        let expected = Target::new("X", Version::new(1, 0));
        assert_eq!(Target::parse("X, version=1.0").unwrap(), expected);
        assert_eq!(Target::parse("X,Version = v1.0").unwrap(), expected);
        assert_eq!(Target::parse("X, VERSION=1.0").unwrap(), expected);
    }

    #[test]
    fn test_parse_requires_version() {
        assert!(Target::parse(".NET Core").is_err());
        assert!(Target::parse(", Version=1.0").is_err());
        assert!(Target::parse("X, Version=abc").is_err());
    }

    #[test]
    fn test_split_name_bare_identifier() {
        let (identifier, version) = Target::split_name("  .NET Standard ").unwrap();
        assert_eq!(identifier, ".NET Standard");
        assert!(version.is_none());
    }

    #[test]
    fn test_case_insensitive_identity() {
        let a = Target::new(".NET Framework", Version::new(4, 5));
        let b = Target::new(".net FRAMEWORK", Version::parse("4.5.0").unwrap());
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);

        let set: HashSet<Target> = [a.clone()].into_iter().collect();
        assert!(set.contains(&b));
        assert!(a.is_identifier(".NET framework"));
    }

    #[test]
    fn test_ordering() {
        let mut map = BTreeMap::new();
        map.insert(Target::new("X", Version::new(2, 0)), 2);
        map.insert(Target::new("X", Version::new(1, 0)), 1);
        map.insert(Target::new("A", Version::new(9, 0)), 9);

        let order: Vec<i32> = map.values().copied().collect();
        assert_eq!(order, vec![9, 1, 2]);
    }

    #[test]
    fn test_serde_as_full_name() {
        let target = Target::new("X", Version::new(1, 0));
        let json = serde_json::to_string(&target).unwrap();
        assert_eq!(json, "\"X,Version=v1.0\"");
        let back: Target = serde_json::from_str(&json).unwrap();
        assert_eq!(back, target);
    }
}

//! Structured version numbers for target platforms and API introduction points.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// Dotted version number with two to four numeric components.
///
/// Platform versions in the catalog are written with varying precision (`4.5`, `4.6.1`,
/// `10.0.19041.0`). Comparison and equality treat missing trailing components as zero, so
/// `4.5` and `4.5.0.0` are the same version. The number of components that were originally
/// written is kept only for display, which keeps target full names stable across a round trip.
///
/// # Examples
///
/// ```rust
/// use portscope::model::Version;
///
/// let v45 = Version::parse("4.5")?;
/// let v461 = Version::parse("v4.6.1")?;
/// assert!(v45 < v461);
/// assert_eq!(v45, Version::parse("4.5.0.0")?);
/// assert_eq!(v461.to_string(), "4.6.1");
/// # Ok::<(), portscope::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Version {
    components: [u32; 4],
    precision: u8,
}

impl Version {
    /// Create a two-component version (`major.minor`).
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            components: [major, minor, 0, 0],
            precision: 2,
        }
    }

    /// Create a version with all four components.
    #[must_use]
    pub const fn with_build(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            components: [major, minor, build, revision],
            precision: 4,
        }
    }

    /// Major version component.
    #[must_use]
    pub const fn major(&self) -> u32 {
        self.components[0]
    }

    /// Minor version component.
    #[must_use]
    pub const fn minor(&self) -> u32 {
        self.components[1]
    }

    /// Build version component, zero when not specified.
    #[must_use]
    pub const fn build(&self) -> u32 {
        self.components[2]
    }

    /// Revision version component, zero when not specified.
    #[must_use]
    pub const fn revision(&self) -> u32 {
        self.components[3]
    }

    /// Parse a version from its string representation.
    ///
    /// Accepts an optional leading `v`/`V` as used in framework names (`v4.5`), and one to four
    /// dot-separated numeric components. A single component is read as `major.0`.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the string is empty, has more than four components, or
    /// contains a non-numeric component.
    pub fn parse(version_str: &str) -> Result<Self> {
        let trimmed = version_str.trim();
        let digits = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        if digits.is_empty() {
            return Err(malformed_error!("Empty version string"));
        }

        let parts: Vec<&str> = digits.split('.').collect();
        if parts.len() > 4 {
            return Err(malformed_error!("Invalid version format: {}", version_str));
        }

        let mut components = [0u32; 4];
        for (i, part) in parts.iter().enumerate() {
            components[i] = part
                .parse::<u32>()
                .map_err(|_| malformed_error!("Invalid version component: {}", part))?;
        }

        Ok(Self {
            components,
            // `parts.len()` is at most 4 here
            precision: parts.len().max(2) as u8,
        })
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.components.hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.components.cmp(&other.components)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.components[0], self.components[1])?;
        for component in &self.components[2..usize::from(self.precision)] {
            write!(f, ".{}", component)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_components() {
        let version = Version::parse("4.5").unwrap();
        assert_eq!(version.major(), 4);
        assert_eq!(version.minor(), 5);
        assert_eq!(version.build(), 0);
        assert_eq!(version.to_string(), "4.5");
    }

    #[test]
    fn test_parse_with_prefix_and_precision() {
        let version = Version::parse("v4.6.1").unwrap();
        assert_eq!(version.build(), 1);
        assert_eq!(version.to_string(), "4.6.1");

        let single = Version::parse("V10").unwrap();
        assert_eq!(single, Version::new(10, 0));
        assert_eq!(single.to_string(), "10.0");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Version::parse("").is_err());
        assert!(Version::parse("v").is_err());
        assert!(Version::parse("1.2.3.4.5").is_err());
        assert!(Version::parse("4.x").is_err());
    }

    #[test]
    fn test_padding_equality_and_order() {
        let short = Version::parse("4.5").unwrap();
        let long = Version::parse("4.5.0.0").unwrap();
        assert_eq!(short, long);
        assert_eq!(short.cmp(&long), Ordering::Equal);

        let mut set = std::collections::HashSet::new();
        set.insert(short);
        assert!(set.contains(&long));

        assert!(Version::parse("4.6").unwrap() > Version::parse("4.5.2").unwrap());
        assert!(Version::parse("4.10").unwrap() > Version::parse("4.9").unwrap());
    }

    #[test]
    fn test_serde_as_string() {
        let version = Version::parse("4.7.2").unwrap();
        let json = serde_json::to_string(&version).unwrap();
        assert_eq!(json, "\"4.7.2\"");

        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(back, version);
        assert!(serde_json::from_str::<Version>("\"four\"").is_err());
    }
}

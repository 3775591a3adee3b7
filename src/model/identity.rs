//! Assembly display-name parsing.
//!
//! Assemblies are identified throughout the analysis by their full display name string
//! (`Name, Version=X, Culture=Y, PublicKeyToken=Z`). The catalog stores framework assemblies
//! without version and culture, and the report groups assemblies by their simple name, so both
//! views need to be derived from the display name.

use std::fmt::{self, Write};

use crate::{model::Version, Result};

/// Parsed components of an assembly display name.
///
/// # Format
///
/// ```text
/// AssemblyName[, Version=Major.Minor.Build.Revision][, Culture=culture][, PublicKeyToken=token]
/// ```
///
/// Unknown components (e.g. `ProcessorArchitecture=`) are ignored. `Culture=neutral` and
/// `PublicKeyToken=null` are normalized to `None`.
///
/// # Examples
///
/// ```rust
/// use portscope::model::AssemblyName;
///
/// let name = AssemblyName::parse(
///     "System.Runtime, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b03f5f7f11d50a3a",
/// )?;
/// assert_eq!(name.name, "System.Runtime");
/// assert_eq!(
///     name.without_version_and_culture(),
///     "System.Runtime, PublicKeyToken=b03f5f7f11d50a3a"
/// );
/// # Ok::<(), portscope::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssemblyName {
    /// Simple assembly name (e.g. "mscorlib", "System.Core").
    pub name: String,

    /// Assembly version, if present in the display name.
    pub version: Option<Version>,

    /// Culture of a localized assembly. `None` for culture-neutral assemblies.
    pub culture: Option<String>,

    /// Public key token as lower-case hex. `None` for assemblies without a strong name.
    pub public_key_token: Option<String>,
}

impl AssemblyName {
    /// Parse an assembly display name.
    ///
    /// # Errors
    /// Returns an error if the name component is empty or the version cannot be parsed.
    pub fn parse(display_name: &str) -> Result<Self> {
        let mut parts = display_name.split(',').map(str::trim);

        let name = parts.next().unwrap_or_default().to_string();
        if name.is_empty() {
            return Err(malformed_error!("Assembly name cannot be empty"));
        }

        let mut version = None;
        let mut culture = None;
        let mut public_key_token = None;

        for (key, value) in parts.filter_map(split_component) {
            if key.eq_ignore_ascii_case("Version") {
                version = Some(Version::parse(value)?);
            } else if key.eq_ignore_ascii_case("Culture") {
                if !value.eq_ignore_ascii_case("neutral") && !value.is_empty() {
                    culture = Some(value.to_string());
                }
            } else if key.eq_ignore_ascii_case("PublicKeyToken")
                && !value.eq_ignore_ascii_case("null")
                && !value.is_empty()
            {
                public_key_token = Some(value.to_ascii_lowercase());
            }
        }

        Ok(Self {
            name,
            version,
            culture,
            public_key_token,
        })
    }

    /// The identity the catalog uses for framework assemblies: name and public key token only.
    #[must_use]
    pub fn without_version_and_culture(&self) -> String {
        let mut result = self.name.clone();
        if let Some(token) = &self.public_key_token {
            let _ = write!(result, ", PublicKeyToken={}", token);
        }
        result
    }

    /// Full display name, written in the canonical component order.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut result = String::with_capacity(self.name.len() + 64);
        result.push_str(&self.name);

        if let Some(version) = &self.version {
            let _ = write!(result, ", Version={}", version);
        }

        let _ = write!(
            result,
            ", Culture={}",
            self.culture.as_deref().unwrap_or("neutral")
        );
        let _ = write!(
            result,
            ", PublicKeyToken={}",
            self.public_key_token.as_deref().unwrap_or("null")
        );

        result
    }
}

impl fmt::Display for AssemblyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Split a `Key=Value` component of a display name, trimming both sides.
///
/// Keys are returned as written; callers compare them case-insensitively.
pub(crate) fn split_component(part: &str) -> Option<(&str, &str)> {
    let (key, value) = part.split_once('=')?;
    Some((key.trim(), value.trim()))
}

/// Simple name of an assembly display name: everything before the first comma, trimmed.
///
/// Never fails; an identity without components is its own simple name.
#[must_use]
pub fn simple_name(identity: &str) -> &str {
    identity.split(',').next().unwrap_or(identity).trim()
}

/// Strip version and culture from an assembly identity for framework-assembly lookups.
///
/// Identities that cannot be parsed are returned unchanged so that the subsequent lookup simply
/// misses.
#[must_use]
pub fn strip_version_and_culture(identity: &str) -> String {
    match AssemblyName::parse(identity) {
        Ok(name) => name.without_version_and_culture(),
        Err(_) => identity.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_identity() {
        let name = AssemblyName::parse(
            "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=B77A5C561934E089",
        )
        .unwrap();

        assert_eq!(name.name, "mscorlib");
        assert_eq!(name.version, Some(Version::with_build(4, 0, 0, 0)));
        assert_eq!(name.culture, None);
        assert_eq!(name.public_key_token.as_deref(), Some("b77a5c561934e089"));
    }

    #[test]
    fn test_parse_lowercase_keys() {
        let name = AssemblyName::parse(
            "System.Runtime, version=4.2.0.0, culture=neutral, publickeytoken=B03F5F7F11D50A3A",
        )
        .unwrap();

        assert_eq!(name.version, Some(Version::with_build(4, 2, 0, 0)));
        assert_eq!(name.public_key_token.as_deref(), Some("b03f5f7f11d50a3a"));

        let stripped = strip_version_and_culture(
            "System.Runtime, version=4.2.0.0, culture=neutral, PUBLICKEYTOKEN = b03f5f7f11d50a3a",
        );
        assert_eq!(stripped, "System.Runtime, PublicKeyToken=b03f5f7f11d50a3a");
    }

    #[test]
    fn test_parse_simple_name_only() {
        let name = AssemblyName::parse("MyLibrary").unwrap();
        assert_eq!(name.name, "MyLibrary");
        assert!(name.version.is_none());
        assert!(name.public_key_token.is_none());
        assert_eq!(name.without_version_and_culture(), "MyLibrary");
    }

    #[test]
    fn test_parse_culture_and_null_token() {
        let name =
            AssemblyName::parse("App.resources, Version=1.0, Culture=fr-FR, PublicKeyToken=null")
                .unwrap();
        assert_eq!(name.culture.as_deref(), Some("fr-FR"));
        assert!(name.public_key_token.is_none());
        assert_eq!(
            name.display_name(),
            "App.resources, Version=1.0, Culture=fr-FR, PublicKeyToken=null"
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(AssemblyName::parse("").is_err());
        assert!(AssemblyName::parse(", Version=1.0").is_err());
        assert!(AssemblyName::parse("App, Version=one").is_err());
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name("Foo, Version=1.0"), "Foo");
        assert_eq!(simple_name("  Foo  "), "Foo");
        assert_eq!(simple_name("Foo"), "Foo");
    }

    #[test]
    fn test_strip_version_and_culture() {
        assert_eq!(
            strip_version_and_culture(
                "System.Runtime, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b03f5f7f11d50a3a"
            ),
            "System.Runtime, PublicKeyToken=b03f5f7f11d50a3a"
        );
        assert_eq!(strip_version_and_culture("App, Version=x"), "App, Version=x");
    }
}

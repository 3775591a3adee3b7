//! Known catalog metadata keys.

use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Metadata attached to catalog APIs.
///
/// Catalog documents store metadata as a string map. Only the keys listed here are consulted by
/// the analysis; they are parsed once when the catalog is indexed so no lookup depends on the
/// exact spelling afterwards.
///
/// # Examples
///
/// ```rust
/// use portscope::catalog::MetadataKey;
///
/// let key: MetadataKey = "Recommended Changes".parse().unwrap();
/// assert_eq!(key, MetadataKey::RecommendedChanges);
/// assert_eq!(key.as_ref(), "Recommended Changes");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
pub enum MetadataKey {
    /// Suggested replacement for an unavailable API.
    #[strum(serialize = "Recommended Changes")]
    RecommendedChanges,

    /// Doc id of a renamed API that remains source compatible.
    #[strum(serialize = "SourceCompatibleEquivalent")]
    SourceCompatibleEquivalent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_round_trip_all_keys() {
        for key in MetadataKey::iter() {
            assert_eq!(key.to_string().parse::<MetadataKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_unknown_key() {
        assert!("Obsolete".parse::<MetadataKey>().is_err());
        assert!("recommended changes".parse::<MetadataKey>().is_err());
    }
}

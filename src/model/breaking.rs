//! Breaking change records.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::model::{AssemblyInfo, MemberInfo, Version};

/// Severity tier of a breaking change.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, EnumString,
    Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum BreakingChangeImpact {
    /// Impact has not been classified.
    #[default]
    Unknown,
    /// Likely to affect a large number of applications.
    Major,
    /// Affects applications in specific, but not unusual, scenarios.
    Minor,
    /// Affects only unusual code paths.
    Edge,
    /// Not expected to be observable by applications.
    Transparent,
}

/// A documented behavioral change between versions of the full framework.
///
/// A change is broken in `version_broken` and stays broken until `version_fixed`, or forever
/// when no fix version is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakingChange {
    /// Stable identifier, used for suppression lists.
    pub id: String,

    /// Short human-readable title.
    #[serde(default)]
    pub title: String,

    /// Full description of the change.
    #[serde(default)]
    pub details: Option<String>,

    /// Suggested mitigation.
    #[serde(default)]
    pub suggestion: Option<String>,

    /// Link to further documentation.
    #[serde(default)]
    pub link: Option<String>,

    /// First version that exhibits the change.
    #[serde(default)]
    pub version_broken: Option<Version>,

    /// First version in which the change no longer applies.
    #[serde(default)]
    pub version_fixed: Option<Version>,

    /// Doc ids of the APIs that trigger the change.
    #[serde(default)]
    pub applicable_apis: BTreeSet<String>,

    /// Severity tier.
    #[serde(default)]
    pub impact_scope: BreakingChangeImpact,

    /// True if the change is only observable when retargeting, not when running on a newer
    /// runtime.
    #[serde(default)]
    pub is_retargeting: bool,

    /// True if the change can be reverted with a compatibility switch.
    #[serde(default)]
    pub is_quirked: bool,

    /// True if the change surfaces at build time rather than at run time.
    #[serde(default)]
    pub is_build_time: bool,

    /// Free-form categories.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl BreakingChange {
    /// Create a change with the given id, broken in `version_broken`.
    pub fn new(id: impl Into<String>, version_broken: Version) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            details: None,
            suggestion: None,
            link: None,
            version_broken: Some(version_broken),
            version_fixed: None,
            applicable_apis: BTreeSet::new(),
            impact_scope: BreakingChangeImpact::Unknown,
            is_retargeting: false,
            is_quirked: false,
            is_build_time: false,
            categories: Vec::new(),
        }
    }

    /// True if a target at `version` is affected by this change.
    ///
    /// The window is `[version_broken, version_fixed)`. A change without a broken version
    /// never applies.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use portscope::model::{BreakingChange, Version};
    ///
    /// let mut change = BreakingChange::new("42", Version::new(4, 5));
    /// change.version_fixed = Some(Version::new(4, 7));
    ///
    /// assert!(change.applies_to(&Version::new(4, 5)));
    /// assert!(change.applies_to(&Version::new(4, 6)));
    /// assert!(!change.applies_to(&Version::new(4, 7)));
    /// assert!(!change.applies_to(&Version::new(4, 4)));
    /// ```
    #[must_use]
    pub fn applies_to(&self, version: &Version) -> bool {
        let Some(broken) = &self.version_broken else {
            return false;
        };

        if version == broken {
            return true;
        }

        version > broken
            && self
                .version_fixed
                .as_ref()
                .map_or(true, |fixed| version < fixed)
    }
}

/// One breaking change reached through one API by one calling assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakingChangeDependency {
    /// The change.
    #[serde(rename = "break")]
    pub breaking_change: BreakingChange,

    /// The user assembly calling the affected API.
    pub dependant_assembly: AssemblyInfo,

    /// The affected API.
    pub member: MemberInfo,
}

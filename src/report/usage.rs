//! Per-assembly API usage statistics.

use serde::Serialize;

use crate::model::AssemblyInfo;

/// Call counts of one assembly against one target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageData {
    /// Calls to APIs available on the target.
    pub available_api_calls: u64,

    /// Calls to APIs not available on the target.
    pub unavailable_api_calls: u64,
}

impl UsageData {
    /// Total number of calls counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.available_api_calls + self.unavailable_api_calls
    }

    /// Share of calls that are available, in `[0, 1]`. An assembly without calls is fully
    /// portable.
    #[must_use]
    pub fn portability_index(&self) -> f64 {
        match self.total() {
            0 => 1.0,
            #[allow(clippy::cast_precision_loss)]
            total => self.available_api_calls as f64 / total as f64,
        }
    }
}

/// Usage statistics of one user assembly, one [`UsageData`] per requested target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyUsageInfo {
    source_assembly: AssemblyInfo,
    usage_data: Vec<UsageData>,
}

impl AssemblyUsageInfo {
    pub(crate) fn new(source_assembly: AssemblyInfo, target_count: usize) -> Self {
        Self {
            source_assembly,
            usage_data: vec![UsageData::default(); target_count],
        }
    }

    pub(crate) fn record(&mut self, target_index: usize, available: bool) {
        if let Some(usage) = self.usage_data.get_mut(target_index) {
            if available {
                usage.available_api_calls += 1;
            } else {
                usage.unavailable_api_calls += 1;
            }
        }
    }

    /// The assembly the counts belong to.
    #[must_use]
    pub fn source_assembly(&self) -> &AssemblyInfo {
        &self.source_assembly
    }

    /// Counts per target, parallel to the report's targets.
    #[must_use]
    pub fn usage_data(&self) -> &[UsageData] {
        &self.usage_data
    }

    /// Counts for one target.
    #[must_use]
    pub fn usage_for(&self, target_index: usize) -> Option<&UsageData> {
        self.usage_data.get(target_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record() {
        let mut usage = AssemblyUsageInfo::new(AssemblyInfo::new("App"), 2);
        usage.record(0, true);
        usage.record(0, false);
        usage.record(1, true);
        usage.record(1, false);
        // Out of range indices are ignored
        usage.record(5, true);

        assert_eq!(
            usage.usage_for(0),
            Some(&UsageData {
                available_api_calls: 1,
                unavailable_api_calls: 1
            })
        );
        assert_eq!(usage.usage_for(1).map(UsageData::total), Some(2));
        assert!(usage.usage_for(2).is_none());
    }

    #[test]
    fn test_portability_index() {
        let usage = UsageData {
            available_api_calls: 3,
            unavailable_api_calls: 1,
        };
        assert!((usage.portability_index() - 0.75).abs() < f64::EPSILON);
        assert!((UsageData::default().portability_index() - 1.0).abs() < f64::EPSILON);
    }
}

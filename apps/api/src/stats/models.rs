use chrono::{DateTime, Datelike, Utc};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Calendar-month labels in fixed response order.
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    LeetCode,
    CodeChef,
    HackerRank,
    LinkedIn,
}

/// One earned (or in-progress) badge. CodeChef badges carry a level and a
/// problems-needed target; HackerRank badges carry a star count. Absent
/// fields are omitted from the JSON rather than nulled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u32>,
    pub solved: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needed: Option<u32>,
}

/// One recent submission, newest-first in the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub problem: String,
    pub difficulty: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// Accepted-submission counts bucketed by calendar month. Always carries all
/// twelve months, zero-filled, in Jan..Dec order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyProgress([u32; 12]);

impl MonthlyProgress {
    pub fn add(&mut self, month0: usize, count: u32) {
        if let Some(slot) = self.0.get_mut(month0) {
            *slot += count;
        }
    }

    /// Buckets one accepted submission by its timestamp's month.
    pub fn record(&mut self, instant: &DateTime<Utc>) {
        self.add(instant.month0() as usize, 1);
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|&c| c as u64).sum()
    }

    pub fn get(&self, month0: usize) -> u32 {
        self.0.get(month0).copied().unwrap_or(0)
    }
}

impl Serialize for MonthlyProgress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(12))?;
        for (label, count) in MONTHS.iter().zip(self.0.iter()) {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MonthlyProgress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MonthVisitor;

        impl<'de> Visitor<'de> for MonthVisitor {
            type Value = MonthlyProgress;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of month abbreviations to counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut progress = MonthlyProgress::default();
                while let Some((key, value)) = access.next_entry::<String, u32>()? {
                    if let Some(idx) = MONTHS.iter().position(|m| *m == key) {
                        progress.0[idx] = value;
                    }
                }
                Ok(progress)
            }
        }

        deserializer.deserialize_map(MonthVisitor)
    }
}

/// The uniform statistics record returned for any coding-platform query.
/// Every field is always present and type-correct; missing upstream data
/// shows up as the documented default, never as a missing key. `total` is
/// the one exception: it is omitted where the platform has no meaningful
/// denominator (HackerRank).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformStats {
    pub platform: Platform,
    pub username: String,
    pub solved: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
    pub rank: String,
    pub rating: i64,
    pub badges: Vec<Badge>,
    #[serde(rename = "recentSubmissions")]
    pub recent_submissions: Vec<Submission>,
    #[serde(rename = "monthlyProgress")]
    pub monthly_progress: MonthlyProgress,
}

impl PlatformStats {
    /// The all-defaults record for a platform: what callers get whenever
    /// anything upstream fails after username validation.
    pub fn defaults(platform: Platform, username: &str) -> Self {
        let total = match platform {
            // Rough size of the CodeChef problem pool.
            Platform::CodeChef => Some(codechef_total_default()),
            Platform::LeetCode => Some(0),
            Platform::HackerRank | Platform::LinkedIn => None,
        };
        Self {
            platform,
            username: username.to_string(),
            solved: 0,
            total,
            rank: "N/A".to_string(),
            rating: 0,
            badges: Vec::new(),
            recent_submissions: Vec::new(),
            monthly_progress: MonthlyProgress::default(),
        }
    }
}

pub fn codechef_total_default() -> u32 {
    5000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_progress_serializes_all_twelve_months_in_order() {
        let mut progress = MonthlyProgress::default();
        progress.add(0, 3);
        progress.add(11, 1);

        let json = serde_json::to_string(&progress).unwrap();
        assert_eq!(
            json,
            r#"{"Jan":3,"Feb":0,"Mar":0,"Apr":0,"May":0,"Jun":0,"Jul":0,"Aug":0,"Sep":0,"Oct":0,"Nov":0,"Dec":1}"#
        );
    }

    #[test]
    fn test_monthly_progress_sum_matches_recorded_submissions() {
        let mut progress = MonthlyProgress::default();
        let stamps = [1609459200, 1612137600, 1612224000]; // Jan, Feb, Feb 2021
        for s in stamps {
            progress.record(&DateTime::from_timestamp(s, 0).unwrap());
        }
        assert_eq!(progress.total(), 3);
        assert_eq!(progress.get(0), 1);
        assert_eq!(progress.get(1), 2);

        // Recomputing from the same input yields identical totals.
        let mut again = MonthlyProgress::default();
        for s in stamps {
            again.record(&DateTime::from_timestamp(s, 0).unwrap());
        }
        assert_eq!(progress, again);
    }

    #[test]
    fn test_monthly_progress_roundtrip() {
        let mut progress = MonthlyProgress::default();
        progress.add(4, 9);
        let json = serde_json::to_string(&progress).unwrap();
        let back: MonthlyProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(progress, back);
    }

    #[test]
    fn test_default_record_roundtrips_to_same_shape() {
        let defaults = PlatformStats::defaults(Platform::CodeChef, "tourist");
        let json = serde_json::to_string(&defaults).unwrap();
        let back: PlatformStats = serde_json::from_str(&json).unwrap();
        assert_eq!(defaults, back);

        // The default record carries every key a populated record carries.
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for key in [
            "platform",
            "username",
            "solved",
            "total",
            "rank",
            "rating",
            "badges",
            "recentSubmissions",
            "monthlyProgress",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["rank"], "N/A");
        assert_eq!(value["rating"], 0);
        assert_eq!(value["total"], 5000);
    }

    #[test]
    fn test_hackerrank_defaults_omit_total() {
        let defaults = PlatformStats::defaults(Platform::HackerRank, "alice");
        let value = serde_json::to_value(&defaults).unwrap();
        assert!(value.get("total").is_none());
        assert_eq!(value["platform"], "HackerRank");
    }
}

use crate::constants::{
    DEFAULT_CAPACITY, EMPTY_THRESHOLD, MODERATE_THRESHOLD, STATUS_CROWDED_PERCENT,
    STATUS_EMPTY_PERCENT, STATUS_MODERATE_PERCENT,
};

use super::CoachRecord;

/// Three-level crowding bucket, plus unknown when no signal was reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Empty,
    Moderate,
    Crowded,
    Unknown,
}

impl Bucket {
    #[must_use]
    pub fn from_percent(percent: Option<u8>) -> Self {
        match percent {
            None => Self::Unknown,
            Some(p) if p < EMPTY_THRESHOLD => Self::Empty,
            Some(p) if p < MODERATE_THRESHOLD => Self::Moderate,
            Some(_) => Self::Crowded,
        }
    }

    /// Human status shown on a coach card
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Empty => "Safe",
            Self::Moderate => "Moderate",
            Self::Crowded => "Overcrowded",
            Self::Unknown => "?",
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Empty => "status-empty",
            Self::Moderate => "status-moderate",
            Self::Crowded => "status-crowded",
            Self::Unknown => "status-unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupancyResult {
    pub percent: Option<u8>,
    pub bucket: Bucket,
}

impl OccupancyResult {
    #[must_use]
    pub fn from_percent(percent: Option<u8>) -> Self {
        Self {
            percent,
            bucket: Bucket::from_percent(percent),
        }
    }

    /// `"<n>%"`, or `"?"` when occupancy is unknown
    #[must_use]
    pub fn percent_text(&self) -> String {
        self.percent.map_or_else(|| "?".to_string(), |p| format!("{p}%"))
    }
}

/// Estimate how full a coach is from its head count or textual status
///
/// A head count takes precedence over a status. Known percentages are clamped
/// to `0..=100`.
#[must_use]
pub fn classify(record: &CoachRecord) -> OccupancyResult {
    let percent = match (record.count, record.status.as_deref()) {
        (Some(count), _) => percent_from_count(count),
        (None, Some(status)) => percent_from_status(status),
        (None, None) => None,
    };
    OccupancyResult::from_percent(percent)
}

fn percent_from_count(count: f64) -> Option<u8> {
    let percent = (count / DEFAULT_CAPACITY * 100.0).round();
    if percent.is_nan() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let clamped = percent.clamp(0.0, 100.0) as u8;
    Some(clamped)
}

fn percent_from_status(status: &str) -> Option<u8> {
    let status = status.to_lowercase();
    if status.contains("empty") {
        Some(STATUS_EMPTY_PERCENT)
    } else if status.contains("moderate") {
        Some(STATUS_MODERATE_PERCENT)
    } else if status.contains("crowd") {
        Some(STATUS_CROWDED_PERCENT)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_from_count(count: f64) -> u8 {
        let p = (count / 20.0 * 100.0).round().clamp(0.0, 100.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let p = p as u8;
        p
    }

    #[test]
    fn test_count_percent_matches_formula() {
        for count in [0.0, 1.0, 3.0, 5.0, 5.9, 13.0, 14.0, 19.0, 20.0, 25.0, 400.0, -4.0] {
            let result = classify(&CoachRecord::new("c").with_count(count));
            assert_eq!(result.percent, Some(expected_from_count(count)), "count {count}");
        }
    }

    #[test]
    fn test_count_clamped_to_range() {
        assert_eq!(classify(&CoachRecord::new("c").with_count(45.0)).percent, Some(100));
        assert_eq!(classify(&CoachRecord::new("c").with_count(-3.0)).percent, Some(0));
        assert_eq!(classify(&CoachRecord::new("c").with_count(f64::INFINITY)).percent, Some(100));
        assert_eq!(classify(&CoachRecord::new("c").with_count(f64::NAN)).bucket, Bucket::Unknown);
    }

    #[test]
    fn test_count_wins_over_status() {
        let record = CoachRecord::new("c").with_count(2.0).with_status("Crowded");
        let result = classify(&record);
        assert_eq!(result.percent, Some(10));
        assert_eq!(result.bucket, Bucket::Empty);
    }

    #[test]
    fn test_status_substrings_case_insensitive() {
        let cases = [
            ("EMPTY", 5),
            ("nearly empty now", 5),
            ("Moderate", 45),
            ("moderately busy", 45),
            ("Overcrowded!", 85),
            ("CROWD", 85),
        ];
        for (status, percent) in cases {
            let result = classify(&CoachRecord::new("c").with_status(status));
            assert_eq!(result.percent, Some(percent), "status {status}");
        }
    }

    #[test]
    fn test_status_first_match_wins() {
        let result = classify(&CoachRecord::new("c").with_status("empty, not crowded"));
        assert_eq!(result.percent, Some(5));
    }

    #[test]
    fn test_unrecognized_status_is_unknown() {
        let result = classify(&CoachRecord::new("c").with_status("closed"));
        assert_eq!(result, OccupancyResult { percent: None, bucket: Bucket::Unknown });
    }

    #[test]
    fn test_no_signal_is_unknown() {
        let result = classify(&CoachRecord::new("c"));
        assert_eq!(result.percent, None);
        assert_eq!(result.bucket, Bucket::Unknown);
        assert_eq!(result.percent_text(), "?");
    }

    #[test]
    fn test_bucket_thresholds() {
        for p in 0..=100u8 {
            let expected = if p < 30 {
                Bucket::Empty
            } else if p < 70 {
                Bucket::Moderate
            } else {
                Bucket::Crowded
            };
            assert_eq!(Bucket::from_percent(Some(p)), expected);
        }
        assert_eq!(Bucket::from_percent(None), Bucket::Unknown);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Bucket::Empty.label(), "Safe");
        assert_eq!(Bucket::Crowded.label(), "Overcrowded");
        assert_eq!(Bucket::Unknown.css_class(), "status-unknown");
        assert_eq!(OccupancyResult::from_percent(Some(95)).percent_text(), "95%");
    }
}

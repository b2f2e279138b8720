use serde::{Deserialize, Serialize};

use super::{lenient_opt_string, lenient_string};

/// One entry of the train list returned by `/trains`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrainSummary {
    #[serde(default, alias = "trainId", deserialize_with = "lenient_string")]
    pub train_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub line: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub src: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub dst: Option<String>,
}

impl TrainSummary {
    #[must_use]
    pub fn new(train_id: impl Into<String>) -> Self {
        Self {
            train_id: train_id.into(),
            ..Self::default()
        }
    }

    /// Identifier used when the user picks this train: the code when known, else the id
    #[must_use]
    pub fn identity(&self) -> &str {
        if self.code.is_empty() {
            &self.train_id
        } else {
            &self.code
        }
    }

    /// Identifier used when a saved selection is restored: the id when known, else the code
    #[must_use]
    pub fn restore_identity(&self) -> &str {
        if self.train_id.is_empty() {
            &self.code
        } else {
            &self.train_id
        }
    }

    /// Whether a persisted train identifier refers to this train
    #[must_use]
    pub fn matches(&self, saved_id: &str) -> bool {
        (!self.train_id.is_empty() && self.train_id == saved_id)
            || (!self.code.is_empty() && self.code == saved_id)
    }

    /// Card heading in timetable style: `time — src → dst`
    #[must_use]
    pub fn schedule_title(&self) -> String {
        format!(
            "{} — {} → {}",
            self.time.as_deref().unwrap_or(""),
            self.src.as_deref().unwrap_or(""),
            self.dst.as_deref().unwrap_or(""),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_numeric_id_and_code() {
        let train: TrainSummary = serde_json::from_value(serde_json::json!({
            "train_id": 1,
            "code": 98122,
            "line": "Harbour",
            "time": "08:15",
        }))
        .unwrap();

        assert_eq!(train.train_id, "1");
        assert_eq!(train.code, "98122");
        assert_eq!(train.line, "Harbour");
        assert_eq!(train.time.as_deref(), Some("08:15"));
        assert_eq!(train.src, None);
    }

    #[test]
    fn test_deserialize_camel_case_id() {
        let train: TrainSummary =
            serde_json::from_value(serde_json::json!({"trainId": "T7"})).unwrap();
        assert_eq!(train.train_id, "T7");
        assert_eq!(train.code, "");
    }

    #[test]
    fn test_identity_prefers_code() {
        let mut train = TrainSummary::new("1");
        assert_eq!(train.identity(), "1");
        train.code = "98122".to_string();
        assert_eq!(train.identity(), "98122");
        assert_eq!(train.restore_identity(), "1");
    }

    #[test]
    fn test_matches_id_or_code() {
        let train = TrainSummary {
            train_id: "1".to_string(),
            code: "98122".to_string(),
            ..TrainSummary::default()
        };
        assert!(train.matches("1"));
        assert!(train.matches("98122"));
        assert!(!train.matches("2"));
        assert!(!TrainSummary::new("1").matches(""));
    }

    #[test]
    fn test_schedule_title_with_missing_fields() {
        let train = TrainSummary {
            time: Some("09:40".to_string()),
            src: Some("CSMT".to_string()),
            ..TrainSummary::default()
        };
        assert_eq!(train.schedule_title(), "09:40 — CSMT → ");
    }
}

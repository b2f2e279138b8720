use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Occupancy report for a single coach
///
/// At most one of `count` and `status` is expected to carry a signal; a record
/// with neither is still shown, with unknown occupancy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoachRecord {
    pub name: String,
    pub count: Option<f64>,
    pub status: Option<String>,
    pub index: Option<u32>,
}

impl CoachRecord {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_count(mut self, count: f64) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Build a record from a keyed entry such as `"Coach3": {"count": 12}`
    ///
    /// Non-object values yield a record without any occupancy signal.
    #[must_use]
    pub fn from_entry(name: &str, value: &Value) -> Self {
        Self {
            name: name.to_string(),
            count: count_signal(value),
            status: status_signal(value),
            index: index_field(value),
        }
    }

    /// Build a record from the element at `position` of a `coaches` array
    #[must_use]
    pub fn from_element(position: usize, value: &Value) -> Self {
        let index = index_field(value)
            .filter(|i| *i != 0)
            .or_else(|| u32::try_from(position + 1).ok());
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map_or_else(
                || format!("C-{}", index.unwrap_or_default()),
                str::to_string,
            );

        Self {
            name,
            count: count_signal(value),
            status: status_signal(value),
            index,
        }
    }

    /// Whether a JSON value looks like a coach report (has a `count` or a `status`)
    #[must_use]
    pub fn is_coach_like(value: &Value) -> bool {
        value.get("count").is_some() || status_signal(value).is_some()
    }
}

// A present but null count reads as zero
fn count_signal(value: &Value) -> Option<f64> {
    match value.get("count")? {
        Value::Null => Some(0.0),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn status_signal(value: &Value) -> Option<String> {
    value
        .get("status")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn index_field(value: &Value) -> Option<u32> {
    match value.get("index")? {
        Value::Number(n) => n.as_u64().and_then(|i| u32::try_from(i).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

//! Conversion of the loosely-shaped server JSON into uniform records
//!
//! The `/trains` and `/train/{id}/status` endpoints have been seen returning
//! several shapes. Each shape is a variant of a closed enum and the variants
//! are tried in a fixed priority order.

use std::cmp::Ordering;

use serde_json::{Map, Value};

use crate::models::{CoachRecord, TrainSummary};

/// Shapes accepted from `/trains`
#[derive(Debug, Clone, PartialEq)]
pub enum TrainListResponse {
    /// `[ {train_id, code, line, ...}, ... ]`
    Sequence(Vec<Value>),
    /// `{ "<train id>": {code, line} | <anything>, ... }`
    Mapping(Map<String, Value>),
}

impl TrainListResponse {
    #[must_use]
    pub fn decode(raw: &Value) -> Option<Self> {
        match raw {
            Value::Array(items) => Some(Self::Sequence(items.clone())),
            Value::Object(map) => Some(Self::Mapping(map.clone())),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_trains(self) -> Vec<TrainSummary> {
        match self {
            Self::Sequence(items) => items
                .into_iter()
                .filter_map(|item| match serde_json::from_value::<TrainSummary>(item) {
                    Ok(train) => Some(train),
                    Err(e) => {
                        leptos::logging::warn!("Skipping malformed train entry: {e}");
                        None
                    }
                })
                .collect(),
            Self::Mapping(map) => map
                .into_iter()
                .map(|(key, value)| train_from_mapping_entry(key, &value))
                .collect(),
        }
    }
}

fn train_from_mapping_entry(key: String, value: &Value) -> TrainSummary {
    let mut train = TrainSummary::new(key);

    let code = value
        .get("code")
        .and_then(crate::models::scalar_to_string)
        .filter(|c| !c.is_empty());
    if let Some(code) = code {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(crate::models::scalar_to_string)
                .filter(|s| !s.is_empty())
        };
        train.code = code;
        train.line = field("line").unwrap_or_default();
        train.time = field("time");
        train.src = field("src");
        train.dst = field("dst");
    }

    train
}

/// Normalize a `/trains` response; unrecognized shapes yield no trains
#[must_use]
pub fn normalize_train_list(raw: &Value) -> Vec<TrainSummary> {
    TrainListResponse::decode(raw).map_or_else(Vec::new, TrainListResponse::into_trains)
}

/// Shapes in which a train status response carries its coaches, in priority order
#[derive(Debug, Clone, PartialEq)]
pub enum CoachesResponse {
    /// `{"coaches": [ {index, count|status}, ... ]}`
    Sequence(Vec<Value>),
    /// `{"coaches": {"Coach1": {...}, ...}}`
    Mapping(Map<String, Value>),
    /// `{"Coach1": {...}, "coach2": {...}, "train_id": ...}`
    FlatKeyed(Map<String, Value>),
    /// `{"A1": {"count": 3}, "B1": {"status": "empty"}}`, every non-null entry is a coach
    WholeObject(Map<String, Value>),
}

impl CoachesResponse {
    /// Resolve the coach collection of a status response
    ///
    /// Returns `None` when no shape matches.
    #[must_use]
    pub fn decode(raw: &Value) -> Option<Self> {
        let object = raw.as_object()?;

        match object.get("coaches") {
            Some(Value::Array(items)) => return Some(Self::Sequence(items.clone())),
            Some(Value::Object(map)) => return Some(Self::Mapping(map.clone())),
            _ => {}
        }

        let flat: Map<String, Value> = object
            .iter()
            .filter(|(key, _)| is_coach_key(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if !flat.is_empty() {
            return Some(Self::FlatKeyed(flat));
        }

        if object.values().any(CoachRecord::is_coach_like) {
            let whole = object
                .iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            return Some(Self::WholeObject(whole));
        }

        None
    }

    #[must_use]
    pub fn into_records(self) -> Vec<CoachRecord> {
        match self {
            Self::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(position, item)| CoachRecord::from_element(position, item))
                .collect(),
            Self::Mapping(map) | Self::FlatKeyed(map) | Self::WholeObject(map) => {
                let keys = sort_coach_keys(map.keys().cloned().collect());
                keys.iter()
                    .filter_map(|key| map.get(key).map(|value| CoachRecord::from_entry(key, value)))
                    .collect()
            }
        }
    }
}

// A `coaches` field that is neither an array nor an object is not itself a coach
fn is_coach_key(key: &str) -> bool {
    key != "coaches"
        && key
            .get(..5)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("coach"))
}

/// Normalize the coaches of a `/train/{id}/status` response
#[must_use]
pub fn normalize_coaches(raw: &Value) -> Vec<CoachRecord> {
    CoachesResponse::decode(raw).map_or_else(Vec::new, CoachesResponse::into_records)
}

/// A decoded train status: display title plus ordered coaches
#[derive(Debug, Clone, PartialEq)]
pub struct TrainStatus {
    pub title: String,
    pub coaches: Vec<CoachRecord>,
}

impl TrainStatus {
    /// Decode a status response for the train the user asked for
    ///
    /// The title prefers the response's `code`, then its `train_id`; flat keyed
    /// responses prefer `train_id`, and whole-object responses carry no usable
    /// identity so the requested id is used.
    #[must_use]
    pub fn from_value(raw: &Value, requested_id: &str) -> Self {
        let field = |name: &str| {
            raw.get(name)
                .and_then(crate::models::scalar_to_string)
                .filter(|s| !s.is_empty())
        };

        let Some(shape) = CoachesResponse::decode(raw) else {
            return Self {
                title: requested_id.to_string(),
                coaches: Vec::new(),
            };
        };

        let title = match shape {
            CoachesResponse::Sequence(_) | CoachesResponse::Mapping(_) => {
                field("code").or_else(|| field("train_id"))
            }
            CoachesResponse::FlatKeyed(_) => field("train_id").or_else(|| field("code")),
            CoachesResponse::WholeObject(_) => None,
        }
        .unwrap_or_else(|| requested_id.to_string());

        Self {
            title,
            coaches: shape.into_records(),
        }
    }
}

fn first_digit_run(key: &str) -> Option<&str> {
    let start = key.find(|c: char| c.is_ascii_digit())?;
    let rest = &key[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Compare two digit strings by numeric value without parsing them
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_coach_keys(a: &str, b: &str) -> Ordering {
    match (first_digit_run(a), first_digit_run(b)) {
        (Some(na), Some(nb)) => compare_digit_runs(na, nb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        // Case-folded first; of two names differing only in case, lowercase first
        (None, None) => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| b.cmp(a)),
    }
}

/// Order coach names by the first number they contain
///
/// Names with a number come before names without one; names without a number
/// are ordered alphabetically ignoring case. Names with equal numbers keep their order.
#[must_use]
pub fn sort_coach_keys(mut keys: Vec<String>) -> Vec<String> {
    keys.sort_by(|a, b| compare_coach_keys(a, b));
    keys
}

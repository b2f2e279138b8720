use std::fmt;

use serde_json::Value;

use crate::constants::{
    LAST_DESTINATION_KEY, LAST_SOURCE_KEY, LAST_TRAIN_ID_KEY, MISSING_ENDPOINTS_MESSAGE,
    TRAINS_FAILED_MESSAGE,
};
#[allow(unused_imports)]
use crate::logging::log;
use crate::models::TrainSummary;
use crate::normalize::normalize_train_list;
use crate::storage::{persist, KeyValueStore};

/// Rejected search input; the search never starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    MissingEndpoints,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoints => f.write_str(MISSING_ENDPOINTS_MESSAGE),
        }
    }
}

impl std::error::Error for InputError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub source: String,
    pub destination: String,
}

impl SearchQuery {
    /// # Errors
    ///
    /// Returns `InputError::MissingEndpoints` if either value is blank
    pub fn new(source: &str, destination: &str) -> Result<Self, InputError> {
        let source = source.trim();
        let destination = destination.trim();
        if source.is_empty() || destination.is_empty() {
            return Err(InputError::MissingEndpoints);
        }
        Ok(Self {
            source: source.to_string(),
            destination: destination.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Listed(Vec<TrainSummary>),
    Empty,
    Error(String),
}

/// Train list search: `Idle -> Loading -> Listed | Empty | Error`
#[derive(Debug, Default)]
pub struct SearchFlow {
    state: SearchState,
    listed_for: Option<SearchQuery>,
}

impl SearchFlow {
    #[must_use]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Validate the input and enter `Loading`
    ///
    /// # Errors
    ///
    /// Returns an `InputError` without changing state if either endpoint is blank
    pub fn begin(&mut self, source: &str, destination: &str) -> Result<SearchQuery, InputError> {
        let query = SearchQuery::new(source, destination)?;
        log!("Searching trains {} -> {}", query.source, query.destination);
        self.state = SearchState::Loading;
        Ok(query)
    }

    /// Apply the `/trains` response
    ///
    /// Returns the train to show automatically when the previously viewed
    /// train is among the results.
    pub fn finish(
        &mut self,
        query: SearchQuery,
        response: Result<Value, String>,
        store: &impl KeyValueStore,
    ) -> Option<String> {
        let raw = match response {
            Ok(raw) => raw,
            Err(e) => {
                leptos::logging::error!("Error fetching trains: {e}");
                self.state = SearchState::Error(TRAINS_FAILED_MESSAGE.to_string());
                return None;
            }
        };

        let trains = normalize_train_list(&raw);
        log!("Train list has {} entries", trains.len());
        if trains.is_empty() {
            self.state = SearchState::Empty;
            return None;
        }

        let restore = store
            .get(LAST_TRAIN_ID_KEY)
            .filter(|saved| !saved.is_empty())
            .and_then(|saved| trains.iter().find(|t| t.matches(&saved)))
            .map(|t| t.restore_identity().to_string());

        self.listed_for = Some(query);
        self.state = SearchState::Listed(trains);
        restore
    }

    /// Pick the listed train at `position`, remembering the search that found it
    ///
    /// Returns the identifier to display, or `None` if nothing is listed there.
    pub fn select(&self, position: usize, store: &impl KeyValueStore) -> Option<String> {
        let SearchState::Listed(trains) = &self.state else {
            return None;
        };
        let train = trains.get(position)?;

        if let Some(query) = &self.listed_for {
            persist(store, LAST_SOURCE_KEY, &query.source);
            persist(store, LAST_DESTINATION_KEY, &query.destination);
        }

        Some(train.identity().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    fn query() -> SearchQuery {
        SearchQuery::new("Dadar", "Thane").unwrap()
    }

    #[test]
    fn test_blank_input_rejected() {
        let mut flow = SearchFlow::default();
        assert_eq!(flow.begin("  ", "Thane"), Err(InputError::MissingEndpoints));
        assert_eq!(flow.begin("Dadar", ""), Err(InputError::MissingEndpoints));
        assert_eq!(flow.state(), &SearchState::Idle);
        assert_eq!(
            InputError::MissingEndpoints.to_string(),
            "Please enter both source and destination."
        );
    }

    #[test]
    fn test_begin_trims_and_loads() {
        let mut flow = SearchFlow::default();
        let query = flow.begin(" Dadar ", "Thane\n").unwrap();
        assert_eq!(query.source, "Dadar");
        assert_eq!(query.destination, "Thane");
        assert_eq!(flow.state(), &SearchState::Loading);
    }

    #[test]
    fn test_transport_failure_is_error() {
        let mut flow = SearchFlow::default();
        let store = MemoryStorage::default();
        let restore = flow.finish(query(), Err("HTTP error: 500".to_string()), &store);
        assert_eq!(restore, None);
        assert_eq!(
            flow.state(),
            &SearchState::Error("Failed to load train data.".to_string())
        );
    }

    #[test]
    fn test_no_trains_is_empty() {
        let mut flow = SearchFlow::default();
        let store = MemoryStorage::default();
        flow.finish(query(), Ok(json!([])), &store);
        assert_eq!(flow.state(), &SearchState::Empty);
        flow.finish(query(), Ok(Value::Null), &store);
        assert_eq!(flow.state(), &SearchState::Empty);
    }

    #[test]
    fn test_restore_matches_code_and_returns_id() {
        let mut flow = SearchFlow::default();
        let store = MemoryStorage::with_entries([(LAST_TRAIN_ID_KEY, "98122")]);
        let restore = flow.finish(
            query(),
            Ok(json!([{"train_id": 1, "code": "98122"}, {"train_id": 2, "code": "98123"}])),
            &store,
        );
        assert_eq!(restore.as_deref(), Some("1"));
    }

    #[test]
    fn test_no_restore_without_match() {
        let mut flow = SearchFlow::default();
        let store = MemoryStorage::with_entries([(LAST_TRAIN_ID_KEY, "Train9")]);
        let restore = flow.finish(query(), Ok(json!({"Train1": {}, "Train2": {}})), &store);
        assert_eq!(restore, None);
        assert!(matches!(flow.state(), SearchState::Listed(trains) if trains.len() == 2));
    }

    #[test]
    fn test_select_persists_query() {
        let mut flow = SearchFlow::default();
        let store = MemoryStorage::default();
        flow.finish(query(), Ok(json!([{"train_id": 1, "code": "98122"}])), &store);

        assert_eq!(flow.select(0, &store).as_deref(), Some("98122"));
        assert_eq!(store.get(LAST_SOURCE_KEY).as_deref(), Some("Dadar"));
        assert_eq!(store.get(LAST_DESTINATION_KEY).as_deref(), Some("Thane"));
        assert_eq!(flow.select(5, &store), None);
    }
}

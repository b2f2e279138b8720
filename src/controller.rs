use chrono::NaiveDateTime;
use serde_json::Value;

use crate::api::StatusOutcome;
use crate::flows::{CrowdFlow, CrowdState, InputError, SearchFlow, SearchQuery, SearchState};
use crate::refresh::{AutoRefresh, IntervalScheduler, RefreshInterval};
use crate::storage::{KeyValueStore, SavedSelection};

/// Everything the page displays, copied out of the controller after each change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub search: SearchState,
    pub crowd: CrowdState,
    pub controls_visible: bool,
    pub auto_refresh: bool,
    pub interval: RefreshInterval,
}

/// View state of the page: the persisted store, both flows, and the refresh timer
///
/// Methods that start displaying a train return its id; the caller is
/// expected to fetch that train's status and hand it to `finish_status`.
pub struct PageController<S: KeyValueStore, T: IntervalScheduler> {
    store: S,
    search: SearchFlow,
    crowd: CrowdFlow<T>,
}

impl<S: KeyValueStore, T: IntervalScheduler> PageController<S, T> {
    pub fn new(store: S, refresh: AutoRefresh<T>) -> Self {
        Self {
            store,
            search: SearchFlow::default(),
            crowd: CrowdFlow::new(refresh),
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn search(&self) -> &SearchFlow {
        &self.search
    }

    #[must_use]
    pub fn crowd(&self) -> &CrowdFlow<T> {
        &self.crowd
    }

    #[must_use]
    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            search: self.search.state().clone(),
            crowd: self.crowd.state().clone(),
            controls_visible: self.crowd.controls_visible(),
            auto_refresh: self.crowd.auto_refresh().enabled(),
            interval: self.crowd.auto_refresh().interval(),
        }
    }

    /// Selections from the previous visit, read once at page load
    #[must_use]
    pub fn saved_selection(&self) -> SavedSelection {
        SavedSelection::load(&self.store)
    }

    /// Show the train viewed on the previous visit, if any
    pub fn restore_last_train(&mut self) -> Option<String> {
        let train_id = self.saved_selection().train_id?;
        self.show_train(&train_id);
        Some(train_id)
    }

    /// # Errors
    ///
    /// Returns an `InputError` if source or destination is blank
    pub fn begin_search(&mut self, source: &str, destination: &str) -> Result<SearchQuery, InputError> {
        self.search.begin(source, destination)
    }

    /// Apply the train list; shows the previously viewed train if it is listed
    pub fn finish_search(&mut self, query: SearchQuery, response: Result<Value, String>) -> Option<String> {
        let train_id = self.search.finish(query, response, &self.store)?;
        self.show_train(&train_id);
        Some(train_id)
    }

    /// The user picked the listed train at `position`
    pub fn select_train(&mut self, position: usize) -> Option<String> {
        let train_id = self.search.select(position, &self.store)?;
        self.show_train(&train_id);
        Some(train_id)
    }

    pub fn show_train(&mut self, train_id: &str) {
        self.crowd.show(train_id, &self.store);
    }

    /// Manual refresh of the train on display
    pub fn refresh_now(&mut self) -> Option<String> {
        let train_id = self.crowd.current_train()?.to_string();
        self.show_train(&train_id);
        Some(train_id)
    }

    pub fn finish_status(
        &mut self,
        train_id: &str,
        outcome: Result<StatusOutcome, String>,
        fetched_at: NaiveDateTime,
    ) {
        self.crowd.finish(train_id, outcome, fetched_at);
    }

    pub fn set_auto_refresh(&mut self, enabled: bool) {
        self.crowd.set_auto_refresh(enabled);
    }

    pub fn set_refresh_interval(&mut self, interval: RefreshInterval) {
        self.crowd.set_refresh_interval(interval);
    }
}

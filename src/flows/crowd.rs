use chrono::NaiveDateTime;

use crate::api::StatusOutcome;
use crate::constants::{LAST_TRAIN_ID_KEY, NO_COACH_DATA_MESSAGE, STATUS_FAILED_MESSAGE};
#[allow(unused_imports)]
use crate::logging::log;
use crate::normalize::TrainStatus;
use crate::refresh::{AutoRefresh, IntervalScheduler, RefreshInterval};
use crate::render::{render_train, TrainVisual};
use crate::storage::{persist, KeyValueStore};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CrowdState {
    #[default]
    Idle,
    Loading(String),
    Rendered {
        visual: TrainVisual,
        updated_at: NaiveDateTime,
    },
    /// The server answered but reported no coaches in any known shape
    NoData(String),
    /// Non-success status; holds the server message or the default one
    NotFound(String),
    Error(String),
}

/// Per-train occupancy display with its auto-refresh timer
pub struct CrowdFlow<T: IntervalScheduler> {
    state: CrowdState,
    current_train: Option<String>,
    controls_visible: bool,
    refresh: AutoRefresh<T>,
}

impl<T: IntervalScheduler> CrowdFlow<T> {
    pub fn new(refresh: AutoRefresh<T>) -> Self {
        Self {
            state: CrowdState::Idle,
            current_train: None,
            controls_visible: false,
            refresh,
        }
    }

    #[must_use]
    pub fn state(&self) -> &CrowdState {
        &self.state
    }

    #[must_use]
    pub fn current_train(&self) -> Option<&str> {
        self.current_train.as_deref()
    }

    #[must_use]
    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    #[must_use]
    pub fn auto_refresh(&self) -> &AutoRefresh<T> {
        &self.refresh
    }

    /// Start displaying `train_id`: remember it, reveal the refresh controls
    /// and restart auto-refresh for it
    pub fn show(&mut self, train_id: &str, store: &impl KeyValueStore) {
        log!("Showing crowd for train {train_id}");
        self.current_train = Some(train_id.to_string());
        persist(store, LAST_TRAIN_ID_KEY, train_id);
        self.controls_visible = true;
        self.refresh.reconfigure(Some(train_id));
        self.state = CrowdState::Loading(train_id.to_string());
    }

    /// Apply a status response; whichever response arrives last is displayed
    pub fn finish(
        &mut self,
        train_id: &str,
        outcome: Result<StatusOutcome, String>,
        fetched_at: NaiveDateTime,
    ) {
        self.state = match outcome {
            Ok(StatusOutcome::Found(raw)) => {
                let status = TrainStatus::from_value(&raw, train_id);
                if status.coaches.is_empty() {
                    CrowdState::NoData(NO_COACH_DATA_MESSAGE.to_string())
                } else {
                    log!("Rendering {} coaches for {}", status.coaches.len(), status.title);
                    CrowdState::Rendered {
                        visual: render_train(&status.title, &status.coaches),
                        updated_at: fetched_at,
                    }
                }
            }
            Ok(StatusOutcome::NotFound(message)) => CrowdState::NotFound(message),
            Err(e) => {
                leptos::logging::error!("Error fetching train status: {e}");
                CrowdState::Error(STATUS_FAILED_MESSAGE.to_string())
            }
        };
    }

    pub fn set_auto_refresh(&mut self, enabled: bool) {
        self.refresh
            .set_enabled(enabled, self.current_train.as_deref());
    }

    pub fn set_refresh_interval(&mut self, interval: RefreshInterval) {
        self.refresh
            .set_interval(interval, self.current_train.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::refresh::testing::FakeScheduler;
    use crate::render::VisualBlock;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    fn fetched_at() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(8, 30, 0))
            .unwrap()
    }

    fn flow() -> (CrowdFlow<FakeScheduler>, FakeScheduler, Rc<RefCell<Vec<String>>>) {
        let scheduler = FakeScheduler::default();
        let ticks = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&ticks);
        let refresh = AutoRefresh::new(scheduler.clone(), move |id: &str| {
            sink.borrow_mut().push(id.to_string());
        });
        (CrowdFlow::new(refresh), scheduler, ticks)
    }

    #[test]
    fn test_show_persists_and_loads() {
        let (mut flow, scheduler, _) = flow();
        let store = MemoryStorage::default();
        assert!(!flow.controls_visible());

        flow.show("12951", &store);

        assert_eq!(store.get(LAST_TRAIN_ID_KEY).as_deref(), Some("12951"));
        assert_eq!(flow.current_train(), Some("12951"));
        assert!(flow.controls_visible());
        assert_eq!(flow.state(), &CrowdState::Loading("12951".to_string()));
        // auto-refresh is off by default
        assert!(scheduler.scheduled().is_empty());
    }

    #[test]
    fn test_mapping_status_renders_card() {
        let (mut flow, _, _) = flow();
        let store = MemoryStorage::default();
        flow.show("12951", &store);
        flow.finish(
            "12951",
            Ok(StatusOutcome::Found(json!({"coaches": {"Coach1": {"count": 19}}}))),
            fetched_at(),
        );

        let CrowdState::Rendered { visual, updated_at } = flow.state() else {
            panic!("expected rendered state, got {:?}", flow.state());
        };
        assert_eq!(*updated_at, fetched_at());
        assert_eq!(visual.heading, "12951 — Coaches");
        assert_eq!(visual.blocks[0], VisualBlock::Engine);
        let cards: Vec<_> = visual.coach_cards().collect();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].badge, "Coach1");
        assert_eq!(cards[0].occupancy_label, "Occupancy: 95%");
        assert_eq!(cards[0].status_label, "Overcrowded");
    }

    #[test]
    fn test_not_found_message_kept() {
        let (mut flow, _, _) = flow();
        flow.finish(
            "T9",
            Ok(StatusOutcome::NotFound("Train T9 not found".to_string())),
            fetched_at(),
        );
        assert_eq!(flow.state(), &CrowdState::NotFound("Train T9 not found".to_string()));
    }

    #[test]
    fn test_transport_error() {
        let (mut flow, _, _) = flow();
        flow.finish("T9", Err("Request failed".to_string()), fetched_at());
        assert_eq!(
            flow.state(),
            &CrowdState::Error("Failed to load train status.".to_string())
        );
    }

    #[test]
    fn test_no_coach_data() {
        let (mut flow, _, _) = flow();
        flow.finish("T9", Ok(StatusOutcome::Found(json!({"line": "Central"}))), fetched_at());
        assert_eq!(
            flow.state(),
            &CrowdState::NoData("No coach data available.".to_string())
        );
    }

    #[test]
    fn test_last_response_wins() {
        let (mut flow, _, _) = flow();
        flow.finish("A", Ok(StatusOutcome::Found(json!({"coach1": {"count": 1}}))), fetched_at());
        flow.finish("B", Err("timeout".to_string()), fetched_at());
        assert!(matches!(flow.state(), CrowdState::Error(_)));
    }

    #[test]
    fn test_auto_refresh_without_train_is_noop() {
        let (mut flow, scheduler, _) = flow();
        flow.set_auto_refresh(true);
        assert!(scheduler.scheduled().is_empty());
        assert!(!flow.auto_refresh().is_running());
    }

    #[test]
    fn test_auto_refresh_after_selection() {
        let (mut flow, scheduler, ticks) = flow();
        let store = MemoryStorage::default();
        flow.show("12951", &store);
        flow.set_auto_refresh(true);

        assert_eq!(scheduler.scheduled(), vec![60_000]);
        assert_eq!(scheduler.live_timers(), 1);
        scheduler.fire();
        assert_eq!(*ticks.borrow(), vec!["12951".to_string()]);

        // showing again restarts rather than stacks the timer
        flow.show("12951", &store);
        flow.set_refresh_interval(RefreshInterval::parse("30000"));
        assert_eq!(scheduler.live_timers(), 1);
        assert_eq!(scheduler.scheduled(), vec![60_000, 60_000, 30_000]);
    }
}

use leptos::{
    component, create_effect, create_signal, spawn_local, store_value, view, IntoView, Signal,
    SignalGet, SignalGetUntracked, SignalSet, StoredValue, WriteSignal,
};
use crate::api::ApiClient;
use crate::components::{
    coach_row::CrowdDisplay, refresh_controls::RefreshControls, search_panel::SearchPanel,
    train_list::TrainList,
};
use crate::controller::PageController;
use crate::flows::{CrowdState, SearchQuery, SearchState};
#[allow(unused_imports)]
use crate::logging::log;
use crate::refresh::{AutoRefresh, GlooScheduler, RefreshInterval};
use crate::storage::LocalStorage;

type Controller = PageController<LocalStorage, GlooScheduler>;

/// Write ends of the signals the page renders from
#[derive(Clone, Copy)]
struct PageView {
    search: WriteSignal<SearchState>,
    crowd: WriteSignal<CrowdState>,
    controls_visible: WriteSignal<bool>,
    auto_refresh: WriteSignal<bool>,
    interval_ms: WriteSignal<u32>,
}

impl PageView {
    /// Copy the controller state into the signals
    ///
    /// The snapshot is taken first so no signal is set while the controller is borrowed.
    fn sync(self, controller: StoredValue<Controller>) {
        let Some(snapshot) = controller.try_with_value(PageController::snapshot) else {
            return;
        };
        self.search.set(snapshot.search);
        self.crowd.set(snapshot.crowd);
        self.controls_visible.set(snapshot.controls_visible);
        self.auto_refresh.set(snapshot.auto_refresh);
        self.interval_ms.set(snapshot.interval.as_millis());
    }
}

async fn load_trains(controller: StoredValue<Controller>, view: PageView, query: SearchQuery) {
    let response = match ApiClient::from_window() {
        Ok(api) => api.fetch_trains().await,
        Err(e) => Err(e),
    };

    let restored = controller
        .try_update_value(|c| c.finish_search(query, response))
        .flatten();
    view.sync(controller);

    if let Some(train_id) = restored {
        log!("Restoring last viewed train {train_id}");
        load_status(controller, view, train_id).await;
    }
}

/// Fetch and display the status of a train the controller has started showing
async fn load_status(controller: StoredValue<Controller>, view: PageView, train_id: String) {
    let outcome = match ApiClient::from_window() {
        Ok(api) => api.fetch_status(&train_id).await,
        Err(e) => Err(e),
    };
    let fetched_at = chrono::Local::now().naive_local();

    controller.update_value(|c| c.finish_status(&train_id, outcome, fetched_at));
    view.sync(controller);
}

fn alert(message: &str) {
    let Some(window) = web_sys::window() else {
        leptos::logging::warn!("No window to show alert: {message}");
        return;
    };
    report_alert(window.alert_with_message(message));
}

/// Returns whether the alert was shown, warning on the console if not
fn report_alert<E: std::fmt::Debug>(result: Result<(), E>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            leptos::logging::warn!("Failed to show alert: {e:?}");
            false
        }
    }
}

#[component]
#[must_use]
pub fn CrowdMonitor() -> impl IntoView {
    let (search_state, set_search_state) = create_signal(SearchState::Idle);
    let (crowd_state, set_crowd_state) = create_signal(CrowdState::Idle);
    let (controls_visible, set_controls_visible) = create_signal(false);
    let (auto_refresh, set_auto_refresh) = create_signal(false);
    let (interval_ms, set_interval_ms) = create_signal(RefreshInterval::default().as_millis());
    let (source, set_source) = create_signal(String::new());
    let (destination, set_destination) = create_signal(String::new());

    // Timer ticks only post a request; the fetch runs in its own task
    let (refresh_request, set_refresh_request) = create_signal(None::<String>);

    let page = PageView {
        search: set_search_state,
        crowd: set_crowd_state,
        controls_visible: set_controls_visible,
        auto_refresh: set_auto_refresh,
        interval_ms: set_interval_ms,
    };

    let refresh = AutoRefresh::new(GlooScheduler, move |train_id: &str| {
        set_refresh_request.set(Some(train_id.to_string()));
    });
    let controller = store_value(PageController::new(LocalStorage, refresh));

    let start_status = move |train_id: String| {
        spawn_local(async move {
            controller.update_value(|c| c.show_train(&train_id));
            page.sync(controller);
            load_status(controller, page, train_id).await;
        });
    };

    create_effect(move |_| {
        if let Some(train_id) = refresh_request.get() {
            start_status(train_id);
        }
    });

    // Restore the previous visit
    let saved = controller.with_value(PageController::saved_selection);
    if let Some(s) = saved.source {
        set_source.set(s);
    }
    if let Some(d) = saved.destination {
        set_destination.set(d);
    }
    let restored = controller
        .try_update_value(PageController::restore_last_train)
        .flatten();
    if let Some(train_id) = restored {
        page.sync(controller);
        spawn_local(load_status(controller, page, train_id));
    }

    let on_search = move || {
        let begun = controller.try_update_value(|c| {
            c.begin_search(&source.get_untracked(), &destination.get_untracked())
        });
        match begun {
            Some(Ok(query)) => {
                page.sync(controller);
                spawn_local(load_trains(controller, page, query));
            }
            Some(Err(e)) => alert(&e.to_string()),
            None => {}
        }
    };

    let on_select = move |position: usize| {
        let selected = controller.try_update_value(|c| c.select_train(position)).flatten();
        if let Some(train_id) = selected {
            page.sync(controller);
            spawn_local(load_status(controller, page, train_id));
        }
    };

    let on_refresh = move || {
        let current = controller.try_update_value(PageController::refresh_now).flatten();
        if let Some(train_id) = current {
            page.sync(controller);
            spawn_local(load_status(controller, page, train_id));
        }
    };

    let on_toggle = move |enabled: bool| {
        controller.update_value(|c| c.set_auto_refresh(enabled));
        page.sync(controller);
    };

    let on_interval = move |raw: String| {
        let interval = RefreshInterval::parse(&raw);
        controller.update_value(|c| c.set_refresh_interval(interval));
        page.sync(controller);
    };

    view! {
        <div class="crowd-monitor">
            <header class="page-header">
                <h1>"Train Crowd Monitor"</h1>
            </header>
            <SearchPanel
                source=source
                set_source=set_source
                destination=destination
                set_destination=set_destination
                on_search=on_search
            />
            <TrainList state=search_state on_select=on_select />
            <RefreshControls
                visible=Signal::derive(move || controls_visible.get())
                auto_refresh=Signal::derive(move || auto_refresh.get())
                interval_ms=Signal::derive(move || interval_ms.get())
                on_refresh=on_refresh
                on_toggle=on_toggle
                on_interval=on_interval
            />
            <CrowdDisplay state=crowd_state />
        </div>
    }
}

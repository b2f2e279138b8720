use leptos::{component, event_target_checked, event_target_value, view, CollectView, IntoView, Signal, SignalGet};
use crate::constants::REFRESH_INTERVAL_CHOICES;

/// Manual refresh button plus the auto-refresh toggle and interval selector
///
/// Hidden until a train has been shown.
#[component]
#[must_use]
pub fn RefreshControls(
    visible: Signal<bool>,
    auto_refresh: Signal<bool>,
    interval_ms: Signal<u32>,
    on_refresh: impl Fn() + 'static + Copy,
    on_toggle: impl Fn(bool) + 'static + Copy,
    on_interval: impl Fn(String) + 'static + Copy,
) -> impl IntoView {
    view! {
        <div
            id="controls"
            class="refresh-controls"
            style:display=move || if visible.get() { "block" } else { "none" }
        >
            <button id="refreshBtn" on:click=move |_| on_refresh()>
                "Refresh"
            </button>
            <label class="auto-refresh">
                <input
                    type="checkbox"
                    id="autoRefreshToggle"
                    prop:checked=move || auto_refresh.get()
                    on:change=move |ev| on_toggle(event_target_checked(&ev))
                />
                "Auto-refresh"
            </label>
            <select id="autoInterval" on:change=move |ev| on_interval(event_target_value(&ev))>
                {REFRESH_INTERVAL_CHOICES
                    .into_iter()
                    .map(|(ms, label)| view! {
                        <option value=ms.to_string() selected=move || interval_ms.get() == ms>
                            {label}
                        </option>
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

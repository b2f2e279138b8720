use leptos::{component, event_target_value, view, IntoView, ReadSignal, SignalGet, SignalSet, WriteSignal};

#[component]
#[must_use]
pub fn SearchPanel(
    source: ReadSignal<String>,
    set_source: WriteSignal<String>,
    destination: ReadSignal<String>,
    set_destination: WriteSignal<String>,
    on_search: impl Fn() + 'static + Copy,
) -> impl IntoView {
    view! {
        <div class="search-panel">
            <input
                id="source"
                type="text"
                placeholder="Source"
                prop:value=move || source.get()
                on:input=move |ev| set_source.set(event_target_value(&ev))
            />
            <input
                id="destination"
                type="text"
                placeholder="Destination"
                prop:value=move || destination.get()
                on:input=move |ev| set_destination.set(event_target_value(&ev))
            />
            <button id="searchBtn" class="primary" on:click=move |_| on_search()>
                "Search"
            </button>
        </div>
    }
}

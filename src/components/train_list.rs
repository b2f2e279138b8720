use leptos::{component, view, CollectView, IntoView, ReadSignal, SignalGet};
use crate::constants::NO_TRAINS_MESSAGE;
use crate::flows::SearchState;

#[component]
#[must_use]
pub fn TrainList(
    state: ReadSignal<SearchState>,
    on_select: impl Fn(usize) + 'static + Copy,
) -> impl IntoView {
    view! {
        <div id="trainList" class="train-list">
            {move || match state.get() {
                SearchState::Idle => ().into_view(),
                SearchState::Loading => view! { <div>"Loading trains…"</div> }.into_view(),
                SearchState::Empty => view! { <div>{NO_TRAINS_MESSAGE}</div> }.into_view(),
                SearchState::Error(message) => view! {
                    <div class="error-message" style="color: red;">{message}</div>
                }.into_view(),
                SearchState::Listed(trains) => trains
                    .into_iter()
                    .enumerate()
                    .map(|(position, train)| {
                        let title = train.schedule_title();
                        let line = train.line;
                        view! {
                            <div class="train-item" on:click=move |_| on_select(position)>
                                <strong>{title}</strong>
                                <div class="line">{line}</div>
                            </div>
                        }
                    })
                    .collect_view(),
            }}
        </div>
    }
}

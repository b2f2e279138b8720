use leptos::{component, view, CollectView, IntoView, ReadSignal, SignalGet};
use crate::flows::CrowdState;
use crate::render::{CoachCard, TrainVisual, VisualBlock};

#[component]
fn CoachBlock(card: CoachCard) -> impl IntoView {
    let class = card.css_class();
    view! {
        <div class=class>
            <div class="bar"></div>
            <div class="body">
                <div class="badge">{card.badge}</div>
                <div class="statusText">{card.status_label}</div>
                <div class="label">{card.occupancy_label}</div>
            </div>
        </div>
    }
}

#[component]
fn TrainRow(visual: TrainVisual) -> impl IntoView {
    view! {
        <h2>{visual.heading}</h2>
        <div class="train-visual">
            <div class="coach-row">
                {visual.blocks
                    .into_iter()
                    .map(|block| match block {
                        VisualBlock::Engine => view! { <div class="engine">"ENGINE"</div> }.into_view(),
                        VisualBlock::Coach(card) => view! { <CoachBlock card=card /> }.into_view(),
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// Occupancy panel for the selected train
#[component]
#[must_use]
pub fn CrowdDisplay(state: ReadSignal<CrowdState>) -> impl IntoView {
    view! {
        <div id="crowdDisplay" class="crowd-display">
            {move || match state.get() {
                CrowdState::Idle => ().into_view(),
                CrowdState::Loading(_) => view! { <p>"Loading coach data…"</p> }.into_view(),
                CrowdState::NoData(message) => view! { <p>{message}</p> }.into_view(),
                CrowdState::NotFound(message) | CrowdState::Error(message) => view! {
                    <p class="error-message" style="color: red;">{message}</p>
                }.into_view(),
                CrowdState::Rendered { visual, updated_at } => view! {
                    <TrainRow visual=visual />
                    <p class="last-updated">
                        "Last updated " {updated_at.format("%H:%M:%S").to_string()}
                    </p>
                }.into_view(),
            }}
        </div>
    }
}

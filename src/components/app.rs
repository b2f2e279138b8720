use leptos::*;
use leptos_meta::*;
use crate::components::crowd_monitor::CrowdMonitor;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/train_crowd.css"/>
        <Title text="Train Crowd Monitor"/>

        <div class="app">
            <CrowdMonitor />
        </div>
    }
}

use leptos::prelude::*;

/// Full-screen overlay shown while a background task runs. The message is
/// updated in place with the task's progress meta.
#[component]
pub fn LoadingOverlay(
    #[prop(into)] visible: Signal<bool>,
    #[prop(into)] message: Signal<String>,
) -> impl IntoView {
    view! {
        <Show when=move || visible.get()>
            <div class="loading-overlay">
                <div class="loading-overlay__panel">
                    <div class="loading-overlay__spinner"></div>
                    <p class="loading-overlay__message">{move || message.get()}</p>
                </div>
            </div>
        </Show>
    }
}

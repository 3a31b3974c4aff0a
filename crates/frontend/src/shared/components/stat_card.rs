use leptos::prelude::*;

use crate::shared::icons::icon;

/// Small statistics card used on the history screen.
#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] icon_name: String,
) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-card__icon">{icon(&icon_name)}</div>
            <div class="stat-card__body">
                <span class="stat-card__value">{move || value.get()}</span>
                <span class="stat-card__label">{label}</span>
            </div>
        </div>
    }
}

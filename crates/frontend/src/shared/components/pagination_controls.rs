use contracts::history::Pagination;
use leptos::prelude::*;

/// Previous/next controls plus a "page X of Y" indicator.
#[component]
pub fn PaginationControls(
    #[prop(into)] pagination: Signal<Pagination>,
    on_page: Callback<u32>,
) -> impl IntoView {
    view! {
        <div class="pagination">
            <button
                class="pagination__button"
                disabled=move || !pagination.get().has_previous
                on:click=move |_| {
                    let page = pagination.get_untracked().current_page;
                    on_page.run(page.saturating_sub(1).max(1));
                }
            >
                "Anterior"
            </button>
            <span class="pagination__info">
                {move || {
                    let p = pagination.get();
                    format!("Página {} de {} ({} itens)", p.current_page, p.total_pages.max(1), p.total_items)
                }}
            </span>
            <button
                class="pagination__button"
                disabled=move || !pagination.get().has_next
                on:click=move |_| {
                    let page = pagination.get_untracked().current_page;
                    on_page.run(page + 1);
                }
            >
                "Próxima"
            </button>
        </div>
    }
}

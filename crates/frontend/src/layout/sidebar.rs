use leptos::prelude::*;

use super::{use_navigation, Page};
use crate::shared::icons::icon;

const MENU: &[(Page, &str, &str)] = &[
    (Page::Organizador, "Organizador IA", "sparkles"),
    (Page::CriarListing, "Criar Listing", "file-spreadsheet"),
    (Page::ExtrairImagens, "Extrair Imagens", "image"),
    (Page::Configuracoes, "Configurações", "settings"),
];

#[component]
pub fn Sidebar() -> impl IntoView {
    let nav = use_navigation();

    view! {
        <aside class=move || {
            if nav.sidebar_open.get() { "sidebar" } else { "sidebar sidebar--collapsed" }
        }>
            <div class="sidebar__header">
                <span class="sidebar__logo">"BeeCatalog"</span>
                <button
                    class="sidebar__toggle"
                    aria-label="Alternar menu"
                    on:click=move |_| nav.sidebar_open.update(|open| *open = !*open)
                >
                    {icon("menu")}
                </button>
            </div>
            <nav class="sidebar__nav">
                {MENU
                    .iter()
                    .map(|(page, label, icon_name)| {
                        let page = *page;
                        view! {
                            <button
                                class=move || {
                                    if nav.active.get() == page {
                                        "sidebar__item sidebar__item--active"
                                    } else {
                                        "sidebar__item"
                                    }
                                }
                                on:click=move |_| nav.goto(page)
                            >
                                {icon(icon_name)}
                                <span class="sidebar__label">{*label}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
        </aside>
    }
}

//! "Configurações" page. The main tab is the cataloging history: statistics
//! cards, filters, a paged product table and the validate/delete actions
//! over the backend's memory.

use contracts::history::{
    HistoryData, HistoryFilters, HistoryProduct, Pagination, ProductStatus, Statistics,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use crate::layout::notifications::use_notifications;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::ui::{Button, Input, Select};
use crate::shared::date_utils::format_date_br;
use crate::shared::icons::icon;

const PAGE_SIZE: u32 = 20;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Historico,
    Sistema,
}

#[component]
pub fn ConfiguracoesPage() -> impl IntoView {
    let active_tab = RwSignal::new(Tab::Historico);

    view! {
        <div class="page page--settings">
            <h1 class="page__title">"Configurações"</h1>

            <div class="tabs">
                <button
                    class=move || {
                        if active_tab.get() == Tab::Historico { "tabs__item tabs__item--active" } else { "tabs__item" }
                    }
                    on:click=move |_| active_tab.set(Tab::Historico)
                >
                    {icon("history")}
                    "Histórico"
                </button>
                <button
                    class=move || {
                        if active_tab.get() == Tab::Sistema { "tabs__item tabs__item--active" } else { "tabs__item" }
                    }
                    on:click=move |_| active_tab.set(Tab::Sistema)
                >
                    {icon("settings")}
                    "Sistema"
                </button>
            </div>

            {move || match active_tab.get() {
                Tab::Historico => view! { <HistoryTab /> }.into_any(),
                Tab::Sistema => view! { <SystemTab /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn HistoryTab() -> impl IntoView {
    let notifications = use_notifications();

    let filters = RwSignal::new(HistoryFilters::default());
    let products = RwSignal::new(Vec::<HistoryProduct>::new());
    let pagination = RwSignal::new(Pagination::default());
    let statistics = RwSignal::new(Statistics::default());
    let loading = RwSignal::new(false);
    let delete_target = RwSignal::new(None::<HistoryProduct>);

    let apply = move |data: HistoryData| {
        products.set(data.products);
        pagination.set(data.pagination);
        statistics.set(data.statistics);
    };

    let load = move |page: u32| {
        let current_filters = filters.get_untracked();
        loading.set(true);
        spawn_local(async move {
            match api::fetch_history(&current_filters, page, PAGE_SIZE).await {
                Ok(data) => apply(data),
                Err(e) => {
                    log::error!("history fetch failed: {}", e);
                    notifications.error("Erro de conexão ao carregar histórico");
                }
            }
            loading.set(false);
        });
    };

    load(1);

    let reload_current = move || {
        let page = pagination.with_untracked(|p| p.current_page.max(1));
        load(page);
    };

    let on_validate = move |product: HistoryProduct| {
        spawn_local(async move {
            match api::validate_product(&product.id).await {
                Ok(()) => {
                    notifications.success("Produto validado com sucesso!");
                    reload_current();
                }
                Err(e) => {
                    log::error!("validate failed: {}", e);
                    notifications.error(e.message);
                }
            }
        });
    };

    let on_confirm_delete = move |_| {
        let Some(product) = delete_target.get_untracked() else {
            return;
        };
        delete_target.set(None);
        spawn_local(async move {
            match api::delete_product(&product.id).await {
                Ok(()) => {
                    notifications.success("Produto excluído com sucesso!");
                    reload_current();
                }
                Err(e) => {
                    log::error!("delete failed: {}", e);
                    notifications.error(e.message);
                }
            }
        });
    };

    let set_filter = move |apply_change: fn(&mut HistoryFilters, String)| {
        Callback::new(move |value: String| {
            filters.update(|f| apply_change(f, value));
        })
    };

    view! {
        <div class="history">
            <div class="history__stats">
                <StatCard
                    label="Total de Produtos"
                    icon_name="database"
                    value=Signal::derive(move || statistics.with(|s| s.total_products.to_string()))
                />
                <StatCard
                    label="Validados"
                    icon_name="check-circle"
                    value=Signal::derive(move || statistics.with(|s| s.by_status.validated.to_string()))
                />
                <StatCard
                    label="Pendentes"
                    icon_name="alert-circle"
                    value=Signal::derive(move || statistics.with(|s| s.by_status.pending.to_string()))
                />
                <StatCard
                    label="Qualidade Média"
                    icon_name="trending-up"
                    value=Signal::derive(move || {
                        statistics.with(|s| format!("{:.1}%", s.average_quality_score))
                    })
                />
            </div>

            <div class="history__filters">
                <Input
                    label="Buscar"
                    id="history_search"
                    placeholder="Nome ou SKU..."
                    value=Signal::derive(move || filters.with(|f| f.search.clone()))
                    on_input=set_filter(|f, v| f.search = v)
                />
                <Select
                    label="Status"
                    value=Signal::derive(move || filters.with(|f| f.status.clone()))
                    options=vec![
                        ("all".to_string(), "Todos".to_string()),
                        ("validated".to_string(), "Validado".to_string()),
                        ("pending".to_string(), "Pendente".to_string()),
                    ]
                    on_change=set_filter(|f, v| f.status = v)
                />
                <Select
                    label="Origem"
                    value=Signal::derive(move || filters.with(|f| f.origin.clone()))
                    options=vec![
                        ("all".to_string(), "Todas".to_string()),
                        ("spreadsheet".to_string(), "Planilha".to_string()),
                        ("link_extraction".to_string(), "Extração de Link".to_string()),
                        ("manual".to_string(), "Manual".to_string()),
                    ]
                    on_change=set_filter(|f, v| f.origin = v)
                />
                <Input
                    label="De"
                    id="history_date_from"
                    input_type="date"
                    value=Signal::derive(move || filters.with(|f| f.date_from.clone()))
                    on_input=set_filter(|f, v| f.date_from = v)
                />
                <Input
                    label="Até"
                    id="history_date_to"
                    input_type="date"
                    value=Signal::derive(move || filters.with(|f| f.date_to.clone()))
                    on_input=set_filter(|f, v| f.date_to = v)
                />
                <Button on_click=Callback::new(move |_| load(1))>
                    {icon("search")}
                    "Filtrar"
                </Button>
            </div>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="history__loading">"Carregando histórico..."</p> }
            >
                <table class="history__table">
                    <thead>
                        <tr>
                            <th>"Produto"</th>
                            <th>"SKU"</th>
                            <th>"Data"</th>
                            <th>"Origem"</th>
                            <th>"Status"</th>
                            <th>"Qualidade"</th>
                            <th>"Ações"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || products.get()
                            key=|p| p.id.to_string()
                            children=move |product| {
                                let row = product.clone();
                                let validate_row = product.clone();
                                let is_pending = product.status != Some(ProductStatus::Validated);
                                view! {
                                    <tr>
                                        <td>{row.name.clone()}</td>
                                        <td>{row.sku.clone().unwrap_or_else(|| "—".to_string())}</td>
                                        <td>
                                            {row
                                                .created_at
                                                .as_deref()
                                                .map(format_date_br)
                                                .unwrap_or_else(|| "—".to_string())}
                                        </td>
                                        <td>
                                            {row
                                                .origin
                                                .map(|o| o.label())
                                                .unwrap_or("Desconhecido")}
                                        </td>
                                        <td>
                                            <span class=if is_pending {
                                                "badge badge--pending"
                                            } else {
                                                "badge badge--validated"
                                            }>
                                                {row.status.map(|s| s.label()).unwrap_or("Pendente")}
                                            </span>
                                        </td>
                                        <td>
                                            {row
                                                .data_quality_score
                                                .map(|score| format!("{:.0}%", score))
                                                .unwrap_or_else(|| "—".to_string())}
                                        </td>
                                        <td class="history__actions">
                                            <Show when=move || is_pending>
                                                {
                                                    let target = validate_row.clone();
                                                    view! {
                                                        <Button
                                                            size="sm"
                                                            variant="secondary"
                                                            on_click=Callback::new(move |_| {
                                                                on_validate(target.clone())
                                                            })
                                                        >
                                                            {icon("check-circle")}
                                                        </Button>
                                                    }
                                                }
                                            </Show>
                                            {
                                                let target = product.clone();
                                                view! {
                                                    <Button
                                                        size="sm"
                                                        variant="danger"
                                                        on_click=Callback::new(move |_| {
                                                            delete_target.set(Some(target.clone()))
                                                        })
                                                    >
                                                        {icon("trash")}
                                                    </Button>
                                                }
                                            }
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>

                <Show when=move || products.with(|p| p.is_empty())>
                    <p class="history__empty">"Nenhum produto encontrado."</p>
                </Show>
            </Show>

            <PaginationControls
                pagination=pagination
                on_page=Callback::new(move |page| load(page))
            />

            <Show when=move || delete_target.with(|t| t.is_some())>
                <div class="modal-overlay">
                    <div class="modal">
                        <h3 class="modal__title">"Excluir produto"</h3>
                        <p class="modal__body">
                            {move || {
                                delete_target
                                    .with(|t| {
                                        t.as_ref()
                                            .map(|p| {
                                                format!(
                                                    "Tem certeza que deseja excluir \"{}\" do histórico? Esta ação não pode ser desfeita.",
                                                    p.name,
                                                )
                                            })
                                            .unwrap_or_default()
                                    })
                            }}
                        </p>
                        <div class="modal__actions">
                            <Button
                                variant="secondary"
                                on_click=Callback::new(move |_| delete_target.set(None))
                            >
                                "Cancelar"
                            </Button>
                            <Button variant="danger" on_click=Callback::new(on_confirm_delete)>
                                "Excluir"
                            </Button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn SystemTab() -> impl IntoView {
    view! {
        <div class="panel">
            <h2 class="panel__title">"Sistema"</h2>
            <p class="panel__hint">
                "O backend é configurado no servidor. Esta aba reúne informações da instalação."
            </p>
            <ul class="system-info">
                <li>
                    <strong>"Backend: "</strong>
                    {crate::shared::api_utils::api_base()}
                </li>
                <li>
                    <strong>"Versão do frontend: "</strong>
                    {env!("CARGO_PKG_VERSION")}
                </li>
            </ul>
        </div>
    }
}

//! "Extrair Imagens" page: paste a listing URL, let the backend scrape the
//! product images and show them in a grid.

use contracts::tasks::{decode_outcome, JobKind, JobOutcome};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use crate::layout::loading::LoadingOverlay;
use crate::layout::notifications::use_notifications;
use crate::shared::components::ui::{Button, Input};
use crate::shared::icons::icon;
use crate::shared::poller::{start_polling, PollerHandle, FAST_POLL_INTERVAL_MS};

#[component]
pub fn ExtrairImagensPage() -> impl IntoView {
    let notifications = use_notifications();

    let link = RwSignal::new(String::new());
    let images = RwSignal::new(Vec::<String>::new());
    let loading = RwSignal::new(false);
    let loading_message = RwSignal::new(String::new());
    let poller = StoredValue::new_local(None::<PollerHandle>);

    on_cleanup(move || {
        if let Some(handle) = poller.get_value() {
            handle.cancel();
        }
    });

    let on_submit = move |_| {
        let url = link.get_untracked().trim().to_string();
        if url.is_empty() {
            notifications.warning("Informe o link do anúncio.");
            return;
        }

        if let Some(handle) = poller.get_value() {
            handle.cancel();
        }

        images.set(Vec::new());
        loading.set(true);
        loading_message.set("Enviando solicitação...".to_string());

        spawn_local(async move {
            match api::start_scrape(&url).await {
                Ok(started) => {
                    loading_message
                        .set("Processamento iniciado! Aguardando resultado...".to_string());
                    let handle = start_polling(
                        started.task_id,
                        FAST_POLL_INTERVAL_MS,
                        move |meta| loading_message.set(meta.label("Extraindo imagens...")),
                        move |result| {
                            loading.set(false);
                            match decode_outcome(JobKind::ScrapeImages, result) {
                                Ok(JobOutcome::Images(scraped)) => {
                                    if scraped.image_urls.is_empty() {
                                        notifications
                                            .info("Nenhuma imagem encontrada neste anúncio.");
                                    } else {
                                        notifications.success("Imagens extraídas com sucesso!");
                                    }
                                    images.set(scraped.image_urls);
                                }
                                Ok(_) => notifications
                                    .error("Ocorreu um erro ao extrair as imagens."),
                                Err(e) => notifications.error(e),
                            }
                        },
                        move |message| {
                            loading.set(false);
                            notifications.error(format!("Erro: {}", message));
                        },
                    );
                    poller.set_value(Some(handle));
                }
                Err(e) => {
                    log::error!("scrape-images failed: {}", e);
                    loading.set(false);
                    notifications.error(format!("Erro: {}", e));
                }
            }
        });
    };

    view! {
        <div class="page page--extractor">
            <h1 class="page__title">"Extrair Imagens"</h1>

            <section class="panel">
                <div class="panel__row">
                    <Input
                        label="Link do Anúncio:"
                        id="link"
                        placeholder="https://..."
                        value=link
                        on_input=Callback::new(move |value| link.set(value))
                    />
                    <Button
                        disabled=Signal::derive(move || loading.get())
                        on_click=Callback::new(on_submit)
                    >
                        {icon("link")}
                        "Extrair Imagens"
                    </Button>
                </div>
            </section>

            <Show when=move || !images.with(|imgs| imgs.is_empty())>
                <section class="panel">
                    <h2 class="panel__title">
                        {move || format!("Imagens Extraídas ({})", images.with(|imgs| imgs.len()))}
                    </h2>
                    <div class="image-grid">
                        <For
                            each=move || {
                                images.get().into_iter().enumerate().collect::<Vec<_>>()
                            }
                            key=|(i, url)| (*i, url.clone())
                            children=|(i, url)| {
                                view! {
                                    <div class="image-grid__cell">
                                        <img
                                            src=url
                                            alt=format!("Imagem do produto {}", i + 1)
                                            loading="lazy"
                                        />
                                    </div>
                                }
                            }
                        />
                    </div>
                </section>
            </Show>

            <LoadingOverlay visible=loading message=loading_message />
        </div>
    }
}

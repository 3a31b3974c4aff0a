//! "Organizador IA" page: upload a CSV with raw product information, let
//! the backend's AI organize it into structured products, then hand the
//! result over to the listing page.

use contracts::listing::ProductSeed;
use contracts::tasks::{decode_outcome, JobKind, JobOutcome};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

use super::api;
use crate::layout::loading::LoadingOverlay;
use crate::layout::notifications::use_notifications;
use crate::layout::{use_navigation, use_organizer_handoff, Page};
use crate::shared::components::ui::{Button, FileInput};
use crate::shared::icons::icon;
use crate::shared::poller::{start_polling, PollerHandle, DEFAULT_POLL_INTERVAL_MS};

fn is_csv(file: &File) -> bool {
    file.type_() == "text/csv" || file.name().to_lowercase().ends_with(".csv")
}

#[component]
pub fn OrganizadorPage() -> impl IntoView {
    let notifications = use_notifications();
    let nav = use_navigation();
    let handoff = use_organizer_handoff();

    let csv_file = RwSignal::new_local(None::<File>);
    let generated = RwSignal::new(Vec::<ProductSeed>::new());
    let loading = RwSignal::new(false);
    let loading_message = RwSignal::new(String::new());
    let poller = StoredValue::new_local(None::<PollerHandle>);

    on_cleanup(move || {
        if let Some(handle) = poller.get_value() {
            handle.cancel();
        }
    });

    let on_file = Callback::new(move |file: Option<File>| {
        match file {
            Some(file) if is_csv(&file) => {
                notifications.info(format!("Arquivo selecionado: {}", file.name()));
                csv_file.set(Some(file));
            }
            Some(_) => {
                notifications.warning("Por favor, selecione um arquivo .csv");
                csv_file.set(None);
            }
            None => csv_file.set(None),
        }
    });

    let on_submit = move |_| {
        let Some(file) = csv_file.get_untracked() else {
            notifications.warning("Nenhum arquivo CSV selecionado.");
            return;
        };

        if let Some(handle) = poller.get_value() {
            handle.cancel();
        }

        generated.set(Vec::new());
        loading.set(true);
        loading_message.set("Enviando arquivo para processamento...".to_string());

        spawn_local(async move {
            match api::start_organizer(&file).await {
                Ok(started) => {
                    loading_message
                        .set("Processamento iniciado! Aguardando o resultado...".to_string());
                    let handle = start_polling(
                        started.task_id,
                        DEFAULT_POLL_INTERVAL_MS,
                        move |meta| loading_message.set(meta.label("Gerando conteúdo com IA...")),
                        move |result| {
                            loading.set(false);
                            match decode_outcome(JobKind::OrganizeContent, result) {
                                Ok(JobOutcome::Organized(content)) => {
                                    notifications.success("Conteúdo gerado com sucesso!");
                                    generated.set(content.products_data);
                                }
                                Ok(_) => {
                                    notifications.error("Ocorreu um erro ao gerar o conteúdo.")
                                }
                                Err(e) => notifications.error(e),
                            }
                        },
                        move |message| {
                            loading.set(false);
                            notifications.error(message);
                        },
                    );
                    poller.set_value(Some(handle));
                }
                Err(e) => {
                    log::error!("organizador-ia failed: {}", e);
                    loading.set(false);
                    notifications.error("Erro ao enviar o arquivo.");
                }
            }
        });
    };

    let on_send_to_listing = move |_| {
        let seeds = generated.get_untracked();
        if seeds.is_empty() {
            return;
        }
        handoff.publish(seeds);
        nav.goto(Page::CriarListing);
    };

    view! {
        <div class="page page--organizer">
            <h1 class="page__title">"Organizador IA"</h1>

            <section class="panel">
                <p class="panel__hint">
                    "Envie um arquivo CSV com as informações brutas dos seus produtos. A IA irá organizá-las em títulos, descrições e atributos prontos para o listing."
                </p>
                <div class="panel__row">
                    <FileInput
                        id="csv_upload"
                        accept=".csv"
                        prompt="Selecionar Arquivo CSV"
                        file_name=Signal::derive(move || {
                            csv_file.with(|f| f.as_ref().map(|file| file.name()))
                        })
                        on_file=on_file
                    />
                    <Button
                        disabled=Signal::derive(move || {
                            csv_file.with(|f| f.is_none()) || loading.get()
                        })
                        on_click=Callback::new(on_submit)
                    >
                        {icon("sparkles")}
                        "Organizar com IA"
                    </Button>
                </div>
                <p class="panel__footnote">"Apenas arquivos .csv são permitidos."</p>
            </section>

            <Show when=move || !generated.with(|g| g.is_empty())>
                <section class="panel panel--result">
                    <h2 class="panel__title">"Conteúdo gerado"</h2>
                    <p>
                        "A IA gerou o conteúdo para "
                        <strong>{move || generated.with(|g| g.len())}</strong>
                        " produto(s). Envie estes dados para a página de Criar Listing para validar, editar e gerar a planilha final."
                    </p>
                    <ul class="result-list">
                        <For
                            each=move || {
                                generated
                                    .get()
                                    .into_iter()
                                    .enumerate()
                                    .collect::<Vec<_>>()
                            }
                            key=|(i, _)| *i
                            children=|(_, seed)| {
                                view! {
                                    <li class="result-list__item">
                                        {if seed.fields.titulo.is_empty() {
                                            "(sem título)".to_string()
                                        } else {
                                            seed.fields.titulo.clone()
                                        }}
                                    </li>
                                }
                            }
                        />
                    </ul>
                    <Button on_click=Callback::new(on_send_to_listing)>
                        {icon("file-spreadsheet")}
                        "Enviar para Criar Listing"
                    </Button>
                </section>
            </Show>

            <LoadingOverlay visible=loading message=loading_message />
        </div>
    }
}

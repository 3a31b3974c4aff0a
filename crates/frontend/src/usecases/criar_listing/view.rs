//! "Criar Listing" page: upload a product spreadsheet, edit products,
//! variations and images, then submit everything against the Amazon .xlsm
//! template and download the generated workbook.

use contracts::listing::{
    generate_variation_sku, ListingForm, ProductField, VariationField, VariationKind,
};
use contracts::tasks::{decode_outcome, JobKind, JobOutcome};
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;
use web_sys::File;

use super::api;
use crate::layout::loading::LoadingOverlay;
use crate::layout::notifications::use_notifications;
use crate::layout::use_organizer_handoff;
use crate::shared::components::ui::{Button, FileInput, Input, Select};
use crate::shared::download;
use crate::shared::icons::icon;
use crate::shared::poller::{start_polling, PollerHandle, DEFAULT_POLL_INTERVAL_MS};

type FileForm = ListingForm<File>;
type FormSignal = RwSignal<FileForm, LocalStorage>;

const PRODUCT_FIELDS: &[(ProductField, &str)] = &[
    (ProductField::Titulo, "Título"),
    (ProductField::Sku, "SKU"),
    (ProductField::TipoMarca, "Tipo de Marca"),
    (ProductField::NomeMarca, "Nome da Marca"),
    (ProductField::Preco, "Preço"),
    (ProductField::FbaDba, "FBA/DBA"),
    (ProductField::IdProduto, "ID do Produto"),
    (ProductField::TipoIdProduto, "Tipo de ID do Produto"),
    (ProductField::Ncm, "NCM"),
    (ProductField::Quantidade, "Quantidade"),
    (ProductField::PesoPacote, "Peso do Pacote"),
    (ProductField::ClaPacote, "C/L/A do Pacote"),
    (ProductField::PesoProduto, "Peso do Produto"),
    (ProductField::ClaProduto, "C/L/A do Produto"),
    (ProductField::Ajuste, "Ajuste"),
];

#[component]
pub fn CriarListingPage() -> impl IntoView {
    let notifications = use_notifications();
    let handoff = use_organizer_handoff();

    let form: FormSignal = RwSignal::new_local(FileForm::new());

    // Products handed over by the organizer are consumed exactly once.
    if let Some(seeds) = handoff.take() {
        let count = seeds.len();
        form.update(|f| f.hydrate(seeds));
        notifications.info(format!(
            "{} produto(s) recebido(s) do Organizador IA.",
            count
        ));
    }

    let planilha_file = RwSignal::new_local(None::<File>);
    let template_file = RwSignal::new_local(None::<File>);
    let loading = RwSignal::new(false);
    let loading_message = RwSignal::new(String::new());
    let poller = StoredValue::new_local(None::<PollerHandle>);

    on_cleanup(move || {
        if let Some(handle) = poller.get_value() {
            handle.cancel();
        }
    });

    let on_upload = move |_| {
        let Some(file) = planilha_file.get_untracked() else {
            notifications.warning("Selecione uma planilha de produtos antes de enviar.");
            return;
        };
        loading.set(true);
        loading_message.set("Enviando planilha de produtos...".to_string());
        spawn_local(async move {
            match api::upload_planilha(&file).await {
                Ok(seeds) => {
                    form.update(|f| f.hydrate(seeds));
                    notifications.success("Planilha de produtos carregada!");
                }
                Err(e) => {
                    log::error!("upload-planilha failed: {}", e);
                    notifications.error("Erro ao processar a planilha de produtos.");
                }
            }
            loading.set(false);
        });
    };

    let on_generate = move |_| {
        let template = template_file.get_untracked();
        if let Err(blocker) =
            form.with_untracked(|f| f.check_submission(template.is_some()))
        {
            notifications.warning(blocker.message());
            return;
        }
        let Some(template) = template else {
            return;
        };

        // A resubmission replaces any watcher still alive.
        if let Some(handle) = poller.get_value() {
            handle.cancel();
        }

        loading.set(true);
        loading_message.set("Enviando dados, imagens e template para o backend...".to_string());
        let snapshot = form.get_untracked();

        spawn_local(async move {
            match api::gerar_planilha(&snapshot, &template).await {
                Ok(started) => {
                    loading_message.set("Processamento iniciado! Aguardando o resultado...".to_string());
                    let handle = start_polling(
                        started.task_id,
                        DEFAULT_POLL_INTERVAL_MS,
                        move |meta| loading_message.set(meta.label("Gerando planilha...")),
                        move |result| {
                            loading.set(false);
                            match decode_outcome(JobKind::GenerateSpreadsheet, result) {
                                Ok(JobOutcome::Spreadsheet(sheet)) => {
                                    match download::save_spreadsheet(
                                        &sheet.file_content,
                                        &sheet.filename,
                                    ) {
                                        Ok(()) => {
                                            notifications.success("Planilha gerada com sucesso!")
                                        }
                                        Err(e) => notifications
                                            .error(format!("Erro ao salvar a planilha: {}", e)),
                                    }
                                }
                                Ok(_) => {
                                    notifications.error("Ocorreu um erro ao gerar a planilha.")
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
                    log::error!("gerar-planilha failed: {}", e);
                    loading.set(false);
                    notifications.error("Erro ao enviar os dados para o backend.");
                }
            }
        });
    };

    let product_ids = move || form.with(|f| f.products.iter().map(|p| p.id).collect::<Vec<_>>());

    view! {
        <div class="page page--listing">
            <h1 class="page__title">"Criar Listing"</h1>

            <section class="panel">
                <h2 class="panel__title">"1. Planilha de Produtos (opcional)"</h2>
                <p class="panel__hint">
                    "Envie uma planilha para preencher os produtos automaticamente, ou cadastre-os manualmente abaixo."
                </p>
                <div class="panel__row">
                    <FileInput
                        id="planilha_upload"
                        accept=".xlsx,.xls,.csv"
                        prompt="Selecionar Planilha"
                        file_name=Signal::derive(move || {
                            planilha_file.with(|f| f.as_ref().map(|file| file.name()))
                        })
                        on_file=Callback::new(move |file| planilha_file.set(file))
                    />
                    <Button on_click=Callback::new(on_upload)>
                        {icon("upload")}
                        "Enviar Planilha"
                    </Button>
                </div>
            </section>

            <section class="panel">
                <h2 class="panel__title">"2. Produtos"</h2>
                <For each=product_ids key=|id| *id let:product_id>
                    <ProductCard form product_id />
                </For>
                <Button
                    variant="secondary"
                    on_click=Callback::new(move |_| {
                        form.update(|f| {
                            f.add_product();
                        });
                    })
                >
                    {icon("plus")}
                    "Adicionar Produto"
                </Button>
            </section>

            <section class="panel">
                <h2 class="panel__title">"3. Modelo da Amazon e Geração"</h2>
                <div class="panel__row">
                    <FileInput
                        id="amazon_template_upload"
                        accept=".xlsm"
                        prompt="Selecionar Modelo (.xlsm)"
                        file_name=Signal::derive(move || {
                            template_file.with(|f| f.as_ref().map(|file| file.name()))
                        })
                        on_file=Callback::new(move |file| template_file.set(file))
                    />
                    <Button on_click=Callback::new(on_generate)>
                        {icon("download")}
                        "Gerar Planilha"
                    </Button>
                </div>
            </section>

            <LoadingOverlay visible=loading message=loading_message />
        </div>
    }
}

/// One editable product: scalar fields, variations and image slots.
#[component]
fn ProductCard(form: FormSignal, product_id: Uuid) -> impl IntoView {
    let position = move || {
        form.with(|f| f.products.iter().position(|p| p.id == product_id))
            .map(|i| i + 1)
            .unwrap_or_default()
    };

    let variation_ids = move || {
        form.with(|f| {
            f.products
                .iter()
                .find(|p| p.id == product_id)
                .map(|p| p.variacoes.iter().map(|v| v.id).collect::<Vec<_>>())
                .unwrap_or_default()
        })
    };

    view! {
        <div class="product-card">
            <div class="product-card__header">
                <h3 class="product-card__title">{move || format!("Produto {}", position())}</h3>
                <Button
                    variant="danger"
                    size="sm"
                    on_click=Callback::new(move |_| form.update(|f| f.remove_product(product_id)))
                >
                    {icon("trash")}
                    "Remover"
                </Button>
            </div>

            <div class="product-card__grid">
                {PRODUCT_FIELDS
                    .iter()
                    .map(|(field, label)| {
                        let field = *field;
                        view! {
                            <Input
                                label=label.to_string()
                                id=format!("{}_{}", label.to_lowercase().replace(' ', "_"), product_id)
                                value=Signal::derive(move || {
                                    form.with(|f| {
                                        f.products
                                            .iter()
                                            .find(|p| p.id == product_id)
                                            .map(|p| p.fields.get(field).to_string())
                                            .unwrap_or_default()
                                    })
                                })
                                on_input=Callback::new(move |value| {
                                    form.update(|f| f.set_product_field(product_id, field, value));
                                })
                            />
                        }
                    })
                    .collect_view()}
            </div>

            <div class="product-card__section">
                <h4 class="product-card__subtitle">"Variações"</h4>
                <For each=variation_ids key=|id| *id let:variation_id>
                    <VariationRow form product_id variation_id />
                </For>
                <Button
                    variant="secondary"
                    size="sm"
                    on_click=Callback::new(move |_| {
                        form.update(|f| {
                            let _ = f.add_variation(product_id);
                        });
                    })
                >
                    {icon("plus")}
                    "Adicionar Variação"
                </Button>
            </div>

            <ProductImages form product_id />
        </div>
    }
}

#[component]
fn VariationRow(form: FormSignal, product_id: Uuid, variation_id: Uuid) -> impl IntoView {
    let variation_value = move |read: fn(&contracts::listing::VariationDraft) -> String| {
        form.with(move |f| {
            f.products
                .iter()
                .find(|p| p.id == product_id)
                .and_then(|p| p.variacoes.iter().find(|v| v.id == variation_id))
                .map(read)
                .unwrap_or_default()
        })
    };

    let kind = Signal::derive(move || {
        form.with(|f| {
            f.products
                .iter()
                .find(|p| p.id == product_id)
                .and_then(|p| p.variacoes.iter().find(|v| v.id == variation_id))
                .and_then(|v| v.tipo)
        })
    });

    let set = move |field: VariationField| {
        Callback::new(move |value| {
            form.update(|f| f.set_variation_field(product_id, variation_id, field, value));
        })
    };

    let suggest_sku = move |_| {
        let (parent_sku, index) = form.with_untracked(|f| {
            f.products
                .iter()
                .find(|p| p.id == product_id)
                .map(|p| {
                    let index = p
                        .variacoes
                        .iter()
                        .position(|v| v.id == variation_id)
                        .unwrap_or_default();
                    (p.fields.sku.clone(), index)
                })
                .unwrap_or_default()
        });
        let salt = js_sys::Date::now() as u64;
        let sku = generate_variation_sku(&parent_sku, index, salt);
        form.update(|f| f.set_variation_field(product_id, variation_id, VariationField::Sku, sku));
    };

    view! {
        <div class="variation-row">
            <div class="variation-row__sku">
                <Input
                    label="SKU da Variação"
                    value=Signal::derive(move || variation_value(|v| v.sku.clone()))
                    on_input=set(VariationField::Sku)
                />
                <Button variant="ghost" size="sm" on_click=Callback::new(suggest_sku)>
                    "Gerar SKU"
                </Button>
            </div>

            <Select
                label="Tipo de Variação"
                value=Signal::derive(move || {
                    kind.get().map(|k| k.as_str().to_string()).unwrap_or_default()
                })
                options=vec![
                    (String::new(), "Selecione...".to_string()),
                    ("cor".to_string(), "Cor".to_string()),
                    ("c_l_a_p".to_string(), "C/L/A + Peso".to_string()),
                ]
                on_change=set(VariationField::Tipo)
            />

            <Show when=move || kind.get() == Some(VariationKind::Cor)>
                <Input
                    label="Cor"
                    value=Signal::derive(move || variation_value(|v| v.cor.clone()))
                    on_input=set(VariationField::Cor)
                />
            </Show>

            <Show when=move || kind.get() == Some(VariationKind::ClaPeso)>
                <Input
                    label="C/L/A"
                    value=Signal::derive(move || variation_value(|v| v.cla.clone()))
                    on_input=set(VariationField::Cla)
                />
                <Input
                    label="Peso"
                    value=Signal::derive(move || variation_value(|v| v.peso.clone()))
                    on_input=set(VariationField::Peso)
                />
            </Show>

            <Input
                label="URL da Imagem"
                value=Signal::derive(move || variation_value(|v| v.imagem.clone()))
                on_input=set(VariationField::Imagem)
            />

            <Button
                variant="danger"
                size="sm"
                on_click=Callback::new(move |_| {
                    form.update(|f| f.remove_variation(product_id, variation_id));
                })
            >
                {icon("x")}
            </Button>
        </div>
    }
}

#[component]
fn ProductImages(form: FormSignal, product_id: Uuid) -> impl IntoView {
    let extra_ids = move || {
        form.with(|f| {
            f.products
                .iter()
                .find(|p| p.id == product_id)
                .map(|p| p.imagens.extra.iter().map(|img| img.id).collect::<Vec<_>>())
                .unwrap_or_default()
        })
    };

    let slot_name = move |read: fn(&contracts::listing::ImageSlots<File>) -> Option<String>| {
        form.with(move |f| {
            f.products
                .iter()
                .find(|p| p.id == product_id)
                .and_then(|p| read(&p.imagens))
        })
    };

    view! {
        <div class="product-card__section">
            <h4 class="product-card__subtitle">"Imagens"</h4>
            <div class="image-slots">
                <FileInput
                    id=format!("imagem_principal_{}", product_id)
                    accept="image/*"
                    prompt="Imagem Principal"
                    file_name=Signal::derive(move || {
                        slot_name(|slots| slots.principal.as_ref().map(|f| f.name()))
                    })
                    on_file=Callback::new(move |file| {
                        form.update(|f| f.set_principal_image(product_id, file));
                    })
                />
                <FileInput
                    id=format!("imagem_amostra_{}", product_id)
                    accept="image/*"
                    prompt="Imagem de Amostra"
                    file_name=Signal::derive(move || {
                        slot_name(|slots| slots.amostra.as_ref().map(|f| f.name()))
                    })
                    on_file=Callback::new(move |file| {
                        form.update(|f| f.set_amostra_image(product_id, file));
                    })
                />
            </div>

            <For each=extra_ids key=|id| *id let:image_id>
                <div class="image-slots__extra">
                    <FileInput
                        id=format!("imagem_extra_{}", image_id)
                        accept="image/*"
                        prompt="Imagem Extra"
                        file_name=Signal::derive(move || {
                            form.with(|f| {
                                f.products
                                    .iter()
                                    .find(|p| p.id == product_id)
                                    .and_then(|p| {
                                        p.imagens.extra.iter().find(|img| img.id == image_id)
                                    })
                                    .and_then(|img| img.file.as_ref().map(|f| f.name()))
                            })
                        })
                        on_file=Callback::new(move |file| {
                            form.update(|f| f.set_extra_image_file(product_id, image_id, file));
                        })
                    />
                    <Button
                        variant="danger"
                        size="sm"
                        on_click=Callback::new(move |_| {
                            form.update(|f| f.remove_extra_image(product_id, image_id));
                        })
                    >
                        {icon("x")}
                    </Button>
                </div>
            </For>

            <Button
                variant="ghost"
                size="sm"
                on_click=Callback::new(move |_| {
                    form.update(|f| {
                        let _ = f.add_extra_image(product_id);
                    });
                })
            >
                {icon("plus")}
                "Adicionar Imagem Extra"
            </Button>
        </div>
    }
}

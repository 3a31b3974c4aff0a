//! API client for the listing workflow.

use contracts::listing::{ListingForm, ProductSeed};
use contracts::tasks::StartedTask;
use web_sys::{File, FormData};

use crate::shared::api::{self, ApiError};

/// `POST upload-planilha/` — parses the user's product spreadsheet on the
/// backend and answers the extracted records synchronously (no task).
pub async fn upload_planilha(file: &File) -> Result<Vec<ProductSeed>, ApiError> {
    let form = FormData::new().map_err(|e| ApiError {
        status: None,
        message: format!("Falha ao montar o formulário: {:?}", e),
    })?;
    form.append_with_blob("planilha", file).map_err(|e| ApiError {
        status: None,
        message: format!("Falha ao montar o formulário: {:?}", e),
    })?;

    api::post_multipart("/upload-planilha/", form).await
}

/// `POST gerar-planilha/` — submits the edited products, the Amazon .xlsm
/// template and every attached image; answers the task id to poll.
///
/// Image parts are named `imagem_p{i}_principal`, `imagem_p{i}_amostra` and
/// `imagem_p{i}_extra_{j}` with zero-based indices, matching what the
/// backend's filler expects.
pub async fn gerar_planilha(
    products: &ListingForm<File>,
    template: &File,
) -> Result<StartedTask, ApiError> {
    let form = build_submission(products, template).map_err(|message| ApiError {
        status: None,
        message,
    })?;
    api::post_multipart("/gerar-planilha/", form).await
}

fn build_submission(products: &ListingForm<File>, template: &File) -> Result<FormData, String> {
    let products_json = serde_json::to_string(&products.submission_products())
        .map_err(|e| format!("Falha ao serializar os produtos: {}", e))?;

    let form = FormData::new().map_err(|e| format!("Falha ao montar o formulário: {:?}", e))?;
    form.append_with_str("products_data", &products_json)
        .map_err(|e| format!("Falha ao montar o formulário: {:?}", e))?;
    form.append_with_blob("amazon_template", template)
        .map_err(|e| format!("Falha ao montar o formulário: {:?}", e))?;

    for (index, product) in products.products.iter().enumerate() {
        if let Some(file) = &product.imagens.principal {
            form.append_with_blob(&format!("imagem_p{}_principal", index), file)
                .map_err(|e| format!("Falha ao anexar imagem: {:?}", e))?;
        }
        if let Some(file) = &product.imagens.amostra {
            form.append_with_blob(&format!("imagem_p{}_amostra", index), file)
                .map_err(|e| format!("Falha ao anexar imagem: {:?}", e))?;
        }
        for (extra_index, slot) in product.imagens.extra.iter().enumerate() {
            if let Some(file) = &slot.file {
                form.append_with_blob(&format!("imagem_p{}_extra_{}", index, extra_index), file)
                    .map_err(|e| format!("Falha ao anexar imagem: {:?}", e))?;
            }
        }
    }

    Ok(form)
}

use contracts::tasks::StartedTask;
use web_sys::{File, FormData};

use crate::shared::api::{self, ApiError};

/// `POST organizador-ia/` — sends the product info CSV and answers the task
/// id of the AI generation run.
pub async fn start_organizer(csv: &File) -> Result<StartedTask, ApiError> {
    let form = FormData::new().map_err(|e| ApiError {
        status: None,
        message: format!("Falha ao montar o formulário: {:?}", e),
    })?;
    form.append_with_blob("product_info_csv", csv)
        .map_err(|e| ApiError {
            status: None,
            message: format!("Falha ao montar o formulário: {:?}", e),
        })?;

    api::post_multipart("/organizador-ia/", form).await
}

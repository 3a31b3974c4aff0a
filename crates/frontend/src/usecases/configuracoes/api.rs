//! API client for the cataloging history and memory endpoints.

use contracts::history::{HistoryData, HistoryEnvelope, HistoryFilters, OperationStatus, RecordId};

use crate::shared::api::{self, ApiError};

/// `GET api/history/` with the current filters and page.
pub async fn fetch_history(
    filters: &HistoryFilters,
    page: u32,
    limit: u32,
) -> Result<HistoryData, ApiError> {
    let path = format!("/api/history/?{}", filters.query_string(page, limit));
    let envelope: HistoryEnvelope = api::get_json(&path).await?;
    unwrap_envelope(envelope)
}

/// `POST api/memory/validate/{id}/` — marks a cataloged product as reviewed.
pub async fn validate_product(id: &RecordId) -> Result<(), ApiError> {
    let status: OperationStatus =
        api::post_empty(&format!("/api/memory/validate/{}/", id)).await?;
    unwrap_status(status, "Erro ao validar produto")
}

/// `DELETE api/memory/delete/{id}/` — removes a product from the memory.
pub async fn delete_product(id: &RecordId) -> Result<(), ApiError> {
    let status: OperationStatus =
        api::delete_json(&format!("/api/memory/delete/{}/", id)).await?;
    unwrap_status(status, "Erro ao excluir produto")
}

fn unwrap_envelope(envelope: HistoryEnvelope) -> Result<HistoryData, ApiError> {
    if !envelope.success {
        return Err(ApiError {
            status: None,
            message: envelope
                .error
                .unwrap_or_else(|| "Erro ao carregar histórico".to_string()),
        });
    }
    envelope.data.ok_or(ApiError {
        status: None,
        message: "Resposta do histórico sem dados.".to_string(),
    })
}

fn unwrap_status(status: OperationStatus, fallback: &str) -> Result<(), ApiError> {
    if status.success {
        Ok(())
    } else {
        Err(ApiError {
            status: None,
            message: status.error.unwrap_or_else(|| fallback.to_string()),
        })
    }
}

//! DTOs for the cataloging history screen (`GET api/history/`) and the
//! memory endpoints (`validate`/`delete`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend record id; opaque to the client, a number for SQLite-backed
/// installs and a string elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Num(i64),
    Str(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Num(n) => write!(f, "{}", n),
            RecordId::Str(s) => write!(f, "{}", s),
        }
    }
}

/// `{ success, data?, error? }` envelope of the history endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<HistoryData>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryData {
    #[serde(default)]
    pub products: Vec<HistoryProduct>,
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default)]
    pub statistics: Statistics,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryProduct {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub origin: Option<ProductOrigin>,
    #[serde(default)]
    pub status: Option<ProductStatus>,
    #[serde(default)]
    pub data_quality_score: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductOrigin {
    Spreadsheet,
    LinkExtraction,
    Manual,
    #[serde(other)]
    Unknown,
}

impl ProductOrigin {
    pub fn label(self) -> &'static str {
        match self {
            ProductOrigin::Spreadsheet => "Planilha",
            ProductOrigin::LinkExtraction => "Extração de Link",
            ProductOrigin::Manual => "Manual",
            ProductOrigin::Unknown => "Desconhecido",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Validated,
    Pending,
    Error,
    #[serde(other)]
    Unknown,
}

impl ProductStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProductStatus::Validated => "Validado",
            _ => "Pendente",
        }
    }
}

/// Pagination block; the backend serializes these keys in camelCase.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub total_products: u64,
    pub by_status: StatusBreakdown,
    pub by_origin: OriginBreakdown,
    pub average_quality_score: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatusBreakdown {
    pub validated: u64,
    pub pending: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OriginBreakdown {
    pub spreadsheet: u64,
    pub manual: u64,
    pub link_extraction: u64,
}

/// Response of the validate/delete memory endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationStatus {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Filter state of the history screen. `status`/`origin` keep the literal
/// select values (`"all"`, `"validated"`, ...) because the backend expects
/// them verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryFilters {
    pub search: String,
    pub status: String,
    pub origin: String,
    pub date_from: String,
    pub date_to: String,
}

impl Default for HistoryFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: "all".to_string(),
            origin: "all".to_string(),
            date_from: String::new(),
            date_to: String::new(),
        }
    }
}

impl HistoryFilters {
    /// Query string for `GET api/history/`. All keys are always sent, like
    /// the screen always did; only the free-text pieces need escaping.
    pub fn query_string(&self, page: u32, limit: u32) -> String {
        format!(
            "page={}&limit={}&search={}&status={}&origin={}&dateFrom={}&dateTo={}",
            page,
            limit,
            urlencoding::encode(&self.search),
            self.status,
            self.origin,
            urlencoding::encode(&self.date_from),
            urlencoding::encode(&self.date_to),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_decodes_camel_case_pagination() {
        let envelope: HistoryEnvelope = serde_json::from_value(json!({
            "success": true,
            "data": {
                "products": [
                    { "id": 7, "name": "Caneca", "origin": "spreadsheet", "status": "validated", "data_quality_score": 88.5 }
                ],
                "pagination": { "currentPage": 2, "totalPages": 5, "totalItems": 93, "itemsPerPage": 20, "hasNext": true, "hasPrevious": true },
                "statistics": { "total_products": 93, "by_status": { "validated": 40, "pending": 53 }, "by_origin": { "spreadsheet": 90, "manual": 2, "link_extraction": 1 }, "average_quality_score": 71.0 }
            }
        }))
        .unwrap();

        let data = envelope.data.unwrap();
        assert_eq!(data.pagination.current_page, 2);
        assert!(data.pagination.has_next);
        assert_eq!(data.products[0].id, RecordId::Num(7));
        assert_eq!(data.products[0].origin, Some(ProductOrigin::Spreadsheet));
        assert_eq!(data.statistics.by_origin.spreadsheet, 90);
    }

    #[test]
    fn test_string_record_id() {
        let product: HistoryProduct =
            serde_json::from_value(json!({ "id": "a1b2", "name": "x" })).unwrap();
        assert_eq!(product.id.to_string(), "a1b2");
    }

    #[test]
    fn test_query_string_escapes_free_text() {
        let filters = HistoryFilters {
            search: "caneca azul".to_string(),
            status: "validated".to_string(),
            ..Default::default()
        };
        assert_eq!(
            filters.query_string(1, 20),
            "page=1&limit=20&search=caneca%20azul&status=validated&origin=all&dateFrom=&dateTo="
        );
    }

    #[test]
    fn test_unknown_origin_maps_to_fallback() {
        let product: HistoryProduct =
            serde_json::from_value(json!({ "id": 1, "origin": "import_v2" })).unwrap();
        assert_eq!(product.origin, Some(ProductOrigin::Unknown));
        assert_eq!(ProductOrigin::Unknown.label(), "Desconhecido");
    }
}

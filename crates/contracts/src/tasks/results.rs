//! Typed result payloads, one schema per job kind.
//!
//! The backend returns an untyped `result` blob on `SUCCESS`; which schema
//! applies is decided by which endpoint started the task, so the caller
//! tags the poll with a [`JobKind`] and gets a [`JobOutcome`] back instead
//! of digging through `serde_json::Value`.

use serde::{Deserialize, Serialize};

use crate::listing::ProductSeed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    /// `POST gerar-planilha/` — fills the Amazon template, answers a file.
    GenerateSpreadsheet,
    /// `POST organizador-ia/` — AI content generation from a CSV.
    OrganizeContent,
    /// `POST scrape-images/` — image extraction from a listing URL.
    ScrapeImages,
}

/// Result of a finished spreadsheet generation: the filled .xlsm template,
/// base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSpreadsheet {
    pub file_content: String,
    pub filename: String,
}

/// Result of a finished AI organization run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizedContent {
    #[serde(default)]
    pub products_data: Vec<ProductSeed>,
}

/// Result of a finished image scrape. An absent list means the page simply
/// had no images; that is not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapedImages {
    #[serde(default)]
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum JobOutcome {
    Spreadsheet(GeneratedSpreadsheet),
    Organized(OrganizedContent),
    Images(ScrapedImages),
}

/// Decodes a `SUCCESS` payload against the schema of the job that produced
/// it. A shape mismatch is an error here, not a silent `undefined` later.
pub fn decode_outcome(
    kind: JobKind,
    result: Option<serde_json::Value>,
) -> Result<JobOutcome, String> {
    let value = result.unwrap_or(serde_json::Value::Null);
    match kind {
        JobKind::GenerateSpreadsheet => serde_json::from_value(value)
            .map(JobOutcome::Spreadsheet)
            .map_err(|e| format!("resultado da geração de planilha inválido: {}", e)),
        JobKind::OrganizeContent => {
            if value.is_null() {
                return Ok(JobOutcome::Organized(OrganizedContent::default()));
            }
            serde_json::from_value(value)
                .map(JobOutcome::Organized)
                .map_err(|e| format!("resultado do organizador inválido: {}", e))
        }
        JobKind::ScrapeImages => {
            if value.is_null() {
                return Ok(JobOutcome::Images(ScrapedImages::default()));
            }
            serde_json::from_value(value)
                .map(JobOutcome::Images)
                .map_err(|e| format!("resultado da extração de imagens inválido: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spreadsheet_outcome() {
        let outcome = decode_outcome(
            JobKind::GenerateSpreadsheet,
            Some(json!({ "file_content": "UEsDBA==", "filename": "out.xlsm" })),
        )
        .unwrap();
        match outcome {
            JobOutcome::Spreadsheet(sheet) => {
                assert_eq!(sheet.filename, "out.xlsm");
                assert_eq!(sheet.file_content, "UEsDBA==");
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn test_spreadsheet_outcome_missing_file_is_error() {
        assert!(decode_outcome(JobKind::GenerateSpreadsheet, Some(json!({}))).is_err());
        assert!(decode_outcome(JobKind::GenerateSpreadsheet, None).is_err());
    }

    #[test]
    fn test_scrape_outcome_defaults_to_empty_list() {
        for result in [None, Some(json!({}))] {
            match decode_outcome(JobKind::ScrapeImages, result).unwrap() {
                JobOutcome::Images(images) => assert!(images.image_urls.is_empty()),
                other => panic!("wrong variant: {:?}", other),
            }
        }
    }

    #[test]
    fn test_organized_outcome() {
        let outcome = decode_outcome(
            JobKind::OrganizeContent,
            Some(json!({ "products_data": [ { "titulo": "Caneca", "sku": "CAN-1" } ] })),
        )
        .unwrap();
        match outcome {
            JobOutcome::Organized(content) => {
                assert_eq!(content.products_data.len(), 1);
                assert_eq!(content.products_data[0].fields.titulo, "Caneca");
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }
}

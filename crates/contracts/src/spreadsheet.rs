//! Decoding of the generated spreadsheet payload.
//!
//! The backend ships the filled .xlsm back as a base64 string, sometimes
//! wrapped in a data-URL prefix and occasionally with broken padding. The
//! decode is strict about failing: a corrupt payload must never reach the
//! browser download step.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

/// MIME type for macro-enabled Excel workbooks (.xlsm).
pub const MACRO_ENABLED_MIME: &str = "application/vnd.ms-excel.sheet.macroEnabled.12";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpreadsheetDecodeError {
    #[error("o conteúdo da planilha veio vazio")]
    Empty,
    #[error("conteúdo base64 da planilha inválido: {0}")]
    InvalidBase64(String),
}

/// Decodes the base64 `file_content` of a finished generation task.
///
/// Tolerates a `data:...;base64,` prefix, stray whitespace and missing
/// padding; anything that still does not decode is an error, never a
/// truncated file.
pub fn decode_spreadsheet(content: &str) -> Result<Vec<u8>, SpreadsheetDecodeError> {
    // The base64 alphabet has no comma, so everything up to the last one is
    // a data-URL prefix.
    let raw = match content.rsplit_once(',') {
        Some((_, tail)) => tail,
        None => content,
    };

    // Keep only alphabet characters; padding is reconstructed below so a
    // misplaced '=' cannot poison the decode.
    let mut cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/'))
        .collect();

    if cleaned.is_empty() {
        return Err(SpreadsheetDecodeError::Empty);
    }

    match cleaned.len() % 4 {
        0 => {}
        1 => {
            return Err(SpreadsheetDecodeError::InvalidBase64(
                "comprimento não corresponde a uma codificação base64".to_string(),
            ))
        }
        rem => cleaned.extend(std::iter::repeat('=').take(4 - rem)),
    }

    STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|e| SpreadsheetDecodeError::InvalidBase64(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = b"PK\x03\x04fake xlsm bytes";

    #[test]
    fn test_round_trip() {
        let encoded = STANDARD.encode(SAMPLE);
        assert_eq!(decode_spreadsheet(&encoded).unwrap(), SAMPLE);
    }

    #[test]
    fn test_data_url_prefix_is_stripped() {
        let encoded = format!(
            "data:{};base64,{}",
            MACRO_ENABLED_MIME,
            STANDARD.encode(SAMPLE)
        );
        assert_eq!(decode_spreadsheet(&encoded).unwrap(), SAMPLE);
    }

    #[test]
    fn test_whitespace_and_missing_padding_are_tolerated() {
        let encoded = STANDARD.encode(SAMPLE);
        let mangled: String = encoded
            .trim_end_matches('=')
            .chars()
            .enumerate()
            .flat_map(|(i, c)| {
                if i % 5 == 0 {
                    vec!['\n', c]
                } else {
                    vec![c]
                }
            })
            .collect();
        assert_eq!(decode_spreadsheet(&mangled).unwrap(), SAMPLE);
    }

    #[test]
    fn test_empty_input_fails() {
        assert_eq!(decode_spreadsheet(""), Err(SpreadsheetDecodeError::Empty));
        assert_eq!(
            decode_spreadsheet("data:application/octet-stream;base64,"),
            Err(SpreadsheetDecodeError::Empty)
        );
        assert_eq!(
            decode_spreadsheet("===="),
            Err(SpreadsheetDecodeError::Empty)
        );
    }

    #[test]
    fn test_uncorrectable_length_fails() {
        assert!(matches!(
            decode_spreadsheet("QQQQQ"),
            Err(SpreadsheetDecodeError::InvalidBase64(_))
        ));
    }
}

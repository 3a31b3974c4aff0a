//! Thin HTTP client over `gloo-net`.
//!
//! Every helper resolves the path against [`api_url`] and returns
//! [`ApiError`]: transport failures carry no status, non-2xx responses carry
//! the HTTP status plus whatever error text the backend put in the body.

use std::fmt;

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::FormData;

use super::api_utils::api_url;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (HTTP {})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

impl ApiError {
    fn transport(e: impl fmt::Display) -> Self {
        Self {
            status: None,
            message: format!("Falha na comunicação com o servidor: {}", e),
        }
    }

    fn decode(e: impl fmt::Display) -> Self {
        Self {
            status: None,
            message: format!("Resposta inesperada do servidor: {}", e),
        }
    }
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = Request::get(&api_url(path))
        .send()
        .await
        .map_err(ApiError::transport)?;
    read_json(response).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let response = Request::post(&api_url(path))
        .json(body)
        .map_err(ApiError::transport)?
        .send()
        .await
        .map_err(ApiError::transport)?;
    read_json(response).await
}

/// POST a browser-built multipart body. The `FormData` passes through
/// untouched; the browser sets the boundary header itself.
pub async fn post_multipart<T: DeserializeOwned>(
    path: &str,
    form: FormData,
) -> Result<T, ApiError> {
    let response = Request::post(&api_url(path))
        .body(form)
        .map_err(ApiError::transport)?
        .send()
        .await
        .map_err(ApiError::transport)?;
    read_json(response).await
}

pub async fn post_empty<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = Request::post(&api_url(path))
        .header("Content-Type", "application/json")
        .send()
        .await
        .map_err(ApiError::transport)?;
    read_json(response).await
}

pub async fn delete_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = Request::delete(&api_url(path))
        .send()
        .await
        .map_err(ApiError::transport)?;
    read_json(response).await
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(error_from_response(response).await);
    }
    response.json::<T>().await.map_err(ApiError::decode)
}

/// Non-2xx: surface the backend's own error text when the body carries one.
async fn error_from_response(response: Response) -> ApiError {
    let status = response.status();
    let message = match response.json::<serde_json::Value>().await {
        Ok(body) => ["error", "detail", "message"]
            .iter()
            .find_map(|key| body.get(key).and_then(|v| v.as_str()))
            .filter(|text| !text.is_empty())
            .map(str::to_string),
        Err(_) => None,
    };
    ApiError {
        status: Some(status),
        message: message.unwrap_or_else(|| "O servidor respondeu com um erro.".to_string()),
    }
}

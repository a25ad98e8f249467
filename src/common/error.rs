// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não autenticado")]
    Unauthorized,

    #[error("Sem acesso ao módulo {0}")]
    Forbidden(String),

    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    // O backend respondeu, mas com status de erro. `message` é o que ele mandou (se mandou).
    #[error("Backend respondeu {status}: {message:?}")]
    Backend {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Falha de comunicação com o backend: {0}")]
    BackendUnavailable(#[from] reqwest::Error),

    #[error("Payload inesperado: {0}")]
    InvalidPayload(String),

    #[error("QR Code não reconhecido: {0}")]
    UnrecognizedQrCode(String),

    #[error("Erro ao gerar CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Erro ao gerar documento: {0}")]
    Document(String),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

/// Corpo de erro devolvido ao navegador: `{"error": "...", "details": {...}}`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidToken | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Backend { status, .. } => *status,
            AppError::BackendUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::InvalidPayload(_) => StatusCode::BAD_GATEWAY,
            AppError::UnrecognizedQrCode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Csv(_) | AppError::Document(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converte para o corpo HTTP, traduzindo a mensagem para o idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();
        let status = self.status();

        let (error, details) = match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                (store.get(lang, "validation"), Some(json!(details)))
            }
            AppError::InvalidToken => (store.get(lang, "invalid_token"), None),
            AppError::Unauthorized => (store.get(lang, "unauthorized"), None),
            AppError::Forbidden(module) => (
                store.format(lang, "forbidden_module", &[("module", module)]),
                None,
            ),
            AppError::ResourceNotFound(resource) => (
                store.format(lang, "not_found", &[("resource", resource)]),
                None,
            ),
            // Mensagem do backend passa direto; sem ela, mensagem genérica.
            AppError::Backend { message, .. } => (
                message.clone().unwrap_or_else(|| store.get(lang, "generic")),
                None,
            ),
            AppError::BackendUnavailable(_) => (store.get(lang, "backend_unavailable"), None),
            AppError::InvalidPayload(_) => (store.get(lang, "invalid_payload"), None),
            AppError::UnrecognizedQrCode(raw) => (
                store.get(lang, "unrecognized_qr"),
                Some(json!({ "raw": raw })),
            ),
            AppError::Csv(_) | AppError::Document(_) | AppError::InternalServerError(_) => {
                (store.get(lang, "generic"), None)
            }
        };

        if status.is_server_error() {
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        ApiError { status, error, details }
    }
}

// Fallback para quando não temos o Locale em mãos (ex.: dentro de middleware).
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), &I18nStore::new())
            .into_response()
    }
}

/// Extrai a mensagem de erro de um corpo JSON do backend.
///
/// Ordem de procura: `detail`, `message`, `error`, `non_field_errors[0]`
/// e, por último, o primeiro erro do primeiro campo (`{"campo": ["msg"]}`).
pub fn extract_backend_message(body: &Value) -> Option<String> {
    let obj = body.as_object()?;

    for key in ["detail", "message", "error"] {
        if let Some(Value::String(msg)) = obj.get(key) {
            if !msg.trim().is_empty() {
                return Some(msg.clone());
            }
        }
    }

    if let Some(msg) = obj
        .get("non_field_errors")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|v| v.as_str())
    {
        return Some(msg.to_string());
    }

    obj.iter().find_map(|(field, value)| match value {
        Value::Array(items) => items
            .first()
            .and_then(|v| v.as_str())
            .map(|msg| format!("{}: {}", field, msg)),
        _ => None,
    })
}

// src/handlers/proxy.rs

use axum::{
    body::{Body, Bytes},
    extract::{Path, State},
    http::{header, HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::Session, i18n::Locale},
};

// ANY /api/proxy/{*path}
// Repassa método, query e corpo para o backend com o bearer da sessão.
pub async fn forward(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    Path(path): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    if escapes_api_prefix(&path) {
        return Err(AppError::ResourceNotFound(path).to_api_error(&locale, &app_state.i18n_store));
    }

    let forwarded = app_state.backend
        .forward(
            method,
            &path,
            uri.query(),
            &session,
            headers.get(header::CONTENT_TYPE),
            body,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let mut response = (forwarded.status, Body::from(forwarded.body)).into_response();
    if let Some(content_type) = forwarded.content_type {
        response.headers_mut().insert(header::CONTENT_TYPE, content_type);
    }
    Ok(response)
}

/// URL absoluta, barra invertida e `.`/`..` (também `%2e` ainda codificado) saem do prefixo da API.
/// O cliente do backend confere de novo a URL final.
fn escapes_api_prefix(path: &str) -> bool {
    if path.contains("://") || path.contains('\\') {
        return true;
    }
    path.split('/').any(|segment| {
        let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
        decoded == "." || decoded == ".."
    })
}

// src/handlers/cadastros.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::Session,
        i18n::Locale,
        modules::{ModCadastros, RequireModule},
    },
    models::cadastros::{Client, CreateClientPayload, UpdateClientPayload},
};

// POST /api/cadastros/clientes
#[utoipa::path(
    post,
    path = "/api/cadastros/clientes",
    tag = "Cadastros",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Client),
        (status = 400, description = "Dados inválidos")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModCadastros>,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let client = app_state.backend
        .resource::<Client>(&session)
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(client)))
}

// PATCH /api/cadastros/clientes/{id}
#[utoipa::path(
    patch,
    path = "/api/cadastros/clientes/{id}",
    tag = "Cadastros",
    params(("id" = i64, Path, description = "ID do cliente")),
    request_body = UpdateClientPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Client),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModCadastros>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateClientPayload>,
) -> Result<Json<Client>, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let client = app_state.backend
        .resource::<Client>(&session)
        .update(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(client))
}

// PUT /api/cadastros/clientes/{id}
#[utoipa::path(
    put,
    path = "/api/cadastros/clientes/{id}",
    tag = "Cadastros",
    params(("id" = i64, Path, description = "ID do cliente")),
    request_body = CreateClientPayload,
    responses(
        (status = 200, description = "Cliente substituído", body = Client),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn replace_client(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModCadastros>,
    Path(id): Path<i64>,
    Json(payload): Json<CreateClientPayload>,
) -> Result<Json<Client>, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let client = app_state.backend
        .resource::<Client>(&session)
        .replace(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(client))
}

// DELETE /api/cadastros/clientes/{id}
#[utoipa::path(
    delete,
    path = "/api/cadastros/clientes/{id}",
    tag = "Cadastros",
    params(("id" = i64, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente excluído"),
        (status = 404, description = "Cliente não encontrado"),
        (status = 409, description = "Cliente referenciado por outros registros")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModCadastros>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    app_state.backend
        .resource::<Client>(&session)
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tracing::info!(client_id = id, "Cliente excluído");
    Ok(StatusCode::NO_CONTENT)
}

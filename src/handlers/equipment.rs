// src/handlers/equipment.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::Session,
        i18n::Locale,
        modules::{ModEquipamentos, RequireModule},
    },
    models::equipment::{CreateEquipmentPayload, Equipment},
};

// POST /api/equipamentos
#[utoipa::path(
    post,
    path = "/api/equipamentos",
    tag = "Equipamentos",
    request_body = CreateEquipmentPayload,
    responses(
        (status = 201, description = "Equipamento criado", body = Equipment),
        (status = 400, description = "Dados inválidos")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_equipment(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModEquipamentos>,
    Json(payload): Json<CreateEquipmentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let equipment = app_state.backend
        .resource::<Equipment>(&session)
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tracing::info!(equipment_id = equipment.id, "Equipamento criado");
    Ok((StatusCode::CREATED, Json(equipment)))
}

// GET /api/equipamentos/{id}/qrcode.png
#[utoipa::path(
    get,
    path = "/api/equipamentos/{id}/qrcode.png",
    tag = "Equipamentos",
    params(("id" = i64, Path, description = "ID do equipamento")),
    responses(
        (status = 200, description = "Etiqueta QR", content_type = "image/png"),
        (status = 404, description = "Equipamento não encontrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn qr_label(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModEquipamentos>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let equipment = app_state.backend
        .resource::<Equipment>(&session)
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let png = app_state.document_service
        .qr_label_png(&equipment)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let headers = [
        (header::CONTENT_TYPE, "image/png".to_string()),
        (header::CONTENT_DISPOSITION, format!("inline; filename=\"equipamento_{}.png\"", id)),
    ];

    Ok((headers, png).into_response())
}

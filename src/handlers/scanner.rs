// src/handlers/scanner.rs

use axum::{extract::State, Json};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::Session, i18n::Locale},
    models::equipment::{Equipment, ScanResolution, ScanResolveRequest},
    scanner::{dashboard_path, ScanPayload},
};

async fn resolve_payload(
    app_state: &AppState,
    session: &Session,
    payload: ScanPayload,
) -> Result<Equipment, AppError> {
    let equipments = app_state.backend.resource::<Equipment>(session);

    match payload {
        ScanPayload::EquipmentUuid(uuid) => equipments.get_by_uuid(uuid).await,
        ScanPayload::LegacyId(id) => match id.parse::<i64>() {
            Ok(numeric) => equipments.get(numeric).await,
            // Etiquetas antigas às vezes levam o código em vez do ID
            Err(_) => equipments
                .list(&[("codigo".to_string(), id.clone())])
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| AppError::ResourceNotFound(format!("Equipamento {}", id))),
        },
        ScanPayload::Raw(raw) => Err(AppError::UnrecognizedQrCode(raw)),
    }
}

// POST /api/scanner/resolve
#[utoipa::path(
    post,
    path = "/api/scanner/resolve",
    tag = "Leitor QR",
    request_body = ScanResolveRequest,
    responses(
        (status = 200, description = "Equipamento da etiqueta", body = ScanResolution),
        (status = 404, description = "Equipamento não encontrado"),
        (status = 422, description = "Conteúdo não reconhecido; `details.raw` traz o texto lido")
    ),
    security(("session_cookie" = []))
)]
pub async fn resolve(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    Json(request): Json<ScanResolveRequest>,
) -> Result<Json<ScanResolution>, ApiError> {
    let payload = ScanPayload::parse(&request.payload);
    tracing::debug!(payload = ?payload, "Resolvendo QR");

    let equipment = resolve_payload(&app_state, &session, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(ScanResolution {
        dashboard_path: dashboard_path(&equipment),
        equipment,
    }))
}

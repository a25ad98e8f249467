// src/handlers/checklists.rs

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        auth::Session,
        i18n::Locale,
        modules::{ModNr12, RequireModule},
    },
    models::checklist::{Checklist, ConformityStats},
    services::checklist_service,
};

// GET /api/nr12/checklists/{id}/conformidade
#[utoipa::path(
    get,
    path = "/api/nr12/checklists/{id}/conformidade",
    tag = "NR12",
    params(("id" = i64, Path, description = "ID do checklist")),
    responses(
        (status = 200, description = "Conformidade do checklist", body = ConformityStats),
        (status = 404, description = "Checklist não encontrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn conformity(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModNr12>,
    Path(id): Path<i64>,
) -> Result<Json<ConformityStats>, ApiError> {
    let checklist = app_state.backend
        .resource::<Checklist>(&session)
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(checklist_service::stats_for_checklist(&checklist)))
}

// GET /api/nr12/checklists/conformidade
// Filtros da query (equipamento, status, datas...) vão direto para o backend.
#[utoipa::path(
    get,
    path = "/api/nr12/checklists/conformidade",
    tag = "NR12",
    responses((status = 200, description = "Conformidade geral dos checklists filtrados", body = ConformityStats)),
    security(("session_cookie" = []))
)]
pub async fn aggregate_conformity(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModNr12>,
    Query(filters): Query<Vec<(String, String)>>,
) -> Result<Json<ConformityStats>, ApiError> {
    let checklists = app_state.backend
        .resource::<Checklist>(&session)
        .list_all(&filters)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(checklist_service::aggregate(&checklists)))
}

// GET /api/nr12/checklists/{id}/pdf
#[utoipa::path(
    get,
    path = "/api/nr12/checklists/{id}/pdf",
    tag = "NR12",
    params(("id" = i64, Path, description = "ID do checklist")),
    responses((status = 200, description = "Impressão do checklist", content_type = "application/pdf")),
    security(("session_cookie" = []))
)]
pub async fn checklist_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModNr12>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let checklist = app_state.backend
        .resource::<Checklist>(&session)
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let pdf_bytes = app_state.document_service
        .checklist_pdf(&checklist)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (header::CONTENT_DISPOSITION, format!("inline; filename=\"checklist_{}.pdf\"", id)),
    ];

    Ok((headers, pdf_bytes).into_response())
}

// POST /api/nr12/checklists/{id}/finalizar
#[utoipa::path(
    post,
    path = "/api/nr12/checklists/{id}/finalizar",
    tag = "NR12",
    params(("id" = i64, Path, description = "ID do checklist")),
    responses((status = 200, description = "Checklist finalizado", body = Checklist)),
    security(("session_cookie" = []))
)]
pub async fn finish(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModNr12>,
    Path(id): Path<i64>,
) -> Result<Json<Checklist>, ApiError> {
    let checklist = app_state.backend
        .resource::<Checklist>(&session)
        .finish(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tracing::info!(checklist_id = id, "Checklist finalizado");
    Ok(Json(checklist))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CancelChecklistPayload {
    #[serde(default)]
    #[schema(example = "Equipamento em manutenção")]
    pub motivo: Option<String>,
}

// POST /api/nr12/checklists/{id}/cancelar
#[utoipa::path(
    post,
    path = "/api/nr12/checklists/{id}/cancelar",
    tag = "NR12",
    params(("id" = i64, Path, description = "ID do checklist")),
    request_body = CancelChecklistPayload,
    responses((status = 200, description = "Checklist cancelado", body = Checklist)),
    security(("session_cookie" = []))
)]
pub async fn cancel(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModNr12>,
    Path(id): Path<i64>,
    payload: Option<Json<CancelChecklistPayload>>,
) -> Result<Json<Checklist>, ApiError> {
    let motivo = payload.and_then(|Json(p)| p.motivo);

    let checklist = app_state.backend
        .resource::<Checklist>(&session)
        .cancel(id, motivo.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(checklist))
}

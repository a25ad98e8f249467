// src/handlers/diamond_wire.rs

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    handlers::download_csv,
    middleware::{
        auth::Session,
        i18n::Locale,
        modules::{ModFioDiamantado, RequireModule},
    },
    models::diamond_wire::{CutRecord, WireYield},
    services::{diamond_wire_service, export_service},
};

// GET /api/fio-diamantado/rendimento
#[utoipa::path(
    get,
    path = "/api/fio-diamantado/rendimento",
    tag = "Fio Diamantado",
    responses((status = 200, description = "Rendimento por fio (m² por mm de desgaste)", body = Vec<WireYield>)),
    security(("session_cookie" = []))
)]
pub async fn yields(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModFioDiamantado>,
    Query(filters): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<WireYield>>, ApiError> {
    let cuts = app_state.backend
        .resource::<CutRecord>(&session)
        .list_all(&filters)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(diamond_wire_service::yields(&cuts)))
}

// GET /api/fio-diamantado/cortes.csv
#[utoipa::path(
    get,
    path = "/api/fio-diamantado/cortes.csv",
    tag = "Fio Diamantado",
    responses((status = 200, description = "CSV dos cortes", content_type = "text/csv")),
    security(("session_cookie" = []))
)]
pub async fn cuts_csv(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModFioDiamantado>,
    Query(filters): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let cuts = app_state.backend
        .resource::<CutRecord>(&session)
        .list_all(&filters)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let csv = export_service::cut_records_csv(&cuts)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(download_csv("cortes.csv", csv).into_response())
}

// src/handlers/inventory.rs

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::download_csv,
    middleware::{
        auth::Session,
        i18n::Locale,
        modules::{ModAlmoxarifado, RequireModule},
    },
    models::inventory::{Product, StockPosition},
    services::{export_service, inventory_service},
};

async fn load_position(
    app_state: &AppState,
    session: &Session,
    filters: &[(String, String)],
) -> Result<StockPosition, AppError> {
    let products = app_state.backend
        .resource::<Product>(session)
        .list_all(filters)
        .await?;
    Ok(inventory_service::stock_position(&products))
}

// GET /api/almoxarifado/posicao
#[utoipa::path(
    get,
    path = "/api/almoxarifado/posicao",
    tag = "Almoxarifado",
    responses((status = 200, description = "Posição de estoque valorizada", body = StockPosition)),
    security(("session_cookie" = []))
)]
pub async fn stock_position(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModAlmoxarifado>,
    Query(filters): Query<Vec<(String, String)>>,
) -> Result<Json<StockPosition>, ApiError> {
    let position = load_position(&app_state, &session, &filters)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(position))
}

// GET /api/almoxarifado/posicao.csv
#[utoipa::path(
    get,
    path = "/api/almoxarifado/posicao.csv",
    tag = "Almoxarifado",
    responses((status = 200, description = "CSV da posição de estoque", content_type = "text/csv")),
    security(("session_cookie" = []))
)]
pub async fn stock_position_csv(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModAlmoxarifado>,
    Query(filters): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let csv = load_position(&app_state, &session, &filters)
        .await
        .and_then(|position| export_service::stock_position_csv(&position))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(download_csv("posicao_estoque.csv", csv).into_response())
}

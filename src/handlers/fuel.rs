// src/handlers/fuel.rs

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        auth::Session,
        i18n::Locale,
        modules::{ModAbastecimento, RequireModule},
    },
    models::fuel::{FuelConsumption, FuelLog},
    services::fuel_service,
};

// GET /api/abastecimento/consumo
#[utoipa::path(
    get,
    path = "/api/abastecimento/consumo",
    tag = "Abastecimento",
    responses((status = 200, description = "Consumo médio por equipamento", body = Vec<FuelConsumption>)),
    security(("session_cookie" = []))
)]
pub async fn consumption(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModAbastecimento>,
    Query(filters): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<FuelConsumption>>, ApiError> {
    let logs = app_state.backend
        .resource::<FuelLog>(&session)
        .list_all(&filters)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(fuel_service::consumption(&logs)))
}

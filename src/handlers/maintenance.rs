// src/handlers/maintenance.rs

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Local;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        auth::Session,
        i18n::Locale,
        modules::{ModManutencao, RequireModule},
    },
    models::maintenance::{MaintenanceModel, MaintenanceSchedule, ScheduleDue},
    services::maintenance_service,
};

// GET /api/manutencao/vencimentos
// A query (ex.: `equipamento=10`) filtra as programações no backend.
#[utoipa::path(
    get,
    path = "/api/manutencao/vencimentos",
    tag = "Manutenção",
    responses((status = 200, description = "Programações com situação de vencimento", body = Vec<ScheduleDue>)),
    security(("session_cookie" = []))
)]
pub async fn due_list(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModManutencao>,
    Query(filters): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<ScheduleDue>>, ApiError> {
    let schedules_api = app_state.backend.resource::<MaintenanceSchedule>(&session);
    let models_api = app_state.backend.resource::<MaintenanceModel>(&session);

    let (schedules, models) = tokio::try_join!(schedules_api.list_all(&filters), models_api.list_all(&[]))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let today = Local::now().date_naive();
    Ok(Json(maintenance_service::due_list(&schedules, &models, today)))
}

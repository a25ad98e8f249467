// src/handlers/navigation.rs

use axum::Json;

use crate::{
    middleware::auth::Session,
    models::navigation::MenuEntry,
    services::navigation_service,
};

// GET /api/navigation
#[utoipa::path(
    get,
    path = "/api/navigation",
    tag = "Navegação",
    responses(
        (status = 200, description = "Menu filtrado pelos módulos da sessão", body = Vec<MenuEntry>),
        (status = 401, description = "Sessão inválida")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_menu(session: Session) -> Json<Vec<MenuEntry>> {
    Json(navigation_service::visible_menu(&session.claims))
}

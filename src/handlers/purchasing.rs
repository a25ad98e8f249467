// src/handlers/purchasing.rs

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        auth::Session,
        i18n::Locale,
        modules::{ModCompras, RequireModule},
    },
    models::purchasing::PurchaseOrder,
};

// POST /api/compras/pedidos/{id}/aprovar
#[utoipa::path(
    post,
    path = "/api/compras/pedidos/{id}/aprovar",
    tag = "Compras",
    params(("id" = i64, Path, description = "ID do pedido")),
    responses((status = 200, description = "Pedido aprovado", body = PurchaseOrder)),
    security(("session_cookie" = []))
)]
pub async fn approve(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModCompras>,
    Path(id): Path<i64>,
) -> Result<Json<PurchaseOrder>, ApiError> {
    let order = app_state.backend
        .resource::<PurchaseOrder>(&session)
        .approve(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tracing::info!(order_id = id, total = %order.total(), "Pedido de compra aprovado");
    Ok(Json(order))
}

// POST /api/compras/pedidos/{id}/receber
#[utoipa::path(
    post,
    path = "/api/compras/pedidos/{id}/receber",
    tag = "Compras",
    params(("id" = i64, Path, description = "ID do pedido")),
    responses((status = 200, description = "Pedido recebido", body = PurchaseOrder)),
    security(("session_cookie" = []))
)]
pub async fn receive(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModCompras>,
    Path(id): Path<i64>,
) -> Result<Json<PurchaseOrder>, ApiError> {
    let order = app_state.backend
        .resource::<PurchaseOrder>(&session)
        .receive(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tracing::info!(order_id = id, "Pedido de compra recebido");
    Ok(Json(order))
}

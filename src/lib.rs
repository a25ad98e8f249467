// src/lib.rs

use axum::{
    middleware as axum_middleware,
    routing::{any, get, patch, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod backend;
pub mod common;
pub mod config;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod scanner;
pub mod services;

use crate::config::AppState;
use crate::middleware::auth::session_guard;

/// Monta todas as rotas do gateway.
pub fn build_router(app_state: AppState) -> Router {
    // Rotas públicas (sem sessão)
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        // Logout limpa os cookies mesmo com sessão expirada, então fica fora do guard
        .route("/logout", post(handlers::auth::logout));

    // Rotas protegidas pelo middleware de sessão
    let session_routes = Router::new()
        .route("/auth/me", get(handlers::auth::get_me))
        .route("/navigation", get(handlers::navigation::get_menu))
        .route("/proxy/{*path}", any(handlers::proxy::forward))
        .route("/scanner/resolve", post(handlers::scanner::resolve));

    let cadastros_routes = Router::new()
        .route("/clientes", post(handlers::cadastros::create_client))
        .route(
            "/clientes/{id}",
            patch(handlers::cadastros::update_client)
                .put(handlers::cadastros::replace_client)
                .delete(handlers::cadastros::delete_client),
        );

    let equipment_routes = Router::new()
        .route("/", post(handlers::equipment::create_equipment))
        .route("/{id}/qrcode.png", get(handlers::equipment::qr_label));

    let finance_routes = Router::new()
        .route("/contas-pagar/{id}", get(handlers::finance::get_payable))
        .route("/contas-pagar/{id}/pagar", post(handlers::finance::pay_payable))
        .route("/contas-pagar/{id}/cancelar", post(handlers::finance::cancel_payable))
        .route("/contas-receber/{id}", get(handlers::finance::get_receivable))
        .route("/contas-receber/{id}/receber", post(handlers::finance::receive_receivable))
        .route("/contas-receber/{id}/cancelar", post(handlers::finance::cancel_receivable))
        .route("/fluxo-caixa", get(handlers::finance::cash_flow))
        .route("/inadimplencia", get(handlers::finance::delinquency))
        .route("/inadimplencia.csv", get(handlers::finance::delinquency_csv));

    let nr12_routes = Router::new()
        .route("/checklists/conformidade", get(handlers::checklists::aggregate_conformity))
        .route("/checklists/{id}/conformidade", get(handlers::checklists::conformity))
        .route("/checklists/{id}/pdf", get(handlers::checklists::checklist_pdf))
        .route("/checklists/{id}/finalizar", post(handlers::checklists::finish))
        .route("/checklists/{id}/cancelar", post(handlers::checklists::cancel));

    let maintenance_routes = Router::new()
        .route("/vencimentos", get(handlers::maintenance::due_list));

    let inventory_routes = Router::new()
        .route("/posicao", get(handlers::inventory::stock_position))
        .route("/posicao.csv", get(handlers::inventory::stock_position_csv));

    let purchasing_routes = Router::new()
        .route("/pedidos/{id}/aprovar", post(handlers::purchasing::approve))
        .route("/pedidos/{id}/receber", post(handlers::purchasing::receive));

    let diamond_wire_routes = Router::new()
        .route("/rendimento", get(handlers::diamond_wire::yields))
        .route("/cortes.csv", get(handlers::diamond_wire::cuts_csv));

    let fuel_routes = Router::new()
        .route("/consumo", get(handlers::fuel::consumption));

    // Cada área ainda checa o módulo no handler (RequireModule)
    let protected = session_routes
        .nest("/cadastros", cadastros_routes)
        .nest("/equipamentos", equipment_routes)
        .nest("/financeiro", finance_routes)
        .nest("/nr12", nr12_routes)
        .nest("/manutencao", maintenance_routes)
        .nest("/almoxarifado", inventory_routes)
        .nest("/compras", purchasing_routes)
        .nest("/fio-diamantado", diamond_wire_routes)
        .nest("/abastecimento", fuel_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            session_guard,
        ));

    let api = Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/auth", auth_routes)
        .merge(protected);

    Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state)
}

// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::get_me,

        // --- Navegação ---
        handlers::navigation::get_menu,

        // --- Cadastros ---
        handlers::cadastros::create_client,
        handlers::cadastros::update_client,
        handlers::cadastros::replace_client,
        handlers::cadastros::delete_client,

        // --- Equipamentos ---
        handlers::equipment::create_equipment,
        handlers::equipment::qr_label,

        // --- Leitor QR ---
        handlers::scanner::resolve,

        // --- Financeiro ---
        handlers::finance::get_payable,
        handlers::finance::pay_payable,
        handlers::finance::cancel_payable,
        handlers::finance::get_receivable,
        handlers::finance::receive_receivable,
        handlers::finance::cancel_receivable,
        handlers::finance::cash_flow,
        handlers::finance::delinquency,
        handlers::finance::delinquency_csv,

        // --- NR12 ---
        handlers::checklists::conformity,
        handlers::checklists::aggregate_conformity,
        handlers::checklists::checklist_pdf,
        handlers::checklists::finish,
        handlers::checklists::cancel,

        // --- Manutenção ---
        handlers::maintenance::due_list,

        // --- Almoxarifado ---
        handlers::inventory::stock_position,
        handlers::inventory::stock_position_csv,

        // --- Compras ---
        handlers::purchasing::approve,
        handlers::purchasing::receive,

        // --- Fio diamantado ---
        handlers::diamond_wire::yields,
        handlers::diamond_wire::cuts_csv,

        // --- Abastecimento ---
        handlers::fuel::consumption,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::LoginUserPayload,
            models::auth::Me,
            models::auth::LogoutResponse,
            models::navigation::MenuEntry,

            // --- Cadastros ---
            models::cadastros::Client,
            models::cadastros::Development,
            models::cadastros::Operator,
            models::cadastros::Technician,
            models::cadastros::CreateClientPayload,
            models::cadastros::UpdateClientPayload,

            // --- Equipamentos ---
            models::equipment::Equipment,
            models::equipment::EquipmentType,
            models::equipment::CreateEquipmentPayload,
            models::equipment::ScanResolveRequest,
            models::equipment::ScanResolution,

            // --- Manutenção ---
            models::maintenance::MaintenanceModel,
            models::maintenance::MaintenanceSchedule,
            models::maintenance::DueStatus,
            models::maintenance::ScheduleDue,

            // --- NR12 ---
            models::checklist::ChecklistStatus,
            models::checklist::ChecklistAnswer,
            models::checklist::ChecklistItem,
            models::checklist::Checklist,
            models::checklist::ConformityStats,
            handlers::checklists::CancelChecklistPayload,

            // --- Financeiro ---
            models::finance::FinancialStatus,
            models::finance::Payable,
            models::finance::Receivable,
            models::finance::PaymentPayload,
            models::finance::Granularity,
            models::finance::CashFlowBucket,
            models::finance::CashFlowReport,
            models::finance::DelinquencyRow,

            // --- Almoxarifado ---
            models::inventory::Product,
            models::inventory::StockMovementKind,
            models::inventory::StockMovement,
            models::inventory::StockPositionRow,
            models::inventory::StockPosition,

            // --- Compras ---
            models::purchasing::PurchaseOrderStatus,
            models::purchasing::PurchaseOrderItem,
            models::purchasing::PurchaseOrder,

            // --- Abastecimento ---
            models::fuel::FuelLog,
            models::fuel::FuelConsumption,

            // --- Fio diamantado ---
            models::diamond_wire::DiamondWire,
            models::diamond_wire::CutRecord,
            models::diamond_wire::WireYield,
        )
    ),
    tags(
        (name = "Auth", description = "Login, logout e usuário logado"),
        (name = "Navegação", description = "Menu lateral filtrado por módulo"),
        (name = "Cadastros", description = "Clientes, obras, operadores e técnicos"),
        (name = "Equipamentos", description = "Equipamentos e etiquetas QR"),
        (name = "Leitor QR", description = "Resolução do conteúdo lido nas etiquetas"),
        (name = "Financeiro", description = "Contas a pagar/receber, fluxo de caixa e inadimplência"),
        (name = "NR12", description = "Checklists de segurança"),
        (name = "Manutenção", description = "Vencimentos de manutenção preventiva"),
        (name = "Almoxarifado", description = "Posição de estoque"),
        (name = "Compras", description = "Pedidos de compra"),
        (name = "Fio Diamantado", description = "Cortes e rendimento de fios"),
        (name = "Abastecimento", description = "Consumo de combustível")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("access"))),
        );
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

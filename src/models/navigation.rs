// src/models/navigation.rs

use serde::Serialize;
use utoipa::ToSchema;

/// Entrada do menu lateral.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    #[schema(value_type = String, example = "Contas a Pagar")]
    pub label: &'static str,
    #[schema(value_type = String, example = "/dashboard/financeiro/contas-pagar")]
    pub href: &'static str,
    #[schema(value_type = String, example = "Financeiro")]
    pub section: &'static str,
    /// Módulo exigido; `None` = sempre visível.
    #[schema(value_type = Option<String>, example = "financeiro")]
    pub module: Option<&'static str>,
}

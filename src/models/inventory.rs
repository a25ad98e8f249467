// src/models/inventory.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::cadastros::default_true;

// --- Produtos do almoxarifado ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i64,
    #[serde(default)]
    #[schema(example = "FLT-0032")]
    pub codigo: Option<String>,
    #[schema(example = "Filtro de óleo hidráulico")]
    pub descricao: String,
    #[serde(default)]
    #[schema(example = "UN")]
    pub unidade: Option<String>,
    #[serde(default)]
    pub quantidade: Decimal,
    #[serde(default)]
    pub custo_medio: Decimal,
    #[serde(default)]
    pub estoque_minimo: Option<Decimal>,
    #[serde(default)]
    pub localizacao: Option<String>,
    #[serde(default = "default_true")]
    pub ativo: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockMovementKind {
    Entrada,
    Saida,
    Ajuste,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StockMovement {
    pub id: i64,
    pub produto: i64,
    #[serde(default)]
    pub produto_nome: Option<String>,
    pub tipo: StockMovementKind,
    pub quantidade: Decimal,
    #[serde(default)]
    pub custo_unitario: Option<Decimal>,
    #[schema(value_type = String, format = Date)]
    pub data: NaiveDate,
    #[serde(default)]
    pub documento: Option<String>,
    #[serde(default)]
    pub equipamento: Option<i64>,
    #[serde(default)]
    pub observacao: Option<String>,
}

// --- Posição de estoque (relatório) ---
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockPositionRow {
    pub produto_id: i64,
    pub codigo: Option<String>,
    pub descricao: String,
    pub unidade: Option<String>,
    pub quantidade: Decimal,
    pub custo_medio: Decimal,
    pub valor_total: Decimal,
    pub abaixo_minimo: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockPosition {
    pub rows: Vec<StockPositionRow>,
    pub total_value: Decimal,
    pub below_minimum: usize,
}

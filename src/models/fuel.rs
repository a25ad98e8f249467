// src/models/fuel.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Registro de abastecimento.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FuelLog {
    pub id: i64,
    pub equipamento: i64,
    #[serde(default)]
    pub equipamento_nome: Option<String>,
    #[schema(value_type = String, format = Date)]
    pub data: NaiveDate,
    pub litros: Decimal,
    #[serde(default)]
    pub valor_total: Option<Decimal>,
    #[serde(default)]
    pub horimetro: Option<Decimal>,
    #[serde(default)]
    pub odometro: Option<Decimal>,
    #[serde(default)]
    pub posto: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FuelConsumption {
    pub equipamento: i64,
    pub equipamento_nome: Option<String>,
    pub total_litros: Decimal,
    pub total_valor: Decimal,
    pub horas_trabalhadas: Decimal,
    /// Litros por hora; `None` sem ao menos duas leituras de horímetro.
    pub litros_por_hora: Option<Decimal>,
}

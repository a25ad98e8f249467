// src/models/diamond_wire.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::cadastros::default_true;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiamondWire {
    pub id: i64,
    #[schema(example = "FD-0045")]
    pub codigo: String,
    #[serde(default)]
    pub fabricante: Option<String>,
    #[schema(example = "11.5")]
    pub diametro_inicial_mm: Decimal,
    #[serde(default)]
    pub diametro_atual_mm: Option<Decimal>,
    #[serde(default)]
    pub comprimento_m: Option<Decimal>,
    #[serde(default = "default_true")]
    pub ativo: bool,
}

/// Registro de corte de bloco com fio diamantado.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CutRecord {
    pub id: i64,
    pub fio: i64,
    #[serde(default)]
    pub fio_codigo: Option<String>,
    #[serde(default)]
    pub equipamento: Option<i64>,
    #[serde(default)]
    pub equipamento_nome: Option<String>,
    #[schema(value_type = String, format = Date)]
    pub data: NaiveDate,
    #[serde(default)]
    #[schema(example = "BL-2291")]
    pub bloco: Option<String>,
    pub comprimento_m: Decimal,
    pub altura_m: Decimal,
    pub diametro_inicial_mm: Decimal,
    pub diametro_final_mm: Decimal,
    #[serde(default)]
    pub operador_nome: Option<String>,
    #[serde(default)]
    pub observacao: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WireYield {
    pub fio: i64,
    pub fio_codigo: Option<String>,
    pub cortes: usize,
    pub area_total_m2: Decimal,
    pub desgaste_total_mm: Decimal,
    /// m² cortados por mm de desgaste.
    pub rendimento_m2_por_mm: Decimal,
}

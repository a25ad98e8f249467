// src/models/maintenance.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::cadastros::default_true;

/// Plano de manutenção preventiva (ex.: "Revisão 250h").
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceModel {
    pub id: i64,
    #[schema(example = "Revisão 250 horas")]
    pub nome: String,
    #[serde(default)]
    pub tipo_equipamento: Option<i64>,
    #[serde(default)]
    #[schema(example = "250")]
    pub intervalo_horas: Option<Decimal>,
    #[serde(default)]
    #[schema(example = 180)]
    pub intervalo_dias: Option<i64>,
    #[serde(default)]
    pub itens: Vec<String>,
}

/// Programação de um plano para um equipamento específico.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceSchedule {
    pub id: i64,
    pub equipamento: i64,
    #[serde(default)]
    pub equipamento_nome: Option<String>,
    pub modelo: i64,
    #[serde(default)]
    pub modelo_nome: Option<String>,

    #[serde(default)]
    pub intervalo_horas: Option<Decimal>,
    #[serde(default)]
    pub intervalo_dias: Option<i64>,

    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub ultima_execucao_data: Option<NaiveDate>,
    #[serde(default)]
    pub ultima_execucao_horimetro: Option<Decimal>,
    #[serde(default)]
    pub horimetro_atual: Option<Decimal>,

    #[serde(default = "default_true")]
    pub ativo: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DueStatus {
    EmDia,
    Proxima,
    Vencida,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDue {
    pub schedule_id: i64,
    pub equipamento: i64,
    pub equipamento_nome: Option<String>,
    pub modelo_nome: Option<String>,
    pub status: DueStatus,
    /// Horímetro em que a próxima manutenção vence.
    pub next_due_horimetro: Option<Decimal>,
    pub hours_remaining: Option<Decimal>,
    #[schema(value_type = Option<String>, format = Date)]
    pub next_due_date: Option<NaiveDate>,
    pub days_remaining: Option<i64>,
}

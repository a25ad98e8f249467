// src/models/checklist.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChecklistStatus {
    EmAndamento,
    Concluido,
    Cancelado,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChecklistAnswer {
    Conforme,
    NaoConforme,
    NaoAplicavel,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChecklistItem {
    pub id: i64,
    #[schema(example = "Botão de parada de emergência funcionando?")]
    pub pergunta: String,
    #[serde(default)]
    #[schema(example = "Dispositivos de parada")]
    pub categoria: Option<String>,
    #[serde(default)]
    pub resposta: Option<ChecklistAnswer>,
    #[serde(default)]
    pub observacao: Option<String>,
    #[serde(default)]
    pub foto: Option<String>,
}

/// Inspeção NR12 de um equipamento.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Checklist {
    pub id: i64,
    pub equipamento: i64,
    #[serde(default)]
    pub equipamento_nome: Option<String>,
    #[serde(default)]
    #[schema(example = "NR12 - Escavadeiras")]
    pub modelo_nome: Option<String>,
    #[serde(default)]
    pub operador_nome: Option<String>,
    #[serde(default)]
    pub horimetro: Option<Decimal>,

    #[serde(default)]
    pub data_inicio: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data_conclusao: Option<DateTime<Utc>>,

    pub status: ChecklistStatus,

    #[serde(default)]
    pub itens: Vec<ChecklistItem>,

    // Totais que o backend já manda na listagem (sem os itens)
    #[serde(default)]
    pub total_respostas: Option<u32>,
    #[serde(default)]
    pub total_nao_conformidades: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConformityStats {
    pub total_respostas: u32,
    pub total_nao_conformidades: u32,
    /// Percentual 0-100 com duas casas.
    #[schema(example = "87.50")]
    pub conformity_rate: Decimal,
}

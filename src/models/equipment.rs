// src/models/equipment.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::cadastros::default_true;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Equipment {
    #[schema(example = 123)]
    pub id: i64,

    // Registros antigos não têm UUID; as etiquetas deles usam o formato `eq:<id>`.
    #[serde(default)]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub uuid: Option<Uuid>,

    #[serde(default)]
    #[schema(example = "ESC-014")]
    pub codigo: Option<String>,
    #[schema(example = "Escavadeira hidráulica 20t")]
    pub descricao: String,
    #[serde(default)]
    pub marca: Option<String>,
    #[serde(default)]
    pub modelo: Option<String>,
    #[serde(default)]
    pub numero_serie: Option<String>,
    #[serde(default)]
    pub placa: Option<String>,
    #[serde(default)]
    pub ano: Option<i32>,

    #[serde(default)]
    pub tipo: Option<i64>,
    #[serde(default)]
    pub tipo_nome: Option<String>,
    #[serde(default)]
    pub cliente: Option<i64>,
    #[serde(default)]
    pub cliente_nome: Option<String>,
    #[serde(default)]
    pub obra: Option<i64>,
    #[serde(default)]
    pub obra_nome: Option<String>,

    // Horímetro / Odômetro
    #[serde(default)]
    #[schema(example = "4520.5")]
    pub horimetro_atual: Option<Decimal>,
    #[serde(default)]
    pub odometro_atual: Option<Decimal>,

    #[serde(default = "default_true")]
    pub ativo: bool,
}

impl Equipment {
    /// Nome curto para telas e etiquetas: "ESC-014 - Escavadeira..." ou só a descrição.
    pub fn display_name(&self) -> String {
        match &self.codigo {
            Some(codigo) if !codigo.is_empty() => format!("{} - {}", codigo, self.descricao),
            _ => self.descricao.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EquipmentType {
    pub id: i64,
    #[schema(example = "Escavadeira")]
    pub nome: String,
    #[serde(default)]
    pub descricao: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEquipmentPayload {
    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub descricao: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,

    #[validate(required(message = "O tipo do equipamento é obrigatório."))]
    pub tipo: Option<i64>,

    #[validate(required(message = "O cliente é obrigatório."))]
    pub cliente: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obra: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marca: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modelo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_serie: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1950, max = 2100, message = "Ano inválido."))]
    pub ano: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horimetro_atual: Option<Decimal>,
}

// --- Leitura de etiqueta ---

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ScanResolveRequest {
    /// Texto lido pela câmera ou digitado.
    #[schema(example = "eq:123")]
    pub payload: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanResolution {
    pub equipment: Equipment,
    #[schema(example = "/dashboard/equipamento/3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub dashboard_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_equipment_without_uuid_parses() {
        let eq: Equipment = serde_json::from_value(json!({
            "id": 9, "descricao": "Rolo compactador", "horimetro_atual": "812.0"
        }))
        .unwrap();
        assert!(eq.uuid.is_none());
        assert!(eq.ativo);
        assert_eq!(eq.display_name(), "Rolo compactador");
    }

    #[test]
    fn create_payload_requires_type_and_client() {
        let payload = CreateEquipmentPayload {
            descricao: "Pá carregadeira".into(),
            codigo: None,
            tipo: None,
            cliente: None,
            obra: None,
            marca: None,
            modelo: None,
            numero_serie: None,
            ano: Some(1800),
            horimetro_atual: None,
        };
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("tipo"));
        assert!(fields.contains_key("cliente"));
        assert!(fields.contains_key("ano"));
    }
}

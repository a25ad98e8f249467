// src/models/cadastros.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Client {
    #[schema(example = 12)]
    pub id: i64,
    #[schema(example = "Construtora Horizonte S/A")]
    pub nome: String,
    #[serde(default)]
    pub nome_fantasia: Option<String>,
    #[serde(default)]
    #[schema(example = "12.345.678/0001-99")]
    pub cnpj_cpf: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub cidade: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default = "default_true")]
    pub ativo: bool,
}

/// Obra / empreendimento do cliente, onde o equipamento fica alocado.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Development {
    pub id: i64,
    #[schema(example = "Duplicação BR-101 Lote 3")]
    pub nome: String,
    pub cliente: i64,
    #[serde(default)]
    pub cliente_nome: Option<String>,
    #[serde(default)]
    pub endereco: Option<String>,
    #[serde(default)]
    pub cidade: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default = "default_true")]
    pub ativa: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Operator {
    pub id: i64,
    #[schema(example = "João da Silva")]
    pub nome: String,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub cnh: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub validade_cnh: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub ativo: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Technician {
    pub id: i64,
    #[schema(example = "Maria Souza")]
    pub nome: String,
    #[serde(default)]
    #[schema(example = "Hidráulica")]
    pub especialidade: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default = "default_true")]
    pub ativo: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateClientPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome_fantasia: Option<String>,
    #[validate(length(min = 11, max = 18, message = "CPF/CNPJ inválido."))]
    pub cnpj_cpf: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
}

/// PATCH parcial do cliente: só os campos enviados vão ao backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateClientPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome_fantasia: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 11, max = 18, message = "CPF/CNPJ inválido."))]
    pub cnpj_cpf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ativo: Option<bool>,
}

pub(crate) fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_payload_flags_missing_fields() {
        let payload = CreateClientPayload {
            nome: String::new(),
            nome_fantasia: None,
            cnpj_cpf: "123".into(),
            email: Some("nao-e-email".into()),
            telefone: None,
        };
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("nome"));
        assert!(fields.contains_key("cnpj_cpf"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn partial_update_sends_only_present_fields() {
        let payload = UpdateClientPayload {
            ativo: Some(false),
            ..Default::default()
        };
        assert!(payload.validate().is_ok());
        assert_eq!(serde_json::to_value(&payload).unwrap(), serde_json::json!({ "ativo": false }));

        let blank = UpdateClientPayload {
            nome: Some(String::new()),
            ..Default::default()
        };
        assert!(blank.validate().unwrap_err().field_errors().contains_key("nome"));
    }
}

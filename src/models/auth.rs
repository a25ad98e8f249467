// src/models/auth.rs

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

// Dados para login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(length(min = 1, message = "O usuário é obrigatório."))]
    #[schema(example = "joao.silva")]
    pub username: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

/// Par de tokens devolvido pelo backend (`auth/login/` e `auth/refresh/`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    // O refresh só volta quando o backend rotaciona o token
    #[serde(default)]
    pub refresh: Option<String>,
}

// Usuário logado, como o backend devolve em `auth/me/`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Me {
    pub id: i64,
    #[schema(example = "joao.silva")]
    pub username: String,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default, alias = "modules")]
    #[schema(example = json!(["financeiro", "nr12"]))]
    pub modulos: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub success: bool,
}

// src/config.rs

use std::{env, sync::Arc};

use anyhow::Context;

use crate::{backend::BackendClient, common::i18n::I18nStore, services::DocumentService};

/// Configuração lida do ambiente (`.env` em desenvolvimento).
#[derive(Debug, Clone)]
pub struct Settings {
    /// URL base do backend REST, sempre terminando em `/`.
    pub api_base_url: String,
    pub bind_addr: String,
    /// Origem pública do frontend, usada nas etiquetas QR.
    pub public_base_url: String,
    pub cookie_secure: bool,
    pub fonts_dir: String,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("API_BASE_URL").context("API_BASE_URL deve ser definida")?;

        Ok(Self {
            api_base_url: normalize_base_url(&api_base_url),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string())
                .trim_end_matches('/')
                .to_string(),
            cookie_secure: env::var("COOKIE_SECURE")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            fonts_dir: env::var("FONTS_DIR").unwrap_or_else(|_| "./fonts".to_string()),
        })
    }

    /// Valores para testes e desenvolvimento local, apontando para `api_base_url`.
    pub fn for_backend(api_base_url: &str) -> Self {
        Self {
            api_base_url: normalize_base_url(api_base_url),
            bind_addr: "127.0.0.1:0".to_string(),
            public_base_url: "http://localhost:3000".to_string(),
            cookie_secure: false,
            fonts_dir: "./fonts".to_string(),
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim().trim_end_matches('/'))
}

fn parse_flag(value: &str) -> bool {
    !matches!(value.trim().to_lowercase().as_str(), "false" | "0" | "no" | "off")
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub backend: BackendClient,
    pub i18n_store: Arc<I18nStore>,
    pub document_service: DocumentService,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        let settings = Settings::from_env()?;
        let state = Self::from_settings(settings)?;

        tracing::info!("✅ Backend configurado em {}", state.settings.api_base_url);
        Ok(state)
    }

    pub fn from_settings(settings: Settings) -> anyhow::Result<Self> {
        let backend = BackendClient::new(&settings.api_base_url)?;
        let document_service = DocumentService::new(&settings.fonts_dir, &settings.public_base_url);

        Ok(Self {
            settings: Arc::new(settings),
            backend,
            i18n_store: Arc::new(I18nStore::new()),
            document_service,
        })
    }
}

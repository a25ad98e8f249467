// src/middleware/modules.rs

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use std::marker::PhantomData;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::Session, i18n::Locale},
};

/// 1. O Trait que define um módulo do sistema
pub trait ModuleDef: Send + Sync + 'static {
    fn slug() -> &'static str;
}

/// 2. O Extractor (Guardião)
pub struct RequireModule<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireModule<T>
where
    T: ModuleDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let locale = Locale::from_request_parts(parts, state).await.unwrap_or_default();

        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

        let required = T::slug();
        if !session.claims.has_module(required) {
            tracing::debug!(user_id = ?session.claims.user_id, module = required, "Acesso negado ao módulo");
            return Err(AppError::Forbidden(required.to_string())
                .to_api_error(&locale, &app_state.i18n_store));
        }

        Ok(RequireModule(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS MÓDULOS (TIPOS)
// ---

pub const CADASTROS: &str = "cadastros";
pub const EQUIPAMENTOS: &str = "equipamentos";
pub const MANUTENCAO: &str = "manutencao";
pub const NR12: &str = "nr12";
pub const ALMOXARIFADO: &str = "almoxarifado";
pub const FINANCEIRO: &str = "financeiro";
pub const COMPRAS: &str = "compras";
pub const FIO_DIAMANTADO: &str = "fio_diamantado";
pub const ABASTECIMENTO: &str = "abastecimento";

pub struct ModCadastros;
impl ModuleDef for ModCadastros {
    fn slug() -> &'static str { CADASTROS }
}

pub struct ModEquipamentos;
impl ModuleDef for ModEquipamentos {
    fn slug() -> &'static str { EQUIPAMENTOS }
}

pub struct ModManutencao;
impl ModuleDef for ModManutencao {
    fn slug() -> &'static str { MANUTENCAO }
}

pub struct ModNr12;
impl ModuleDef for ModNr12 {
    fn slug() -> &'static str { NR12 }
}

pub struct ModAlmoxarifado;
impl ModuleDef for ModAlmoxarifado {
    fn slug() -> &'static str { ALMOXARIFADO }
}

pub struct ModFinanceiro;
impl ModuleDef for ModFinanceiro {
    fn slug() -> &'static str { FINANCEIRO }
}

pub struct ModCompras;
impl ModuleDef for ModCompras {
    fn slug() -> &'static str { COMPRAS }
}

pub struct ModFioDiamantado;
impl ModuleDef for ModFioDiamantado {
    fn slug() -> &'static str { FIO_DIAMANTADO }
}

pub struct ModAbastecimento;
impl ModuleDef for ModAbastecimento {
    fn slug() -> &'static str { ABASTECIMENTO }
}

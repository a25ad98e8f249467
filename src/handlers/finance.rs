// src/handlers/finance.rs

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::download_csv,
    middleware::{
        auth::Session,
        i18n::Locale,
        modules::{ModFinanceiro, RequireModule},
    },
    models::finance::{
        CashFlowReport, DelinquencyRow, Granularity, LedgerDetail, Payable, PaymentPayload, Receivable,
    },
    services::{export_service, finance_service},
};

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// =============================================================================
//  CONTAS A PAGAR
// =============================================================================

// GET /api/financeiro/contas-pagar/{id}
#[utoipa::path(
    get,
    path = "/api/financeiro/contas-pagar/{id}",
    tag = "Financeiro",
    params(("id" = i64, Path, description = "ID do título")),
    responses(
        (status = 200, description = "Título com saldo e status efetivo"),
        (status = 404, description = "Título não encontrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_payable(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModFinanceiro>,
    Path(id): Path<i64>,
) -> Result<Json<LedgerDetail<Payable>>, ApiError> {
    let record = app_state.backend
        .resource::<Payable>(&session)
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(finance_service::ledger_detail(record, today())))
}

// POST /api/financeiro/contas-pagar/{id}/pagar
#[utoipa::path(
    post,
    path = "/api/financeiro/contas-pagar/{id}/pagar",
    tag = "Financeiro",
    params(("id" = i64, Path, description = "ID do título")),
    request_body = PaymentPayload,
    responses(
        (status = 200, description = "Pagamento registrado"),
        (status = 400, description = "Dados inválidos")
    ),
    security(("session_cookie" = []))
)]
pub async fn pay_payable(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModFinanceiro>,
    Path(id): Path<i64>,
    Json(payload): Json<PaymentPayload>,
) -> Result<Json<LedgerDetail<Payable>>, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let record = app_state.backend
        .resource::<Payable>(&session)
        .pay(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tracing::info!(payable_id = id, valor = %payload.valor, "Pagamento registrado");
    Ok(Json(finance_service::ledger_detail(record, today())))
}

// POST /api/financeiro/contas-pagar/{id}/cancelar
#[utoipa::path(
    post,
    path = "/api/financeiro/contas-pagar/{id}/cancelar",
    tag = "Financeiro",
    params(("id" = i64, Path, description = "ID do título")),
    responses((status = 200, description = "Título cancelado")),
    security(("session_cookie" = []))
)]
pub async fn cancel_payable(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModFinanceiro>,
    Path(id): Path<i64>,
) -> Result<Json<LedgerDetail<Payable>>, ApiError> {
    let record = app_state.backend
        .resource::<Payable>(&session)
        .cancel(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(finance_service::ledger_detail(record, today())))
}

// =============================================================================
//  CONTAS A RECEBER
// =============================================================================

// GET /api/financeiro/contas-receber/{id}
#[utoipa::path(
    get,
    path = "/api/financeiro/contas-receber/{id}",
    tag = "Financeiro",
    params(("id" = i64, Path, description = "ID do título")),
    responses(
        (status = 200, description = "Título com saldo e status efetivo"),
        (status = 404, description = "Título não encontrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_receivable(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModFinanceiro>,
    Path(id): Path<i64>,
) -> Result<Json<LedgerDetail<Receivable>>, ApiError> {
    let record = app_state.backend
        .resource::<Receivable>(&session)
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(finance_service::ledger_detail(record, today())))
}

// POST /api/financeiro/contas-receber/{id}/receber
#[utoipa::path(
    post,
    path = "/api/financeiro/contas-receber/{id}/receber",
    tag = "Financeiro",
    params(("id" = i64, Path, description = "ID do título")),
    request_body = PaymentPayload,
    responses(
        (status = 200, description = "Recebimento registrado"),
        (status = 400, description = "Dados inválidos")
    ),
    security(("session_cookie" = []))
)]
pub async fn receive_receivable(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModFinanceiro>,
    Path(id): Path<i64>,
    Json(payload): Json<PaymentPayload>,
) -> Result<Json<LedgerDetail<Receivable>>, ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let record = app_state.backend
        .resource::<Receivable>(&session)
        .receive(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tracing::info!(receivable_id = id, valor = %payload.valor, "Recebimento registrado");
    Ok(Json(finance_service::ledger_detail(record, today())))
}

// POST /api/financeiro/contas-receber/{id}/cancelar
#[utoipa::path(
    post,
    path = "/api/financeiro/contas-receber/{id}/cancelar",
    tag = "Financeiro",
    params(("id" = i64, Path, description = "ID do título")),
    responses((status = 200, description = "Título cancelado")),
    security(("session_cookie" = []))
)]
pub async fn cancel_receivable(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModFinanceiro>,
    Path(id): Path<i64>,
) -> Result<Json<LedgerDetail<Receivable>>, ApiError> {
    let record = app_state.backend
        .resource::<Receivable>(&session)
        .cancel(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(finance_service::ledger_detail(record, today())))
}

// =============================================================================
//  RELATÓRIOS
// =============================================================================

#[derive(Debug, Deserialize, IntoParams)]
pub struct CashFlowQuery {
    /// Início (padrão: 1º de janeiro do ano corrente)
    #[param(value_type = Option<String>, format = Date)]
    pub from: Option<NaiveDate>,
    /// Fim (padrão: 31 de dezembro do ano corrente)
    #[param(value_type = Option<String>, format = Date)]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub granularity: Granularity,
}

impl CashFlowQuery {
    fn period(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), ValidationErrors> {
        let year = today.year();
        let from = self.from.or_else(|| NaiveDate::from_ymd_opt(year, 1, 1)).unwrap_or(today);
        let to = self.to.or_else(|| NaiveDate::from_ymd_opt(year, 12, 31)).unwrap_or(today);

        if from > to {
            let mut err = ValidationError::new("range");
            err.message = Some("A data inicial deve ser anterior à final.".into());
            let mut errors = ValidationErrors::new();
            errors.add("from", err);
            return Err(errors);
        }
        Ok((from, to))
    }
}

// GET /api/financeiro/fluxo-caixa
#[utoipa::path(
    get,
    path = "/api/financeiro/fluxo-caixa",
    tag = "Financeiro",
    params(CashFlowQuery),
    responses(
        (status = 200, description = "Fluxo de caixa por período", body = CashFlowReport),
        (status = 400, description = "Período inválido")
    ),
    security(("session_cookie" = []))
)]
pub async fn cash_flow(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModFinanceiro>,
    Query(query): Query<CashFlowQuery>,
) -> Result<Json<CashFlowReport>, ApiError> {
    let (from, to) = query.period(today())
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let payables_api = app_state.backend.resource::<Payable>(&session);
    let receivables_api = app_state.backend.resource::<Receivable>(&session);
    let (payables, receivables) = tokio::try_join!(payables_api.list_all(&[]), receivables_api.list_all(&[]))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(finance_service::cash_flow(&payables, &receivables, from, to, query.granularity)))
}

async fn load_delinquency(app_state: &AppState, session: &Session) -> Result<Vec<DelinquencyRow>, AppError> {
    let receivables = app_state.backend
        .resource::<Receivable>(session)
        .list_all(&[])
        .await?;
    Ok(finance_service::delinquency(&receivables, today()))
}

// GET /api/financeiro/inadimplencia
#[utoipa::path(
    get,
    path = "/api/financeiro/inadimplencia",
    tag = "Financeiro",
    responses((status = 200, description = "Inadimplência por cliente", body = Vec<DelinquencyRow>)),
    security(("session_cookie" = []))
)]
pub async fn delinquency(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModFinanceiro>,
) -> Result<Json<Vec<DelinquencyRow>>, ApiError> {
    let rows = load_delinquency(&app_state, &session)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(rows))
}

// GET /api/financeiro/inadimplencia.csv
#[utoipa::path(
    get,
    path = "/api/financeiro/inadimplencia.csv",
    tag = "Financeiro",
    responses((status = 200, description = "CSV de inadimplência", content_type = "text/csv")),
    security(("session_cookie" = []))
)]
pub async fn delinquency_csv(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    _guard: RequireModule<ModFinanceiro>,
) -> Result<Response, ApiError> {
    let csv = load_delinquency(&app_state, &session)
        .await
        .and_then(|rows| export_service::delinquency_csv(&rows))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(download_csv("inadimplencia.csv", csv).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn cash_flow_period_defaults_to_current_year() {
        let query = CashFlowQuery { from: None, to: None, granularity: Granularity::Monthly };
        assert_eq!(
            query.period(date(2024, 6, 15)).unwrap(),
            (date(2024, 1, 1), date(2024, 12, 31))
        );
    }

    #[test]
    fn inverted_period_is_a_validation_error() {
        let query = CashFlowQuery {
            from: Some(date(2024, 3, 1)),
            to: Some(date(2024, 2, 1)),
            granularity: Granularity::Daily,
        };
        let errors = query.period(date(2024, 6, 15)).unwrap_err();
        assert!(errors.field_errors().contains_key("from"));
    }
}

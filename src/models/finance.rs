// src/models/finance.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

// --- Enums (espelham os choices do backend) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinancialStatus {
    Aberta,    // Em aberto
    Paga,      // Quitada
    Vencida,   // Vencida (o backend marca em rotina noturna)
    Cancelada, // Cancelada
}

impl FinancialStatus {
    pub fn is_open(self) -> bool {
        matches!(self, FinancialStatus::Aberta | FinancialStatus::Vencida)
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Payable {
    #[schema(example = 42)]
    pub id: i64,

    #[schema(example = "Peças para escavadeira")]
    pub descricao: String,

    #[serde(default)]
    pub fornecedor: Option<i64>,
    #[serde(default)]
    #[schema(example = "Tratores Sul Ltda")]
    pub fornecedor_nome: Option<String>,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub numero_documento: Option<String>,

    // Valores
    #[serde(default)]
    #[schema(example = "1500.00")]
    pub valor_original: Decimal,
    #[serde(default)]
    #[schema(example = "1530.00")]
    pub valor_final: Decimal, // Original + juros/multa - desconto
    #[serde(default)]
    #[schema(example = "500.00")]
    pub valor_pago: Decimal,

    // Datas
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date, example = "2024-03-01")]
    pub data_emissao: Option<NaiveDate>,
    #[schema(value_type = String, format = Date, example = "2024-03-31")]
    pub data_vencimento: NaiveDate,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub data_pagamento: Option<NaiveDate>,

    pub status: FinancialStatus,

    #[serde(default)]
    pub forma_pagamento: Option<String>,
    #[serde(default)]
    pub observacoes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Receivable {
    #[schema(example = 17)]
    pub id: i64,

    #[schema(example = "Locação retroescavadeira - março")]
    pub descricao: String,

    #[serde(default)]
    pub cliente: Option<i64>,
    #[serde(default)]
    #[schema(example = "Construtora Horizonte")]
    pub cliente_nome: Option<String>,
    #[serde(default)]
    pub obra: Option<i64>,
    #[serde(default)]
    pub numero_documento: Option<String>,

    #[serde(default)]
    pub valor_original: Decimal,
    #[serde(default)]
    pub valor_final: Decimal,
    // Algumas versões do backend chamam de valor_recebido
    #[serde(default, alias = "valor_recebido")]
    pub valor_pago: Decimal,

    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub data_emissao: Option<NaiveDate>,
    #[schema(value_type = String, format = Date, example = "2024-04-10")]
    pub data_vencimento: NaiveDate,
    #[serde(default, alias = "data_recebimento")]
    #[schema(value_type = Option<String>, format = Date)]
    pub data_pagamento: Option<NaiveDate>,

    pub status: FinancialStatus,

    #[serde(default)]
    pub forma_pagamento: Option<String>,
    #[serde(default)]
    pub observacoes: Option<String>,
}

/// O que pagáveis e recebíveis têm em comum para os agregados financeiros.
pub trait LedgerEntry {
    fn entry_id(&self) -> i64;
    fn valor_final(&self) -> Decimal;
    fn valor_pago(&self) -> Decimal;
    fn data_vencimento(&self) -> NaiveDate;
    fn data_pagamento(&self) -> Option<NaiveDate>;
    fn status(&self) -> FinancialStatus;
    /// Fornecedor (a pagar) ou cliente (a receber).
    fn counterparty(&self) -> (Option<i64>, Option<&str>);
}

impl LedgerEntry for Payable {
    fn entry_id(&self) -> i64 { self.id }
    fn valor_final(&self) -> Decimal { self.valor_final }
    fn valor_pago(&self) -> Decimal { self.valor_pago }
    fn data_vencimento(&self) -> NaiveDate { self.data_vencimento }
    fn data_pagamento(&self) -> Option<NaiveDate> { self.data_pagamento }
    fn status(&self) -> FinancialStatus { self.status }
    fn counterparty(&self) -> (Option<i64>, Option<&str>) {
        (self.fornecedor, self.fornecedor_nome.as_deref())
    }
}

impl LedgerEntry for Receivable {
    fn entry_id(&self) -> i64 { self.id }
    fn valor_final(&self) -> Decimal { self.valor_final }
    fn valor_pago(&self) -> Decimal { self.valor_pago }
    fn data_vencimento(&self) -> NaiveDate { self.data_vencimento }
    fn data_pagamento(&self) -> Option<NaiveDate> { self.data_pagamento }
    fn status(&self) -> FinancialStatus { self.status }
    fn counterparty(&self) -> (Option<i64>, Option<&str>) {
        (self.cliente, self.cliente_nome.as_deref())
    }
}

fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

/// Corpo das ações `pagar/` e `receber/`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PaymentPayload {
    #[validate(custom(function = "validate_positive"))]
    #[schema(example = "500.00")]
    pub valor: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-03-15")]
    pub data_pagamento: NaiveDate,

    #[validate(length(min = 1, message = "Informe a forma de pagamento."))]
    #[schema(example = "PIX")]
    pub forma_pagamento: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

/// Detalhe de título com o saldo já calculado.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerDetail<T> {
    pub record: T,
    pub saldo: Decimal,
    pub effective_status: FinancialStatus,
    pub days_overdue: i64,
}

// --- Fluxo de caixa ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[serde(alias = "dia")]
    Daily,
    #[default]
    #[serde(alias = "mes")]
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowBucket {
    /// Início do período (o próprio dia, ou o dia 1 do mês).
    #[schema(value_type = String, format = Date)]
    pub period: NaiveDate,
    pub entradas: Decimal,
    pub saidas: Decimal,
    pub saldo: Decimal,
    pub saldo_acumulado: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowReport {
    #[schema(value_type = String, format = Date)]
    pub from: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub to: NaiveDate,
    pub granularity: Granularity,
    pub buckets: Vec<CashFlowBucket>,
    pub total_entradas: Decimal,
    pub total_saidas: Decimal,
    pub saldo: Decimal,
}

// --- Inadimplência ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DelinquencyRow {
    pub cliente: Option<i64>,
    #[schema(example = "Construtora Horizonte")]
    pub cliente_nome: String,
    pub titulos: usize,
    pub total_em_aberto: Decimal,
    pub maior_atraso_dias: i64,
    #[schema(value_type = String, format = Date)]
    pub vencimento_mais_antigo: NaiveDate,
}

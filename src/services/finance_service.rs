// src/services/finance_service.rs

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::{
    common::money::round_cents,
    models::finance::{
        CashFlowBucket, CashFlowReport, DelinquencyRow, FinancialStatus, Granularity, LedgerDetail,
        LedgerEntry, Payable, Receivable,
    },
};

/// Saldo do título: `valor_final - valor_pago`. Pode ser negativo (pagamento a maior)
/// e o sinal é mantido. Satura nos limites do `Decimal`.
pub fn balance(valor_final: Decimal, valor_pago: Decimal) -> Decimal {
    valor_final.saturating_sub(valor_pago)
}

/// Status para exibição: título em aberto com vencimento passado aparece como vencido,
/// mesmo antes da rotina do backend marcar.
pub fn effective_status<E: LedgerEntry>(entry: &E, today: NaiveDate) -> FinancialStatus {
    match entry.status() {
        FinancialStatus::Aberta if entry.data_vencimento() < today => FinancialStatus::Vencida,
        status => status,
    }
}

pub fn days_overdue<E: LedgerEntry>(entry: &E, today: NaiveDate) -> i64 {
    if effective_status(entry, today) == FinancialStatus::Vencida {
        (today - entry.data_vencimento()).num_days().max(0)
    } else {
        0
    }
}

pub fn ledger_detail<E: LedgerEntry>(entry: E, today: NaiveDate) -> LedgerDetail<E> {
    let saldo = balance(entry.valor_final(), entry.valor_pago());
    let effective_status = effective_status(&entry, today);
    let days_overdue = days_overdue(&entry, today);

    LedgerDetail {
        record: entry,
        saldo,
        effective_status,
        days_overdue,
    }
}

fn period_start(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Daily => date,
        Granularity::Monthly => date.with_day(1).unwrap_or(date),
    }
}

/// Lançamentos de caixa de um título: o que já foi pago na data do pagamento
/// e o saldo em aberto na data de vencimento. Cancelados não entram.
fn cash_events<E: LedgerEntry>(entry: &E) -> Vec<(NaiveDate, Decimal)> {
    let mut events = Vec::new();
    let status = entry.status();
    if status == FinancialStatus::Cancelada {
        return events;
    }

    let pago = entry.valor_pago();
    if pago > Decimal::ZERO {
        let paid_on = entry.data_pagamento().unwrap_or_else(|| entry.data_vencimento());
        events.push((paid_on, pago));
    }

    if status.is_open() {
        let saldo = balance(entry.valor_final(), pago);
        if saldo > Decimal::ZERO {
            events.push((entry.data_vencimento(), saldo));
        }
    }

    events
}

/// Fluxo de caixa do período: recebíveis são entradas, pagáveis são saídas.
pub fn cash_flow(
    payables: &[Payable],
    receivables: &[Receivable],
    from: NaiveDate,
    to: NaiveDate,
    granularity: Granularity,
) -> CashFlowReport {
    // (entradas, saídas) por período
    let mut buckets: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();

    for receivable in receivables {
        for (date, amount) in cash_events(receivable) {
            if date >= from && date <= to {
                let bucket = buckets.entry(period_start(date, granularity)).or_default();
                bucket.0 = bucket.0.saturating_add(amount);
            }
        }
    }

    for payable in payables {
        for (date, amount) in cash_events(payable) {
            if date >= from && date <= to {
                let bucket = buckets.entry(period_start(date, granularity)).or_default();
                bucket.1 = bucket.1.saturating_add(amount);
            }
        }
    }

    let mut acumulado = Decimal::ZERO;
    let mut total_entradas = Decimal::ZERO;
    let mut total_saidas = Decimal::ZERO;

    let buckets = buckets
        .into_iter()
        .map(|(period, (entradas, saidas))| {
            let saldo = entradas.saturating_sub(saidas);
            acumulado = acumulado.saturating_add(saldo);
            total_entradas = total_entradas.saturating_add(entradas);
            total_saidas = total_saidas.saturating_add(saidas);
            CashFlowBucket {
                period,
                entradas: round_cents(entradas),
                saidas: round_cents(saidas),
                saldo: round_cents(saldo),
                saldo_acumulado: round_cents(acumulado),
            }
        })
        .collect();

    CashFlowReport {
        from,
        to,
        granularity,
        buckets,
        total_entradas: round_cents(total_entradas),
        total_saidas: round_cents(total_saidas),
        saldo: round_cents(total_entradas.saturating_sub(total_saidas)),
    }
}

/// Inadimplência: recebíveis vencidos com saldo, agrupados por cliente,
/// do maior valor em aberto para o menor.
pub fn delinquency(receivables: &[Receivable], today: NaiveDate) -> Vec<DelinquencyRow> {
    let mut by_client: HashMap<Option<i64>, DelinquencyRow> = HashMap::new();

    for receivable in receivables {
        if effective_status(receivable, today) != FinancialStatus::Vencida {
            continue;
        }
        let saldo = balance(receivable.valor_final, receivable.valor_pago);
        if saldo <= Decimal::ZERO {
            continue;
        }

        let atraso = days_overdue(receivable, today);
        let row = by_client.entry(receivable.cliente).or_insert_with(|| DelinquencyRow {
            cliente: receivable.cliente,
            cliente_nome: receivable
                .cliente_nome
                .clone()
                .unwrap_or_else(|| "Sem cliente".to_string()),
            titulos: 0,
            total_em_aberto: Decimal::ZERO,
            maior_atraso_dias: 0,
            vencimento_mais_antigo: receivable.data_vencimento,
        });

        row.titulos = row.titulos.saturating_add(1);
        row.total_em_aberto = row.total_em_aberto.saturating_add(saldo);
        row.maior_atraso_dias = row.maior_atraso_dias.max(atraso);
        row.vencimento_mais_antigo = row.vencimento_mais_antigo.min(receivable.data_vencimento);
    }

    let mut rows: Vec<DelinquencyRow> = by_client.into_values().collect();
    rows.sort_by(|a, b| {
        b.total_em_aberto
            .cmp(&a.total_em_aberto)
            .then_with(|| a.cliente_nome.cmp(&b.cliente_nome))
    });
    rows
}

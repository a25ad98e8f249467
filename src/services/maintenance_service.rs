// src/services/maintenance_service.rs

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::models::maintenance::{DueStatus, MaintenanceModel, MaintenanceSchedule, ScheduleDue};

/// Fração do intervalo a partir da qual a manutenção fica "próxima" (10%).
fn warning_fraction() -> Decimal {
    Decimal::new(1, 1)
}

fn status_by_hours(remaining: Decimal, interval: Decimal) -> DueStatus {
    if remaining <= Decimal::ZERO {
        DueStatus::Vencida
    } else if remaining <= interval * warning_fraction() {
        DueStatus::Proxima
    } else {
        DueStatus::EmDia
    }
}

// Vencer hoje ainda é "próxima"; vencida é só depois do dia.
fn status_by_days(remaining: i64, interval: i64) -> DueStatus {
    let warning = (Decimal::from(interval) * warning_fraction()).ceil();
    if remaining < 0 {
        DueStatus::Vencida
    } else if Decimal::from(remaining) <= warning {
        DueStatus::Proxima
    } else {
        DueStatus::EmDia
    }
}

/// Situação de uma programação por uso (horímetro) e por calendário; vale a pior.
/// Critério sem dados (sem intervalo ou sem última execução) é ignorado, assim como
/// um intervalo que leve a data ou o horímetro para fora do representável.
pub fn due_status(
    schedule: &MaintenanceSchedule,
    model: Option<&MaintenanceModel>,
    today: NaiveDate,
) -> ScheduleDue {
    let interval_hours = schedule
        .intervalo_horas
        .or_else(|| model.and_then(|m| m.intervalo_horas))
        .filter(|h| *h > Decimal::ZERO);
    let interval_days = schedule
        .intervalo_dias
        .or_else(|| model.and_then(|m| m.intervalo_dias))
        .filter(|d| *d > 0);

    let mut status = DueStatus::EmDia;

    let mut next_due_horimetro = None;
    let mut hours_remaining = None;
    let next_by_hours = interval_hours
        .zip(schedule.ultima_execucao_horimetro)
        .and_then(|(interval, last)| Some((interval, last.checked_add(interval)?)));
    if let Some((interval, next)) = next_by_hours {
        next_due_horimetro = Some(next);
        if let Some(current) = schedule.horimetro_atual {
            let remaining = next.saturating_sub(current);
            hours_remaining = Some(remaining);
            status = status.max(status_by_hours(remaining, interval));
        }
    }

    let mut next_due_date = None;
    let mut days_remaining = None;
    let next_by_days = interval_days
        .zip(schedule.ultima_execucao_data)
        .and_then(|(interval, last)| {
            let next = last.checked_add_signed(Duration::try_days(interval)?)?;
            Some((interval, next))
        });
    if let Some((interval, next)) = next_by_days {
        let remaining = (next - today).num_days();
        next_due_date = Some(next);
        days_remaining = Some(remaining);
        status = status.max(status_by_days(remaining, interval));
    }

    ScheduleDue {
        schedule_id: schedule.id,
        equipamento: schedule.equipamento,
        equipamento_nome: schedule.equipamento_nome.clone(),
        modelo_nome: schedule
            .modelo_nome
            .clone()
            .or_else(|| model.map(|m| m.nome.clone())),
        status,
        next_due_horimetro,
        hours_remaining,
        next_due_date,
        days_remaining,
    }
}

/// Vencimentos das programações ativas, mais urgentes primeiro.
pub fn due_list(
    schedules: &[MaintenanceSchedule],
    models: &[MaintenanceModel],
    today: NaiveDate,
) -> Vec<ScheduleDue> {
    let models: HashMap<i64, &MaintenanceModel> = models.iter().map(|m| (m.id, m)).collect();

    let mut list: Vec<ScheduleDue> = schedules
        .iter()
        .filter(|s| s.ativo)
        .map(|s| due_status(s, models.get(&s.modelo).copied(), today))
        .collect();

    list.sort_by(|a, b| {
        b.status
            .cmp(&a.status)
            .then_with(|| a.hours_remaining.cmp(&b.hours_remaining))
            .then_with(|| a.days_remaining.cmp(&b.days_remaining))
    });
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn schedule(id: i64) -> MaintenanceSchedule {
        MaintenanceSchedule {
            id,
            equipamento: 10,
            equipamento_nome: Some("ESC-014".into()),
            modelo: 1,
            modelo_nome: None,
            intervalo_horas: None,
            intervalo_dias: None,
            ultima_execucao_data: None,
            ultima_execucao_horimetro: None,
            horimetro_atual: None,
            ativo: true,
        }
    }

    fn model() -> MaintenanceModel {
        MaintenanceModel {
            id: 1,
            nome: "Revisão 250h".into(),
            tipo_equipamento: None,
            intervalo_horas: Some(Decimal::from(250)),
            intervalo_dias: Some(180),
            itens: vec![],
        }
    }

    #[test]
    fn usage_based_status_uses_model_interval() {
        let mut s = schedule(1);
        s.ultima_execucao_horimetro = Some(Decimal::from(1000));
        s.horimetro_atual = Some(Decimal::from(1230));

        let due = due_status(&s, Some(&model()), date(2024, 1, 1));
        assert_eq!(due.next_due_horimetro, Some(Decimal::from(1250)));
        assert_eq!(due.hours_remaining, Some(Decimal::from(20)));
        assert_eq!(due.status, DueStatus::Proxima);
        assert_eq!(due.modelo_nome.as_deref(), Some("Revisão 250h"));

        s.horimetro_atual = Some(Decimal::from(1260));
        assert_eq!(due_status(&s, Some(&model()), date(2024, 1, 1)).status, DueStatus::Vencida);
    }

    #[test]
    fn worst_criterion_wins() {
        let mut s = schedule(1);
        s.ultima_execucao_horimetro = Some(Decimal::from(1000));
        s.horimetro_atual = Some(Decimal::from(1010));
        s.ultima_execucao_data = Some(date(2023, 6, 1));

        // 180 dias depois de 01/06/2023 = 28/11/2023
        let due = due_status(&s, Some(&model()), date(2024, 1, 1));
        assert_eq!(due.next_due_date, Some(date(2023, 11, 28)));
        assert_eq!(due.status, DueStatus::Vencida);
    }

    #[test]
    fn due_today_is_upcoming_not_overdue() {
        let mut s = schedule(1);
        s.intervalo_dias = Some(30);
        s.ultima_execucao_data = Some(date(2024, 1, 1));
        let due = due_status(&s, None, date(2024, 1, 31));
        assert_eq!(due.days_remaining, Some(0));
        assert_eq!(due.status, DueStatus::Proxima);
    }

    #[test]
    fn missing_data_is_on_schedule() {
        let due = due_status(&schedule(1), None, date(2024, 1, 1));
        assert_eq!(due.status, DueStatus::EmDia);
        assert!(due.next_due_date.is_none());
    }

    #[test]
    fn list_puts_overdue_first_and_skips_inactive() {
        let mut overdue = schedule(1);
        overdue.ultima_execucao_horimetro = Some(Decimal::from(0));
        overdue.horimetro_atual = Some(Decimal::from(300));
        let ok = schedule(2);
        let mut inactive = schedule(3);
        inactive.ativo = false;

        let list = due_list(&[ok, overdue, inactive], &[model()], date(2024, 1, 1));
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].schedule_id, 1);
        assert_eq!(list[0].status, DueStatus::Vencida);
    }

    #[test]
    fn interval_beyond_the_calendar_is_ignored() {
        let mut s = schedule(1);
        s.ultima_execucao_data = Some(date(2024, 1, 1));

        for huge in [9_000_000_000, i64::MAX] {
            s.intervalo_dias = Some(huge);
            let due = due_status(&s, None, date(2024, 6, 1));
            assert_eq!(due.status, DueStatus::EmDia);
            assert!(due.next_due_date.is_none());
            assert!(due.days_remaining.is_none());
        }
    }

    #[test]
    fn meter_overflow_drops_the_usage_criterion() {
        let mut s = schedule(1);
        s.intervalo_horas = Some(Decimal::MAX);
        s.ultima_execucao_horimetro = Some(Decimal::from(10));
        s.horimetro_atual = Some(Decimal::from(20));

        let due = due_status(&s, None, date(2024, 1, 1));
        assert!(due.next_due_horimetro.is_none());
        assert_eq!(due.status, DueStatus::EmDia);

        // Leitura negativa absurda satura o restante em vez de estourar
        s.intervalo_horas = Some(Decimal::from(250));
        s.ultima_execucao_horimetro = Some(Decimal::MAX - Decimal::from(250));
        s.horimetro_atual = Some(Decimal::MIN);
        let due = due_status(&s, None, date(2024, 1, 1));
        assert_eq!(due.hours_remaining, Some(Decimal::MAX));
    }
}

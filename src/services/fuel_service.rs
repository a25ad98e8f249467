// src/services/fuel_service.rs

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{
    common::money::{round_cents, saturating_sum},
    models::fuel::{FuelConsumption, FuelLog},
};

/// Consumo médio por equipamento (litros/hora).
///
/// O primeiro abastecimento com horímetro só marca o ponto de partida: os litros
/// dele foram gastos antes da janela medida e não entram na média.
pub fn consumption(logs: &[FuelLog]) -> Vec<FuelConsumption> {
    let mut by_equipment: BTreeMap<i64, Vec<&FuelLog>> = BTreeMap::new();
    for log in logs {
        by_equipment.entry(log.equipamento).or_default().push(log);
    }

    by_equipment
        .into_iter()
        .map(|(equipamento, mut entries)| {
            entries.sort_by(|a, b| a.data.cmp(&b.data).then_with(|| a.horimetro.cmp(&b.horimetro)));

            let total_litros = saturating_sum(entries.iter().map(|e| e.litros));
            let total_valor = saturating_sum(entries.iter().filter_map(|e| e.valor_total));

            let with_meter: Vec<&&FuelLog> = entries.iter().filter(|e| e.horimetro.is_some()).collect();
            let (horas, litros_por_hora) = match (with_meter.first(), with_meter.last()) {
                (Some(first), Some(last)) if with_meter.len() >= 2 => {
                    let horas = last
                        .horimetro
                        .unwrap_or_default()
                        .saturating_sub(first.horimetro.unwrap_or_default());
                    let litros = saturating_sum(with_meter.iter().skip(1).map(|e| e.litros));
                    if horas > Decimal::ZERO {
                        (horas, litros.checked_div(horas).map(round_cents))
                    } else {
                        (Decimal::ZERO, None)
                    }
                }
                _ => (Decimal::ZERO, None),
            };

            FuelConsumption {
                equipamento,
                equipamento_nome: entries.iter().find_map(|e| e.equipamento_nome.clone()),
                total_litros,
                total_valor: round_cents(total_valor),
                horas_trabalhadas: horas,
                litros_por_hora,
            }
        })
        .collect()
}

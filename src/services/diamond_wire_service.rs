// src/services/diamond_wire_service.rs

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{
    common::money::round_cents,
    models::diamond_wire::{CutRecord, WireYield},
};

/// Área cortada em m². Medidas absurdas saturam em vez de estourar.
pub fn cut_area(cut: &CutRecord) -> Decimal {
    cut.comprimento_m.saturating_mul(cut.altura_m)
}

/// Desgaste do fio no corte, em mm. Leitura final maior que a inicial conta como zero.
pub fn wire_wear(cut: &CutRecord) -> Decimal {
    cut.diametro_inicial_mm.saturating_sub(cut.diametro_final_mm).max(Decimal::ZERO)
}

/// Rendimento por fio: m² cortados por mm de desgaste.
pub fn yields(cuts: &[CutRecord]) -> Vec<WireYield> {
    let mut by_wire: BTreeMap<i64, WireYield> = BTreeMap::new();

    for cut in cuts {
        let entry = by_wire.entry(cut.fio).or_insert_with(|| WireYield {
            fio: cut.fio,
            fio_codigo: cut.fio_codigo.clone(),
            cortes: 0,
            area_total_m2: Decimal::ZERO,
            desgaste_total_mm: Decimal::ZERO,
            rendimento_m2_por_mm: Decimal::ZERO,
        });
        entry.cortes = entry.cortes.saturating_add(1);
        entry.area_total_m2 = entry.area_total_m2.saturating_add(cut_area(cut));
        entry.desgaste_total_mm = entry.desgaste_total_mm.saturating_add(wire_wear(cut));
    }

    by_wire
        .into_values()
        .map(|mut y| {
            if y.desgaste_total_mm > Decimal::ZERO {
                y.rendimento_m2_por_mm = y
                    .area_total_m2
                    .checked_div(y.desgaste_total_mm)
                    .map_or(Decimal::MAX, round_cents);
            }
            y.area_total_m2 = round_cents(y.area_total_m2);
            y
        })
        .collect()
}

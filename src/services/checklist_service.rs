// src/services/checklist_service.rs

use rust_decimal::Decimal;

use crate::{
    common::money::round_cents,
    models::checklist::{Checklist, ChecklistAnswer, ChecklistItem, ChecklistStatus, ConformityStats},
};

/// Percentual de conformidade: `(respostas - não conformidades) / respostas`.
/// Sem respostas, 0%.
pub fn conformity_rate(total_respostas: u32, total_nao_conformidades: u32) -> Decimal {
    if total_respostas == 0 {
        return Decimal::ZERO;
    }
    let conformes = total_respostas.saturating_sub(total_nao_conformidades);
    round_cents(Decimal::from(conformes) * Decimal::ONE_HUNDRED / Decimal::from(total_respostas))
}

fn stats(total_respostas: u32, total_nao_conformidades: u32) -> ConformityStats {
    ConformityStats {
        total_respostas,
        total_nao_conformidades,
        conformity_rate: conformity_rate(total_respostas, total_nao_conformidades),
    }
}

/// Conta a partir dos itens. "Não aplicável" e itens sem resposta não contam.
pub fn stats_from_items(items: &[ChecklistItem]) -> ConformityStats {
    let mut respostas = 0u32;
    let mut nao_conformes = 0u32;

    for item in items {
        match item.resposta {
            Some(ChecklistAnswer::Conforme) => respostas += 1,
            Some(ChecklistAnswer::NaoConforme) => {
                respostas += 1;
                nao_conformes += 1;
            }
            Some(ChecklistAnswer::NaoAplicavel) | None => {}
        }
    }

    stats(respostas, nao_conformes)
}

/// Usa os itens quando vieram; senão, os totais que a listagem traz.
pub fn stats_for_checklist(checklist: &Checklist) -> ConformityStats {
    if !checklist.itens.is_empty() {
        return stats_from_items(&checklist.itens);
    }
    stats(
        checklist.total_respostas.unwrap_or(0),
        checklist.total_nao_conformidades.unwrap_or(0),
    )
}

/// Conformidade geral de várias inspeções; canceladas ficam de fora.
pub fn aggregate(checklists: &[Checklist]) -> ConformityStats {
    let (respostas, nao_conformes) = checklists
        .iter()
        .filter(|c| c.status != ChecklistStatus::Cancelado)
        .map(stats_for_checklist)
        .fold((0u32, 0u32), |(r, n), s| {
            (r.saturating_add(s.total_respostas), n.saturating_add(s.total_nao_conformidades))
        });

    stats(respostas, nao_conformes)
}

/// Itens marcados como "não conforme", na ordem do checklist.
pub fn non_conformities(checklist: &Checklist) -> Vec<&ChecklistItem> {
    checklist
        .itens
        .iter()
        .filter(|item| item.resposta == Some(ChecklistAnswer::NaoConforme))
        .collect()
}

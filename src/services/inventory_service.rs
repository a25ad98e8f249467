// src/services/inventory_service.rs

use crate::{
    common::money::{round_cents, saturating_sum},
    models::inventory::{Product, StockPosition, StockPositionRow},
};

/// Posição de estoque valorizada pelo custo médio. Produtos inativos ficam de fora.
pub fn stock_position(products: &[Product]) -> StockPosition {
    let mut rows: Vec<StockPositionRow> = products
        .iter()
        .filter(|p| p.ativo)
        .map(|p| StockPositionRow {
            produto_id: p.id,
            codigo: p.codigo.clone(),
            descricao: p.descricao.clone(),
            unidade: p.unidade.clone(),
            quantidade: p.quantidade,
            custo_medio: p.custo_medio,
            valor_total: round_cents(p.quantidade.saturating_mul(p.custo_medio)),
            abaixo_minimo: p.estoque_minimo.is_some_and(|min| p.quantidade < min),
        })
        .collect();

    rows.sort_by(|a, b| a.descricao.to_lowercase().cmp(&b.descricao.to_lowercase()));

    let total_value = saturating_sum(rows.iter().map(|r| r.valor_total));
    let below_minimum = rows.iter().filter(|r| r.abaixo_minimo).count();

    StockPosition {
        rows,
        total_value,
        below_minimum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn product(id: i64, descricao: &str, qtd: &str, custo: &str, minimo: Option<&str>) -> Product {
        Product {
            id,
            codigo: Some(format!("P{:03}", id)),
            descricao: descricao.into(),
            unidade: Some("UN".into()),
            quantidade: Decimal::from_str(qtd).unwrap(),
            custo_medio: Decimal::from_str(custo).unwrap(),
            estoque_minimo: minimo.map(|m| Decimal::from_str(m).unwrap()),
            localizacao: None,
            ativo: true,
        }
    }

    #[test]
    fn values_stock_and_flags_below_minimum() {
        let mut inactive = product(3, "Graxa", "10", "5", None);
        inactive.ativo = false;

        let position = stock_position(&[
            product(1, "Filtro de óleo", "3", "45.333", Some("5")),
            product(2, "Correia", "10", "12.50", Some("2")),
            inactive,
        ]);

        assert_eq!(position.rows.len(), 2);
        assert_eq!(position.rows[0].descricao, "Correia");
        assert_eq!(position.rows[1].valor_total, Decimal::from_str("136.00").unwrap());
        assert!(position.rows[1].abaixo_minimo);
        assert_eq!(position.below_minimum, 1);
        assert_eq!(position.total_value, Decimal::from_str("261.00").unwrap());
    }

    #[test]
    fn huge_quantities_saturate_instead_of_panicking() {
        let max = Decimal::MAX.to_string();
        let position = stock_position(&[
            product(1, "Areia", &max, "2", None),
            product(2, "Brita", &max, "1", None),
        ]);

        assert_eq!(position.rows[0].valor_total, Decimal::MAX);
        assert_eq!(position.total_value, Decimal::MAX);
    }
}

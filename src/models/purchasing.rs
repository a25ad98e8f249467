// src/models/purchasing.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseOrderStatus {
    Rascunho,
    Aprovado,
    Recebido,
    Cancelado,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PurchaseOrderItem {
    pub produto: i64,
    #[serde(default)]
    pub produto_nome: Option<String>,
    pub quantidade: Decimal,
    #[serde(default)]
    pub valor_unitario: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PurchaseOrder {
    pub id: i64,
    #[serde(default)]
    #[schema(example = "PC-2024-0007")]
    pub numero: Option<String>,
    #[serde(default)]
    pub fornecedor: Option<i64>,
    #[serde(default)]
    pub fornecedor_nome: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub data_pedido: Option<NaiveDate>,
    pub status: PurchaseOrderStatus,
    #[serde(default)]
    pub itens: Vec<PurchaseOrderItem>,
    #[serde(default)]
    pub valor_total: Option<Decimal>,
}

impl PurchaseOrder {
    /// Total informado pelo backend ou, na falta dele, a soma dos itens.
    pub fn total(&self) -> Decimal {
        self.valor_total.unwrap_or_else(|| {
            self.itens
                .iter()
                .map(|item| item.quantidade * item.valor_unitario)
                .sum()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn total_sums_items_when_backend_omits_it() {
        let po: PurchaseOrder = serde_json::from_value(json!({
            "id": 1,
            "status": "RASCUNHO",
            "itens": [
                { "produto": 1, "quantidade": "2", "valor_unitario": "10.50" },
                { "produto": 2, "quantidade": "1", "valor_unitario": "4.00" }
            ]
        }))
        .unwrap();
        assert_eq!(po.total(), Decimal::new(2500, 2));
    }
}

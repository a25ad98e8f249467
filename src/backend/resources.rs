// src/backend/resources.rs

use std::{fmt::Display, marker::PhantomData};

use axum::http::StatusCode;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    backend::{http::decode, BackendClient},
    common::error::AppError,
    middleware::auth::Session,
    models::{
        cadastros::{Client, Development, Operator, Technician},
        checklist::Checklist,
        diamond_wire::{CutRecord, DiamondWire},
        equipment::{Equipment, EquipmentType},
        finance::{Payable, PaymentPayload, Receivable},
        fuel::FuelLog,
        inventory::{Product, StockMovement},
        maintenance::{MaintenanceModel, MaintenanceSchedule},
        purchasing::PurchaseOrder,
    },
};

/// Teto de páginas seguidas por `list_all`; um `next` em ciclo não prende a requisição.
const MAX_PAGES: usize = 500;

/// Um recurso CRUD do backend: caminho da coleção e o registro que ela devolve.
pub trait Resource: DeserializeOwned + Serialize + Send + Sync + 'static {
    /// Caminho relativo à URL base, com barra final (`"clientes/"`).
    const PATH: &'static str;
    /// Nome legível, usado nas mensagens de "não encontrado".
    const LABEL: &'static str;
}

// Listagens podem vir como array puro ou paginadas no formato DRF.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Page {
        #[serde(default)]
        next: Option<String>,
        results: Vec<T>,
    },
    Plain(Vec<T>),
}

impl<T> ListEnvelope<T> {
    /// Registros desta página e o link da próxima, se houver.
    fn into_parts(self) -> (Vec<T>, Option<String>) {
        match self {
            ListEnvelope::Page { results, next } => (results, next.filter(|n| !n.is_empty())),
            ListEnvelope::Plain(items) => (items, None),
        }
    }
}

/// Operações tipadas sobre um `Resource`, sempre em nome de uma sessão.
pub struct ResourceApi<'a, R: Resource> {
    client: &'a BackendClient,
    session: &'a Session,
    _marker: PhantomData<R>,
}

impl BackendClient {
    pub fn resource<'a, R: Resource>(&'a self, session: &'a Session) -> ResourceApi<'a, R> {
        ResourceApi {
            client: self,
            session,
            _marker: PhantomData,
        }
    }
}

impl<'a, R: Resource> ResourceApi<'a, R> {
    fn item_path(id: impl Display) -> String {
        format!("{}{}/", R::PATH, id)
    }

    /// Só a primeira página, para telas que paginam por conta própria.
    pub async fn list(&self, filters: &[(String, String)]) -> Result<Vec<R>, AppError> {
        let value: Value = self.client.get(R::PATH, self.session, filters).await?;
        let envelope: ListEnvelope<R> = decode(value, R::PATH)?;
        Ok(envelope.into_parts().0)
    }

    /// Todas as páginas, seguindo `next`. Relatórios e totais usam esta.
    pub async fn list_all(&self, filters: &[(String, String)]) -> Result<Vec<R>, AppError> {
        let value: Value = self.client.get(R::PATH, self.session, filters).await?;
        let (mut items, mut next) = decode::<ListEnvelope<R>>(value, R::PATH)?.into_parts();

        let mut pages = 1;
        while let Some(link) = next.take() {
            if pages >= MAX_PAGES {
                return Err(AppError::InvalidPayload(format!(
                    "{}: mais de {} páginas na listagem",
                    R::PATH,
                    MAX_PAGES
                )));
            }
            let value = self.client.get_link(&link, self.session).await?;
            let (page, following) = decode::<ListEnvelope<R>>(value, &link)?.into_parts();
            items.extend(page);
            next = following;
            pages += 1;
        }

        tracing::debug!(path = R::PATH, pages, total = items.len(), "Listagem completa lida");
        Ok(items)
    }

    pub async fn get(&self, id: impl Display) -> Result<R, AppError> {
        let path = Self::item_path(&id);
        self.client
            .get(&path, self.session, &[])
            .await
            .map_err(|e| not_found_as(e, || format!("{} {}", R::LABEL, id)))
    }

    pub async fn create<P: Serialize + ?Sized>(&self, payload: &P) -> Result<R, AppError> {
        self.client.post(R::PATH, Some(self.session), payload).await
    }

    /// PATCH parcial.
    pub async fn update<P: Serialize + ?Sized>(&self, id: impl Display, patch: &P) -> Result<R, AppError> {
        let path = Self::item_path(&id);
        self.client
            .patch(&path, self.session, patch)
            .await
            .map_err(|e| not_found_as(e, || format!("{} {}", R::LABEL, id)))
    }

    /// PUT completo.
    pub async fn replace<P: Serialize + ?Sized>(&self, id: impl Display, payload: &P) -> Result<R, AppError> {
        let path = Self::item_path(&id);
        self.client
            .put(&path, self.session, payload)
            .await
            .map_err(|e| not_found_as(e, || format!("{} {}", R::LABEL, id)))
    }

    /// O backend pode recusar (ex.: registro referenciado); o erro dele volta como está.
    pub async fn delete(&self, id: impl Display) -> Result<(), AppError> {
        let path = Self::item_path(&id);
        self.client
            .delete(&path, self.session)
            .await
            .map_err(|e| not_found_as(e, || format!("{} {}", R::LABEL, id)))
    }

    /// Ações de transição de status: `POST {PATH}{id}/{action}/`.
    pub async fn action<P, T>(&self, id: impl Display, action: &str, payload: &P) -> Result<T, AppError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let path = format!("{}{}/{}/", R::PATH, id, action);
        self.client
            .post(&path, Some(self.session), payload)
            .await
            .map_err(|e| not_found_as(e, || format!("{} {}", R::LABEL, id)))
    }
}

fn not_found_as(err: AppError, label: impl FnOnce() -> String) -> AppError {
    match err {
        AppError::Backend { status: StatusCode::NOT_FOUND, .. } => AppError::ResourceNotFound(label()),
        other => other,
    }
}

// --- Ações específicas ---

impl ResourceApi<'_, Payable> {
    pub async fn pay(&self, id: i64, payment: &PaymentPayload) -> Result<Payable, AppError> {
        self.action(id, "pagar", payment).await
    }

    pub async fn cancel(&self, id: i64) -> Result<Payable, AppError> {
        self.action(id, "cancelar", &serde_json::json!({})).await
    }
}

impl ResourceApi<'_, Receivable> {
    pub async fn receive(&self, id: i64, payment: &PaymentPayload) -> Result<Receivable, AppError> {
        self.action(id, "receber", payment).await
    }

    pub async fn cancel(&self, id: i64) -> Result<Receivable, AppError> {
        self.action(id, "cancelar", &serde_json::json!({})).await
    }
}

impl ResourceApi<'_, Checklist> {
    pub async fn finish(&self, id: i64) -> Result<Checklist, AppError> {
        self.action(id, "finalizar", &serde_json::json!({})).await
    }

    pub async fn cancel(&self, id: i64, motivo: Option<&str>) -> Result<Checklist, AppError> {
        self.action(id, "cancelar", &serde_json::json!({ "motivo": motivo })).await
    }
}

impl ResourceApi<'_, PurchaseOrder> {
    pub async fn approve(&self, id: i64) -> Result<PurchaseOrder, AppError> {
        self.action(id, "aprovar", &serde_json::json!({})).await
    }

    /// Recebimento gera as entradas de estoque no backend.
    pub async fn receive(&self, id: i64) -> Result<PurchaseOrder, AppError> {
        self.action(id, "receber", &serde_json::json!({})).await
    }
}

impl ResourceApi<'_, Equipment> {
    pub async fn get_by_uuid(&self, uuid: Uuid) -> Result<Equipment, AppError> {
        let path = format!("{}uuid/{}/", Equipment::PATH, uuid);
        self.client
            .get(&path, self.session, &[])
            .await
            .map_err(|e| not_found_as(e, || format!("{} {}", Equipment::LABEL, uuid)))
    }
}

// --- Caminhos dos recursos ---

impl Resource for Client {
    const PATH: &'static str = "clientes/";
    const LABEL: &'static str = "Cliente";
}

impl Resource for Development {
    const PATH: &'static str = "obras/";
    const LABEL: &'static str = "Obra";
}

impl Resource for Equipment {
    const PATH: &'static str = "equipamentos/";
    const LABEL: &'static str = "Equipamento";
}

impl Resource for EquipmentType {
    const PATH: &'static str = "tipos-equipamento/";
    const LABEL: &'static str = "Tipo de equipamento";
}

impl Resource for Operator {
    const PATH: &'static str = "operadores/";
    const LABEL: &'static str = "Operador";
}

impl Resource for Technician {
    const PATH: &'static str = "tecnicos/";
    const LABEL: &'static str = "Técnico";
}

impl Resource for MaintenanceModel {
    const PATH: &'static str = "modelos-manutencao/";
    const LABEL: &'static str = "Modelo de manutenção";
}

impl Resource for MaintenanceSchedule {
    const PATH: &'static str = "manutencoes/";
    const LABEL: &'static str = "Manutenção";
}

impl Resource for Checklist {
    const PATH: &'static str = "checklists/";
    const LABEL: &'static str = "Checklist";
}

impl Resource for Payable {
    const PATH: &'static str = "contas-pagar/";
    const LABEL: &'static str = "Conta a pagar";
}

impl Resource for Receivable {
    const PATH: &'static str = "contas-receber/";
    const LABEL: &'static str = "Conta a receber";
}

impl Resource for Product {
    const PATH: &'static str = "produtos/";
    const LABEL: &'static str = "Produto";
}

impl Resource for StockMovement {
    const PATH: &'static str = "movimentacoes-estoque/";
    const LABEL: &'static str = "Movimentação de estoque";
}

impl Resource for PurchaseOrder {
    const PATH: &'static str = "pedidos-compra/";
    const LABEL: &'static str = "Pedido de compra";
}

impl Resource for FuelLog {
    const PATH: &'static str = "abastecimentos/";
    const LABEL: &'static str = "Abastecimento";
}

impl Resource for DiamondWire {
    const PATH: &'static str = "fios-diamantados/";
    const LABEL: &'static str = "Fio diamantado";
}

impl Resource for CutRecord {
    const PATH: &'static str = "cortes/";
    const LABEL: &'static str = "Corte";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_envelope_accepts_paginated_and_plain() {
        let paged: ListEnvelope<Client> = serde_json::from_value(json!({
            "count": 1, "next": null, "previous": null,
            "results": [{ "id": 1, "nome": "ACME" }]
        }))
        .unwrap();
        let (items, next) = paged.into_parts();
        assert_eq!(items.len(), 1);
        assert!(next.is_none());

        let plain: ListEnvelope<Client> =
            serde_json::from_value(json!([{ "id": 1, "nome": "ACME" }, { "id": 2, "nome": "Beta" }]))
                .unwrap();
        assert_eq!(plain.into_parts().0.len(), 2);
    }

    #[test]
    fn page_envelope_keeps_the_next_link() {
        let paged: ListEnvelope<Client> = serde_json::from_value(json!({
            "count": 3, "next": "http://backend/api/v1/clientes/?page=2",
            "results": [{ "id": 1, "nome": "ACME" }]
        }))
        .unwrap();
        let (_, next) = paged.into_parts();
        assert_eq!(next.as_deref(), Some("http://backend/api/v1/clientes/?page=2"));
    }

    #[test]
    fn backend_404_becomes_resource_not_found() {
        let err = not_found_as(
            AppError::Backend { status: StatusCode::NOT_FOUND, message: None },
            || "Conta a pagar 9".to_string(),
        );
        assert!(matches!(err, AppError::ResourceNotFound(ref label) if label == "Conta a pagar 9"));

        let other = not_found_as(
            AppError::Backend { status: StatusCode::CONFLICT, message: None },
            || unreachable!(),
        );
        assert!(matches!(other, AppError::Backend { status: StatusCode::CONFLICT, .. }));
    }
}

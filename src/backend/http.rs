// src/backend/http.rs

use anyhow::Context;
use axum::body::Bytes;
use axum::http::{header, HeaderValue, Method, StatusCode};
use reqwest::Url;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use tracing::{instrument, warn};

use crate::{
    common::error::{extract_backend_message, AppError},
    middleware::auth::Session,
    models::auth::{LoginUserPayload, Me, TokenPair},
};

/// Cliente HTTP compartilhado para o backend REST.
///
/// Todas as chamadas autenticadas recebem a `Session` explicitamente e
/// injetam `Authorization: Bearer <access>`. Não há retry nem cache: erro
/// de status vira `AppError::Backend`, erro de transporte vira
/// `AppError::BackendUnavailable`.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
}

/// Resposta crua do backend, repassada pelo proxy sem interpretação.
#[derive(Debug)]
pub struct ForwardedResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl BackendClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("API_BASE_URL inválida: {}", base_url))?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("frota-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Falha ao criar o cliente HTTP")?;

        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> Result<Url, AppError> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("Caminho inválido '{}': {}", path, e)))?;
        self.ensure_inside_base(url, path)
    }

    /// O token só sai para a origem e o prefixo configurados. Caminho absoluto,
    /// `..` codificado e afins que escapem da base viram "não encontrado".
    fn ensure_inside_base(&self, url: Url, requested: &str) -> Result<Url, AppError> {
        let same_origin = url.scheme() == self.base_url.scheme()
            && url.host_str() == self.base_url.host_str()
            && url.port_or_known_default() == self.base_url.port_or_known_default();

        if same_origin && url.path().starts_with(self.base_url.path()) {
            return Ok(url);
        }

        warn!(requested, resolved = %url, "Caminho fora da base do backend recusado");
        Err(AppError::ResourceNotFound(requested.to_string()))
    }

    /// Link `next` de uma listagem paginada. O backend pode anunciar outro host
    /// (atrás de proxy); só caminho e query são aproveitados, sobre a base configurada.
    fn link_url(&self, link: &str) -> Result<Url, AppError> {
        let announced = self
            .base_url
            .join(link)
            .map_err(|e| AppError::InvalidPayload(format!("Link de paginação inválido '{}': {}", link, e)))?;

        let mut url = self.base_url.clone();
        url.set_path(announced.path());
        url.set_query(announced.query());
        self.ensure_inside_base(url, link)
    }

    #[instrument(skip(self, method, session, query, body), fields(method = %method))]
    pub async fn send_json(
        &self,
        method: Method,
        path: &str,
        session: Option<&Session>,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value, AppError> {
        let url = self.url(path)?;
        self.execute(method, url, path, session, query, body).await
    }

    /// Segue um link de paginação devolvido pelo backend.
    #[instrument(skip(self, session))]
    pub async fn get_link(&self, link: &str, session: &Session) -> Result<Value, AppError> {
        let url = self.link_url(link)?;
        self.execute(Method::GET, url, link, Some(session), &[], None).await
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        label: &str,
        session: Option<&Session>,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value, AppError> {
        let mut request = self.http.request(method.clone(), url);

        if let Some(session) = session {
            request = request.bearer_auth(&session.access);
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .as_ref()
                .and_then(extract_backend_message);
            warn!(%status, ?message, "Backend respondeu com erro");
            return Err(AppError::Backend { status, message });
        }

        // 204 No Content (ex.: DELETE)
        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| AppError::InvalidPayload(format!("{} {}: {}", method, label, e)))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        session: &Session,
        query: &[(String, String)],
    ) -> Result<T, AppError> {
        let value = self.send_json(Method::GET, path, Some(session), query, None).await?;
        decode(value, path)
    }

    pub async fn post<T, B>(&self, path: &str, session: Option<&Session>, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = to_value(body)?;
        let value = self.send_json(Method::POST, path, session, &[], Some(&body)).await?;
        decode(value, path)
    }

    pub async fn patch<T, B>(&self, path: &str, session: &Session, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = to_value(body)?;
        let value = self.send_json(Method::PATCH, path, Some(session), &[], Some(&body)).await?;
        decode(value, path)
    }

    pub async fn put<T, B>(&self, path: &str, session: &Session, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = to_value(body)?;
        let value = self.send_json(Method::PUT, path, Some(session), &[], Some(&body)).await?;
        decode(value, path)
    }

    pub async fn delete(&self, path: &str, session: &Session) -> Result<(), AppError> {
        self.send_json(Method::DELETE, path, Some(session), &[], None).await?;
        Ok(())
    }

    /// Repasse cru para a rota de proxy: método, query e corpo como vieram.
    #[instrument(skip(self, method, session, content_type, body), fields(method = %method))]
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        raw_query: Option<&str>,
        session: &Session,
        content_type: Option<&HeaderValue>,
        body: Bytes,
    ) -> Result<ForwardedResponse, AppError> {
        let mut url = self.url(path)?;
        url.set_query(raw_query);

        let mut request = self.http.request(method, url).bearer_auth(&session.access);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type.clone());
        }
        if !body.is_empty() {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response.bytes().await?;

        if status.is_server_error() {
            warn!(%status, "Backend respondeu com erro no proxy");
        }

        Ok(ForwardedResponse { status, content_type, body })
    }

    // --- Autenticação ---

    pub async fn login(&self, payload: &LoginUserPayload) -> Result<TokenPair, AppError> {
        self.post("auth/login/", None, payload).await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        self.post("auth/refresh/", None, &json!({ "refresh": refresh_token }))
            .await
    }

    /// Invalida o refresh token no backend.
    pub async fn logout(&self, session: &Session) -> Result<(), AppError> {
        let body = json!({ "refresh": session.refresh });
        self.send_json(Method::POST, "auth/logout/", Some(session), &[], Some(&body))
            .await?;
        Ok(())
    }

    pub async fn me(&self, session: &Session) -> Result<Me, AppError> {
        self.get("auth/me/", session, &[]).await
    }
}

fn to_value<B: Serialize + ?Sized>(body: &B) -> Result<Value, AppError> {
    serde_json::to_value(body)
        .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("Falha ao serializar corpo: {}", e)))
}

/// Validação na fronteira: o JSON do backend precisa ter o formato do tipo esperado.
pub(crate) fn decode<T: DeserializeOwned>(value: Value, path: &str) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| AppError::InvalidPayload(format!("{}: {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BackendClient {
        BackendClient::new("http://erp.interno:8000/api/v1/").unwrap()
    }

    #[test]
    fn relative_paths_stay_under_the_base() {
        let url = client().url("/equipamentos/3/").unwrap();
        assert_eq!(url.as_str(), "http://erp.interno:8000/api/v1/equipamentos/3/");
    }

    #[test]
    fn paths_that_escape_the_base_are_not_found() {
        let client = client();
        for path in [
            "http://outro-host/roubar",
            "https://erp.interno:8000/api/v1/equipamentos/",
            "../../admin/",
            "%2e%2e/%2E%2E/admin/",
            "equipamentos/../../v2/",
        ] {
            assert!(
                matches!(client.url(path), Err(AppError::ResourceNotFound(ref p)) if p == path),
                "{} deveria ser recusado",
                path
            );
        }
    }

    #[test]
    fn pagination_links_are_rebased_on_the_configured_origin() {
        let client = client();

        let url = client.link_url("http://backend-publico/api/v1/produtos/?page=2").unwrap();
        assert_eq!(url.as_str(), "http://erp.interno:8000/api/v1/produtos/?page=2");

        let relative = client.link_url("/api/v1/produtos/?page=3").unwrap();
        assert_eq!(relative.as_str(), "http://erp.interno:8000/api/v1/produtos/?page=3");

        assert!(matches!(
            client.link_url("http://backend-publico/admin/?page=2"),
            Err(AppError::ResourceNotFound(_))
        ));
    }
}

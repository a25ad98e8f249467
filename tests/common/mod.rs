#![allow(dead_code)]

use axum::{
    body::{self, Body},
    http::{header, Method, Request},
    response::Response,
    Router,
};
use chrono::Utc;
use frota_gateway::{
    build_router,
    config::{AppState, Settings},
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::MockServer;

/// Gateway montado contra um backend falso (wiremock).
pub struct TestApp {
    router: Router,
    pub backend: MockServer,
}

impl TestApp {
    pub async fn new() -> Self {
        let backend = MockServer::start().await;
        let base_url = format!("{}/api/v1/", backend.uri());
        Self::with_backend_url(backend, &base_url)
    }

    /// Aponta para outro endereço (ex.: porta fechada) mantendo o mock vivo.
    pub fn with_backend_url(backend: MockServer, base_url: &str) -> Self {
        let state = AppState::from_settings(Settings::for_backend(base_url))
            .expect("failed to build test state");
        Self {
            router: build_router(state),
            backend,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        self.router.clone().oneshot(request).await.expect("router response")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        self.request(Method::GET, uri, cookie, None).await
    }

    pub async fn post(&self, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Response {
        self.request(Method::POST, uri, cookie, body).await
    }
}

/// JWT com a forma que o backend emite; a assinatura não importa para o gateway.
pub fn token(expires_in_secs: i64, modules: &[&str], superuser: bool) -> String {
    encode(
        &Header::default(),
        &json!({
            "user_id": 7,
            "exp": Utc::now().timestamp() + expires_in_secs,
            "modulos": modules,
            "is_superuser": superuser,
        }),
        &EncodingKey::from_secret(b"test-secret"),
    )
    .expect("token")
}

pub fn session_cookie(modules: &[&str]) -> String {
    format!("access={}; refresh=refresh-1", token(3600, modules, false))
}

pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

pub async fn response_bytes(response: Response) -> Vec<u8> {
    body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes")
        .to_vec()
}

pub async fn response_json(response: Response) -> Value {
    serde_json::from_slice(&response_bytes(response).await).expect("json response")
}

pub async fn response_text(response: Response) -> String {
    String::from_utf8(response_bytes(response).await).expect("utf-8 body")
}

pub fn me_json() -> Value {
    json!({
        "id": 7,
        "username": "joao.silva",
        "nome": "João Silva",
        "is_superuser": false,
        "modulos": ["financeiro", "nr12"]
    })
}

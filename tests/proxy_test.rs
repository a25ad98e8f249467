mod common;

use axum::http::{header, Method, StatusCode};
use common::{response_json, response_text, session_cookie, token, TestApp};
use serde_json::json;
use wiremock::{
    matchers::{any, body_json, header as header_matcher, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn proxy_injects_bearer_and_keeps_query() {
    let app = TestApp::new().await;
    let access = token(3600, &["cadastros"], false);

    Mock::given(method("GET"))
        .and(path("/api/v1/clientes/"))
        .and(query_param("search", "acme"))
        .and(query_param("page", "2"))
        .and(header_matcher("authorization", format!("Bearer {}", access).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 0, "results": [] })))
        .expect(1)
        .mount(&app.backend)
        .await;

    let cookie = format!("access={}", access);
    let response = app.get("/api/proxy/clientes/?search=acme&page=2", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    assert_eq!(response_json(response).await["count"], 0);
}

#[tokio::test]
async fn proxy_passes_backend_errors_through_untouched() {
    let app = TestApp::new().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/clientes/"))
        .and(body_json(json!({ "nome": "" })))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "nome": ["Este campo não pode ser em branco."] })),
        )
        .mount(&app.backend)
        .await;

    let cookie = session_cookie(&["cadastros"]);
    let response = app
        .request(Method::POST, "/api/proxy/clientes/", Some(&cookie), Some(json!({ "nome": "" })))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response_json(response).await,
        json!({ "nome": ["Este campo não pode ser em branco."] })
    );
}

#[tokio::test]
async fn proxy_forwards_delete_without_body() {
    let app = TestApp::new().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/operadores/5/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.backend)
        .await;

    let cookie = session_cookie(&["cadastros"]);
    let response = app
        .request(Method::DELETE, "/api/proxy/operadores/5/", Some(&cookie), None)
        .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(response_text(response).await, "");
}

#[tokio::test]
async fn proxy_rejects_parent_segments() {
    let app = TestApp::new().await;

    let cookie = session_cookie(&["cadastros"]);
    let response = app.get("/api/proxy/clientes/../../admin/", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn proxy_never_sends_the_token_to_another_host() {
    let app = TestApp::new().await;
    let outsider = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&outsider)
        .await;

    let cookie = session_cookie(&["cadastros"]);
    let response = app
        .get(&format!("/api/proxy/{}/roubar", outsider.uri()), Some(&cookie))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn proxy_rejects_double_encoded_parent_segments() {
    let app = TestApp::new().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.backend)
        .await;

    let cookie = session_cookie(&["cadastros"]);
    let response = app
        .get("/api/proxy/%252e%252e/%252E%252e/admin/", Some(&cookie))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn proxy_requires_session() {
    let app = TestApp::new().await;

    let response = app.get("/api/proxy/clientes/", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_client_goes_through_typed_route() {
    let app = TestApp::new().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/clientes/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 9, "nome": "ACME Mineração" })))
        .expect(1)
        .mount(&app.backend)
        .await;

    let cookie = session_cookie(&["cadastros"]);
    let response = app
        .post(
            "/api/cadastros/clientes",
            Some(&cookie),
            Some(json!({ "nome": "ACME Mineração", "cnpj_cpf": "11.222.333/0001-81" })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response_json(response).await["id"], 9);
}

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new().await;
    let response = app.get("/api/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_text(response).await, "OK");
}

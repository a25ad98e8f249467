mod common;

use axum::http::{header, StatusCode};
use common::{response_bytes, response_json, session_cookie, TestApp};
use serde_json::json;
use wiremock::{
    matchers::{header as header_matcher, method, path, query_param},
    Mock, ResponseTemplate,
};

const UUID: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";

fn equipment(id: i64, uuid: Option<&str>) -> serde_json::Value {
    json!({
        "id": id,
        "uuid": uuid,
        "codigo": "ESC-014",
        "descricao": "Escavadeira hidráulica",
        "ativo": true
    })
}

#[tokio::test]
async fn legacy_label_resolves_by_id() {
    let app = TestApp::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/equipamentos/123/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(equipment(123, None)))
        .expect(1)
        .mount(&app.backend)
        .await;

    let cookie = session_cookie(&[]);
    let response = app
        .post("/api/scanner/resolve", Some(&cookie), Some(json!({ "payload": "eq:123" })))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["equipment"]["id"], 123);
    assert_eq!(body["dashboardPath"], "/dashboard/equipamentos/123");
}

#[tokio::test]
async fn legacy_label_with_code_falls_back_to_lookup() {
    let app = TestApp::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/equipamentos/"))
        .and(query_param("codigo", "ESC-014"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1, "next": null, "previous": null,
            "results": [equipment(14, Some(UUID))]
        })))
        .mount(&app.backend)
        .await;

    let cookie = session_cookie(&[]);
    let response = app
        .post("/api/scanner/resolve", Some(&cookie), Some(json!({ "payload": "eq:ESC-014" })))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["dashboardPath"], format!("/dashboard/equipamento/{}", UUID));
}

#[tokio::test]
async fn public_url_resolves_by_uuid() {
    let app = TestApp::new().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/equipamentos/uuid/{}/", UUID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(equipment(14, Some(UUID))))
        .expect(1)
        .mount(&app.backend)
        .await;

    let cookie = session_cookie(&[]);
    let payload = format!("https://frota.example.com/dashboard/equipamento/{}", UUID);
    let response = app
        .post("/api/scanner/resolve", Some(&cookie), Some(json!({ "payload": payload })))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["equipment"]["id"], 14);
}

#[tokio::test]
async fn unknown_equipment_is_404() {
    let app = TestApp::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/equipamentos/999/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Not found." })))
        .mount(&app.backend)
        .await;

    let cookie = session_cookie(&[]);
    let response = app
        .post("/api/scanner/resolve", Some(&cookie), Some(json!({ "payload": "eq:999" })))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response_json(response).await["error"], "Equipamento 999 não encontrado(a).");
}

#[tokio::test]
async fn unrecognized_text_is_422_with_raw_content() {
    let app = TestApp::new().await;

    let cookie = session_cookie(&[]);
    let response = app
        .post("/api/scanner/resolve", Some(&cookie), Some(json!({ "payload": "hello world" })))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert_eq!(body["details"]["raw"], "hello world");
}

#[tokio::test]
async fn qr_label_is_a_png() {
    let app = TestApp::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/equipamentos/14/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(equipment(14, Some(UUID))))
        .mount(&app.backend)
        .await;

    let cookie = session_cookie(&["equipamentos"]);
    let response = app.get("/api/equipamentos/14/qrcode.png", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    let bytes = response_bytes(response).await;
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[tokio::test]
async fn create_equipment_validates_then_returns_created() {
    let app = TestApp::new().await;
    let cookie = session_cookie(&["equipamentos"]);

    let invalid = app
        .post("/api/equipamentos", Some(&cookie), Some(json!({ "descricao": "" })))
        .await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    let details = &response_json(invalid).await["details"];
    assert!(details["descricao"].is_array());
    assert!(details["tipo"].is_array());

    Mock::given(method("POST"))
        .and(path("/api/v1/equipamentos/"))
        .and(header_matcher("authorization", format!("Bearer {}", cookie_token(&cookie)).as_str()))
        .respond_with(ResponseTemplate::new(201).set_body_json(equipment(15, Some(UUID))))
        .expect(1)
        .mount(&app.backend)
        .await;

    let created = app
        .post(
            "/api/equipamentos",
            Some(&cookie),
            Some(json!({ "descricao": "Escavadeira hidráulica", "codigo": "ESC-015", "tipo": 2, "cliente": 1 })),
        )
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(response_json(created).await["id"], 15);
}

fn cookie_token(cookie: &str) -> &str {
    cookie
        .split("; ")
        .find_map(|pair| pair.strip_prefix("access="))
        .unwrap()
}

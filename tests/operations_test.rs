mod common;

use axum::http::StatusCode;
use common::{response_json, session_cookie, TestApp};
use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path, query_param},
    Mock, ResponseTemplate,
};

fn checklist(id: i64, status: &str, answers: &[&str]) -> serde_json::Value {
    let itens: Vec<_> = answers
        .iter()
        .enumerate()
        .map(|(i, resposta)| json!({ "id": i, "pergunta": format!("Item {}", i), "resposta": resposta }))
        .collect();
    json!({ "id": id, "equipamento": 14, "status": status, "itens": itens })
}

fn rate(body: &serde_json::Value) -> f64 {
    body["conformityRate"].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn checklist_conformity_ignores_not_applicable() {
    let app = TestApp::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/checklists/5/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(checklist(
            5,
            "CONCLUIDO",
            &["CONFORME", "CONFORME", "CONFORME", "NAO_CONFORME", "NAO_APLICAVEL"],
        )))
        .mount(&app.backend)
        .await;

    let cookie = session_cookie(&["nr12"]);
    let response = app.get("/api/nr12/checklists/5/conformidade", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["totalRespostas"], 4);
    assert_eq!(body["totalNaoConformidades"], 1);
    assert_eq!(rate(&body), 75.0);
}

#[tokio::test]
async fn aggregate_conformity_forwards_filters() {
    let app = TestApp::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/checklists/"))
        .and(query_param("equipamento", "14"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            checklist(1, "CONCLUIDO", &["CONFORME", "NAO_CONFORME"]),
            checklist(2, "CANCELADO", &["NAO_CONFORME", "NAO_CONFORME"])
        ])))
        .expect(1)
        .mount(&app.backend)
        .await;

    let cookie = session_cookie(&["nr12"]);
    let response = app
        .get("/api/nr12/checklists/conformidade?equipamento=14", Some(&cookie))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["totalRespostas"], 2);
    assert_eq!(rate(&body), 50.0);
}

#[tokio::test]
async fn cancel_checklist_sends_reason() {
    let app = TestApp::new().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/checklists/5/cancelar/"))
        .and(body_json(json!({ "motivo": "Equipamento em manutenção" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(checklist(5, "CANCELADO", &[])))
        .expect(1)
        .mount(&app.backend)
        .await;

    let cookie = session_cookie(&["nr12"]);
    let response = app
        .post(
            "/api/nr12/checklists/5/cancelar",
            Some(&cookie),
            Some(json!({ "motivo": "Equipamento em manutenção" })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["status"], "CANCELADO");
}

#[tokio::test]
async fn finishing_a_finished_checklist_surfaces_backend_message() {
    let app = TestApp::new().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/checklists/5/finalizar/"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({ "detail": "Checklist já finalizado." })))
        .mount(&app.backend)
        .await;

    let cookie = session_cookie(&["nr12"]);
    let response = app.post("/api/nr12/checklists/5/finalizar", Some(&cookie), None).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(response_json(response).await["error"], "Checklist já finalizado.");
}

#[tokio::test]
async fn maintenance_due_list_puts_overdue_first() {
    let app = TestApp::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/manutencoes/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "equipamento": 14, "modelo": 1,
              "ultima_execucao_horimetro": "1000", "horimetro_atual": "1100" },
            { "id": 2, "equipamento": 15, "modelo": 1,
              "ultima_execucao_horimetro": "1000", "horimetro_atual": "1300" }
        ])))
        .mount(&app.backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/modelos-manutencao/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "nome": "Revisão 250h", "intervalo_horas": "250" }
        ])))
        .mount(&app.backend)
        .await;

    let cookie = session_cookie(&["manutencao"]);
    let response = app.get("/api/manutencao/vencimentos", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body[0]["scheduleId"], 2);
    assert_eq!(body[0]["status"], "VENCIDA");
    assert_eq!(body[1]["status"], "EM_DIA");
}

#[tokio::test]
async fn due_list_survives_intervals_beyond_the_calendar() {
    let app = TestApp::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/manutencoes/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "equipamento": 14, "modelo": 1,
              "intervalo_dias": 9_000_000_000i64, "ultima_execucao_data": "2024-01-01" }
        ])))
        .mount(&app.backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/modelos-manutencao/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.backend)
        .await;

    let cookie = session_cookie(&["manutencao"]);
    let response = app.get("/api/manutencao/vencimentos", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body[0]["status"], "EM_DIA");
    assert!(body[0]["nextDueDate"].is_null());
}

#[tokio::test]
async fn fuel_consumption_per_equipment() {
    let app = TestApp::new().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/abastecimentos/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "equipamento": 14, "data": "2024-03-01", "litros": "100", "horimetro": "1000" },
            { "id": 2, "equipamento": 14, "data": "2024-03-05", "litros": "80", "horimetro": "1010" }
        ])))
        .mount(&app.backend)
        .await;

    let cookie = session_cookie(&["abastecimento"]);
    let response = app.get("/api/abastecimento/consumo", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let lph: f64 = body[0]["litrosPorHora"].as_str().unwrap().parse().unwrap();
    assert_eq!(lph, 8.0);
}

#[tokio::test]
async fn purchase_order_approval() {
    let app = TestApp::new().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/pedidos-compra/3/aprovar/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "status": "APROVADO",
            "itens": [{ "produto": 1, "quantidade": "2", "valor_unitario": "10.00" }]
        })))
        .expect(1)
        .mount(&app.backend)
        .await;

    let cookie = session_cookie(&["compras"]);
    let response = app.post("/api/compras/pedidos/3/aprovar", Some(&cookie), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["status"], "APROVADO");
}

pub mod auth;
pub mod cadastros;
pub mod checklists;
pub mod diamond_wire;
pub mod equipment;
pub mod finance;
pub mod fuel;
pub mod inventory;
pub mod maintenance;
pub mod navigation;
pub mod proxy;
pub mod purchasing;
pub mod scanner;

use axum::http::header;
use axum::response::IntoResponse;

/// Resposta de download de CSV (`attachment`).
pub(crate) fn download_csv(filename: &str, bytes: Vec<u8>) -> impl IntoResponse {
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
    ];
    (headers, bytes)
}

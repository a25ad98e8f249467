pub mod checklist_service;
pub mod diamond_wire_service;
pub mod document_service;
pub use document_service::DocumentService;
pub mod export_service;
pub mod finance_service;
pub mod fuel_service;
pub mod inventory_service;
pub mod maintenance_service;
pub mod navigation_service;

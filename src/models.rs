pub mod auth;
pub mod cadastros;
pub mod checklist;
pub mod diamond_wire;
pub mod equipment;
pub mod finance;
pub mod fuel;
pub mod inventory;
pub mod maintenance;
pub mod navigation;
pub mod purchasing;

// src/scanner/payload.rs

use uuid::Uuid;

use crate::models::equipment::Equipment;

const LEGACY_PREFIX: &str = "eq:";
const DASHBOARD_SEGMENT: &str = "/dashboard/equipamento/";
const UUID_LEN: usize = 36;

/// Conteúdo lido de uma etiqueta (câmera ou digitação manual).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanPayload {
    /// Formato antigo `eq:<identificador>`.
    LegacyId(String),
    /// URL com `/dashboard/equipamento/<uuid>`.
    EquipmentUuid(Uuid),
    /// Nenhum dos formatos; vai adiante sem alteração.
    Raw(String),
}

impl ScanPayload {
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();

        if let Some(id) = trimmed.strip_prefix(LEGACY_PREFIX) {
            let id = id.trim();
            if !id.is_empty() {
                return ScanPayload::LegacyId(id.to_string());
            }
        }

        if let Some(uuid) = find_dashboard_uuid(trimmed) {
            return ScanPayload::EquipmentUuid(uuid);
        }

        ScanPayload::Raw(text.to_string())
    }
}

fn find_dashboard_uuid(text: &str) -> Option<Uuid> {
    text.match_indices(DASHBOARD_SEGMENT).find_map(|(pos, _)| {
        let candidate = text.get(pos + DASHBOARD_SEGMENT.len()..)?.get(..UUID_LEN)?;
        if !is_hyphenated(candidate) {
            return None;
        }
        Uuid::parse_str(candidate).ok()
    })
}

// 8-4-4-4-12
fn is_hyphenated(candidate: &str) -> bool {
    candidate.bytes().enumerate().all(|(i, b)| match i {
        8 | 13 | 18 | 23 => b == b'-',
        _ => b.is_ascii_hexdigit(),
    })
}

/// Texto gravado na etiqueta QR do equipamento.
pub fn equipment_qr_text(equipment: &Equipment, public_base_url: &str) -> String {
    match equipment.uuid {
        Some(uuid) => format!(
            "{}{}{}",
            public_base_url.trim_end_matches('/'),
            DASHBOARD_SEGMENT,
            uuid.hyphenated()
        ),
        None => format!("{}{}", LEGACY_PREFIX, equipment.id),
    }
}

/// Página do equipamento no dashboard.
pub fn dashboard_path(equipment: &Equipment) -> String {
    match equipment.uuid {
        Some(uuid) => format!("{}{}", DASHBOARD_SEGMENT, uuid.hyphenated()),
        None => format!("/dashboard/equipamentos/{}", equipment.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_prefix_yields_identifier() {
        assert_eq!(ScanPayload::parse("eq:123"), ScanPayload::LegacyId("123".into()));
        assert_eq!(ScanPayload::parse("  eq:123\n"), ScanPayload::LegacyId("123".into()));
    }

    #[test]
    fn dashboard_url_yields_uuid() {
        let parsed = ScanPayload::parse(
            "https://host/dashboard/equipamento/3fa85f64-5717-4562-b3fc-2c963f66afa6",
        );
        assert_eq!(
            parsed,
            ScanPayload::EquipmentUuid(Uuid::parse_str("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap())
        );

        // Sufixos depois do UUID não atrapalham
        assert!(matches!(
            ScanPayload::parse("/dashboard/equipamento/3fa85f64-5717-4562-b3fc-2c963f66afa6?tab=nr12"),
            ScanPayload::EquipmentUuid(_)
        ));
    }

    #[test]
    fn anything_else_passes_through_unchanged() {
        for text in [
            "hello world",
            "eq:",
            "https://host/dashboard/equipamento/123",
            "https://host/dashboard/equipamento/3fa85f6457174562b3fc2c963f66afa6",
        ] {
            assert_eq!(ScanPayload::parse(text), ScanPayload::Raw(text.to_string()));
        }
    }

    #[test]
    fn qr_text_prefers_uuid_and_falls_back_to_legacy() {
        let with_uuid: Equipment = serde_json::from_value(json!({
            "id": 5, "descricao": "Escavadeira", "uuid": "3fa85f64-5717-4562-b3fc-2c963f66afa6"
        }))
        .unwrap();
        let text = equipment_qr_text(&with_uuid, "https://erp.example.com/");
        assert_eq!(
            text,
            "https://erp.example.com/dashboard/equipamento/3fa85f64-5717-4562-b3fc-2c963f66afa6"
        );
        assert_eq!(ScanPayload::parse(&text), ScanPayload::EquipmentUuid(with_uuid.uuid.unwrap()));

        let legacy: Equipment = serde_json::from_value(json!({ "id": 9, "descricao": "Rolo" })).unwrap();
        assert_eq!(equipment_qr_text(&legacy, "https://erp.example.com"), "eq:9");
        assert_eq!(dashboard_path(&legacy), "/dashboard/equipamentos/9");
    }
}

// src/scanner/camera.rs

use async_trait::async_trait;
use image::RgbaImage;
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

/// Falhas ao obter ou ler a câmera, pelo nome do erro do navegador.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("Permissão para usar a câmera negada")]
    PermissionDenied,

    #[error("Nenhuma câmera encontrada")]
    NotFound,

    #[error("Câmera em uso por outro aplicativo")]
    InUse,

    #[error("Falha na câmera: {0}")]
    Other(String),
}

impl CameraError {
    pub fn from_dom_name(name: &str) -> Self {
        match name {
            "NotAllowedError" | "PermissionDeniedError" | "SecurityError" => CameraError::PermissionDenied,
            "NotFoundError" | "DevicesNotFoundError" | "OverconstrainedError" => CameraError::NotFound,
            "NotReadableError" | "TrackStartError" | "AbortError" => CameraError::InUse,
            other => CameraError::Other(other.to_string()),
        }
    }

    /// Mensagem mostrada ao usuário, no idioma dele.
    pub fn user_message(&self, locale: &Locale, store: &I18nStore) -> String {
        store.get(&locale.0, self.message_key())
    }

    fn message_key(&self) -> &'static str {
        match self {
            CameraError::PermissionDenied => "camera_permission_denied",
            CameraError::NotFound => "camera_not_found",
            CameraError::InUse => "camera_in_use",
            CameraError::Other(_) => "camera_generic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingMode {
    User,
    Environment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraConstraints {
    pub facing: FacingMode,
    pub width: u32,
    pub height: u32,
}

impl Default for CameraConstraints {
    // Câmera traseira em 720p
    fn default() -> Self {
        Self {
            facing: FacingMode::Environment,
            width: 1280,
            height: 720,
        }
    }
}

#[async_trait]
pub trait Camera: Send + Sync {
    async fn acquire(&self, constraints: &CameraConstraints) -> Result<Box<dyn MediaStream>, CameraError>;
}

/// Stream aberto; segura o dispositivo até `stop()`.
#[async_trait]
pub trait MediaStream: Send {
    /// Já tem quadro disponível (vídeo com dados suficientes).
    fn is_ready(&self) -> bool;

    async fn capture_frame(&mut self) -> Result<Option<RgbaImage>, CameraError>;

    /// Para todas as trilhas. Chamar de novo não faz nada.
    fn stop(&mut self);

    fn active_tracks(&self) -> usize;
}

pub trait FrameDecoder: Send + Sync {
    fn decode(&self, frame: &RgbaImage) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_browser_error_names() {
        assert_eq!(CameraError::from_dom_name("NotAllowedError"), CameraError::PermissionDenied);
        assert_eq!(CameraError::from_dom_name("NotFoundError"), CameraError::NotFound);
        assert_eq!(CameraError::from_dom_name("NotReadableError"), CameraError::InUse);
        assert_eq!(
            CameraError::from_dom_name("WeirdError"),
            CameraError::Other("WeirdError".into())
        );
    }

    #[test]
    fn each_kind_has_its_own_message() {
        let store = I18nStore::new();
        let pt = Locale::default();
        let messages: Vec<String> = [
            CameraError::PermissionDenied,
            CameraError::NotFound,
            CameraError::InUse,
            CameraError::Other("AbortError?".into()),
        ]
        .iter()
        .map(|e| e.user_message(&pt, &store))
        .collect();

        for (i, a) in messages.iter().enumerate() {
            assert!(!a.starts_with("camera_"), "chave sem tradução: {}", a);
            for b in messages.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        assert_eq!(messages[1], "Nenhuma câmera encontrada neste dispositivo.");
    }

    #[test]
    fn camera_message_follows_the_locale() {
        let store = I18nStore::new();
        let en = Locale("en".into());
        assert_eq!(
            CameraError::PermissionDenied.user_message(&en, &store),
            "Camera permission denied. Allow access in your browser settings."
        );
    }
}

// src/common/i18n.rs

use std::collections::HashMap;

/// Idioma usado quando o cliente não informa nenhum que a gente conheça.
pub const DEFAULT_LANG: &str = "pt";

// (chave, português, inglês)
const MESSAGES: &[(&str, &str, &str)] = &[
    ("validation", "Um ou mais campos são inválidos.", "One or more fields are invalid."),
    ("invalid_token", "Sessão inválida ou expirada. Faça login novamente.", "Invalid or expired session. Please sign in again."),
    ("unauthorized", "Usuário não autenticado.", "User is not authenticated."),
    ("forbidden_module", "Você não tem acesso ao módulo '{module}'.", "You do not have access to the '{module}' module."),
    ("not_found", "{resource} não encontrado(a).", "{resource} not found."),
    ("backend_unavailable", "Não foi possível conectar ao servidor. Tente novamente.", "Could not reach the server. Please try again."),
    ("invalid_payload", "Resposta inesperada do servidor.", "Unexpected response from the server."),
    ("unrecognized_qr", "QR Code não reconhecido.", "QR code not recognized."),
    ("generic", "Ocorreu um erro inesperado.", "An unexpected error occurred."),
    ("camera_permission_denied", "Permissão para usar a câmera negada. Libere o acesso nas configurações do navegador.", "Camera permission denied. Allow access in your browser settings."),
    ("camera_not_found", "Nenhuma câmera encontrada neste dispositivo.", "No camera was found on this device."),
    ("camera_in_use", "A câmera já está sendo usada por outro aplicativo.", "The camera is already in use by another application."),
    ("camera_generic", "Não foi possível acessar a câmera.", "Could not access the camera."),
];

/// Catálogo de mensagens voltadas ao usuário, indexado por (idioma, chave).
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: HashMap<(String, String), String>,
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

impl I18nStore {
    pub fn new() -> Self {
        let mut messages = HashMap::new();
        for (key, pt, en) in MESSAGES {
            messages.insert(("pt".to_string(), key.to_string()), pt.to_string());
            messages.insert(("en".to_string(), key.to_string()), en.to_string());
        }
        Self { messages }
    }

    /// Busca a mensagem; idioma desconhecido cai no português, chave desconhecida volta a própria chave.
    pub fn get(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(&(lang.to_string(), key.to_string()))
            .or_else(|| self.messages.get(&(DEFAULT_LANG.to_string(), key.to_string())))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Igual ao `get`, substituindo `{nome}` pelos argumentos.
    pub fn format(&self, lang: &str, key: &str, args: &[(&str, &str)]) -> String {
        let mut message = self.get(lang, key);
        for (name, value) in args {
            message = message.replace(&format!("{{{}}}", name), value);
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_portuguese() {
        let store = I18nStore::new();
        assert_eq!(store.get("de", "generic"), "Ocorreu um erro inesperado.");
        assert_eq!(store.get("en", "generic"), "An unexpected error occurred.");
    }

    #[test]
    fn unknown_key_returns_the_key() {
        let store = I18nStore::new();
        assert_eq!(store.get("pt", "nao_existe"), "nao_existe");
    }

    #[test]
    fn format_replaces_placeholders() {
        let store = I18nStore::new();
        let msg = store.format("pt", "forbidden_module", &[("module", "financeiro")]);
        assert_eq!(msg, "Você não tem acesso ao módulo 'financeiro'.");
    }
}

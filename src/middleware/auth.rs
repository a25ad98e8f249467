// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::i18n::Locale,
};

pub const ACCESS_COOKIE: &str = "access";
pub const REFRESH_COOKIE: &str = "refresh";

/// O que o gateway lê do payload do JWT. A assinatura é verificada pelo backend.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionClaims {
    #[serde(default)]
    pub user_id: Option<i64>,
    pub exp: i64,
    #[serde(default, alias = "modules")]
    pub modulos: Vec<String>,
    #[serde(default)]
    pub is_superuser: bool,
}

impl SessionClaims {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }

    pub fn has_module(&self, slug: &str) -> bool {
        self.is_superuser || self.modulos.iter().any(|m| m == slug)
    }
}

/// Identidade do chamador, passada explicitamente a cada chamada do backend.
#[derive(Debug, Clone)]
pub struct Session {
    pub access: String,
    pub refresh: Option<String>,
    pub claims: SessionClaims,
}

impl Session {
    pub fn new(access: String, refresh: Option<String>) -> Result<Self, AppError> {
        let claims = read_claims(&access)?;
        Ok(Self { access, refresh, claims })
    }

    /// Lê os cookies `access`/`refresh`; sem cookie, aceita `Authorization: Bearer`.
    /// Sem credencial nenhuma é `Unauthorized`; credencial ilegível é `InvalidToken`.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AppError> {
        let jar = CookieJar::from_headers(headers);
        let refresh = jar.get(REFRESH_COOKIE).map(|c| c.value().to_string());

        let access = jar
            .get(ACCESS_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
            .or_else(|| {
                headers
                    .get(header::AUTHORIZATION)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.strip_prefix("Bearer "))
                    .map(|token| token.trim().to_string())
            })
            .ok_or(AppError::Unauthorized)?;

        Self::new(access, refresh)
    }
}

/// Decodifica o payload do JWT sem verificar a assinatura.
pub fn read_claims(token: &str) -> Result<SessionClaims, AppError> {
    // Só aceita algo com cabeçalho JWT válido
    jsonwebtoken::decode_header(token).map_err(|_| AppError::InvalidToken)?;

    let payload = token.split('.').nth(1).ok_or(AppError::InvalidToken)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| AppError::InvalidToken)?;

    serde_json::from_slice(&bytes).map_err(|_| AppError::InvalidToken)
}

// --- Cookies ---

pub fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Sempre emite o `Set-Cookie` de remoção, mesmo que o navegador não tenha mandado o cookie.
pub fn clear_session_cookies(jar: CookieJar, secure: bool) -> CookieJar {
    let mut access = session_cookie(ACCESS_COOKIE, String::new(), secure);
    access.make_removal();
    let mut refresh = session_cookie(REFRESH_COOKIE, String::new(), secure);
    refresh.make_removal();
    jar.add(access).add(refresh)
}

// ---
// Middleware: exige sessão e renova o access token expirado
// ---
pub async fn session_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let secure = app_state.settings.cookie_secure;

    let session = match Session::from_headers(request.headers()) {
        Ok(session) => session,
        Err(e) => return e.to_api_error(&locale, &app_state.i18n_store).into_response(),
    };

    if !session.claims.is_expired(Utc::now()) {
        request.extensions_mut().insert(session);
        return next.run(request).await;
    }

    let Some(refresh_token) = session.refresh.clone() else {
        let body = AppError::InvalidToken.to_api_error(&locale, &app_state.i18n_store);
        return (clear_session_cookies(jar, secure), body).into_response();
    };

    let renewed = match app_state.backend.refresh(&refresh_token).await {
        Ok(pair) => Session::new(pair.access, pair.refresh.or(Some(refresh_token))),
        Err(e) => Err(e),
    };

    match renewed {
        Ok(session) => {
            tracing::debug!(user_id = ?session.claims.user_id, "Access token renovado");
            let mut jar = jar.add(session_cookie(ACCESS_COOKIE, session.access.clone(), secure));
            if let Some(refresh) = &session.refresh {
                jar = jar.add(session_cookie(REFRESH_COOKIE, refresh.clone(), secure));
            }
            request.extensions_mut().insert(session);
            let response = next.run(request).await;
            (jar, response).into_response()
        }
        Err(e) => {
            tracing::warn!("Falha ao renovar sessão: {}", e);
            let body = AppError::InvalidToken.to_api_error(&locale, &app_state.i18n_store);
            (clear_session_cookies(jar, secure), body).into_response()
        }
    }
}

// Extrator para obter a sessão diretamente nos handlers
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // O guard já validou (e talvez renovou); sem guard, lê direto dos cabeçalhos
        if let Some(session) = parts.extensions.get::<Session>() {
            return Ok(session.clone());
        }
        Session::from_headers(&parts.headers)
    }
}


#[cfg(test)]
mod tests {
    use super::test_tokens::token;
    use super::*;
    use axum::http::HeaderValue;

    fn future() -> i64 {
        Utc::now().timestamp() + 3600
    }

    #[test]
    fn reads_claims_without_verifying_signature() {
        let claims = read_claims(&token(future(), &["financeiro"], false)).unwrap();
        assert_eq!(claims.user_id, Some(7));
        assert!(claims.has_module("financeiro"));
        assert!(!claims.has_module("nr12"));
    }

    #[test]
    fn garbage_token_is_invalid() {
        assert!(matches!(read_claims("abc.def.ghi"), Err(AppError::InvalidToken)));
        assert!(matches!(read_claims(""), Err(AppError::InvalidToken)));
    }

    #[test]
    fn superuser_sees_every_module() {
        let claims = read_claims(&token(future(), &[], true)).unwrap();
        assert!(claims.has_module("compras"));
    }

    #[test]
    fn session_prefers_cookie_over_bearer_header() {
        let cookie_token = token(future(), &["nr12"], false);
        let header_token = token(future(), &["financeiro"], false);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("access={}; refresh=r1", cookie_token)).unwrap(),
        );
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", header_token)).unwrap(),
        );

        let session = Session::from_headers(&headers).unwrap();
        assert_eq!(session.access, cookie_token);
        assert_eq!(session.refresh.as_deref(), Some("r1"));
    }

    #[test]
    fn missing_credentials_is_unauthenticated() {
        assert!(matches!(Session::from_headers(&HeaderMap::new()), Err(AppError::Unauthorized)));

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("access=nao-e-jwt"));
        assert!(matches!(Session::from_headers(&headers), Err(AppError::InvalidToken)));
    }

    #[test]
    fn removal_cookies_expire_immediately() {
        let jar = clear_session_cookies(CookieJar::new(), false);
        let access = jar.get(ACCESS_COOKIE).unwrap();
        assert_eq!(access.value(), "");
        assert_eq!(access.max_age().map(|d| d.whole_seconds()), Some(0));
    }
}

// src/handlers/auth.rs

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::{clear_session_cookies, session_cookie, Session, ACCESS_COOKIE, REFRESH_COOKIE},
        i18n::Locale,
    },
    models::auth::{LoginUserPayload, LogoutResponse, Me},
};

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Login realizado; cookies de sessão definidos", body = Me),
        (status = 400, description = "Dados inválidos"),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    jar: CookieJar,
    Json(payload): Json<LoginUserPayload>,
) -> Result<(CookieJar, Json<Me>), ApiError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let tokens = app_state.backend
        .login(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let session = Session::new(tokens.access, tokens.refresh)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let me = app_state.backend
        .me(&session)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let secure = app_state.settings.cookie_secure;
    let mut jar = jar.add(session_cookie(ACCESS_COOKIE, session.access.clone(), secure));
    if let Some(refresh) = session.refresh {
        jar = jar.add(session_cookie(REFRESH_COOKIE, refresh, secure));
    }

    tracing::info!(user_id = me.id, username = %me.username, "Login realizado");
    Ok((jar, Json(me)))
}

// POST /api/auth/logout
// Os cookies saem em qualquer caso; falha do backend só vai para o log.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Sessão encerrada", body = LogoutResponse),
        (status = 500, description = "Falha interna (cookies removidos mesmo assim)")
    )
)]
pub async fn logout(
    State(app_state): State<AppState>,
    locale: Locale,
    headers: HeaderMap,
    jar: CookieJar,
) -> Response {
    let jar = clear_session_cookies(jar, app_state.settings.cookie_secure);

    let result = match Session::from_headers(&headers) {
        Ok(session) => app_state.backend.logout(&session).await,
        // Sem sessão válida não há o que invalidar no backend
        Err(_) => Ok(()),
    };

    match result {
        Ok(()) => (jar, Json(LogoutResponse { success: true })).into_response(),
        Err(e @ (AppError::Backend { .. } | AppError::BackendUnavailable(_) | AppError::InvalidPayload(_))) => {
            tracing::warn!("Logout no backend falhou: {}", e);
            (jar, Json(LogoutResponse { success: true })).into_response()
        }
        Err(e) => {
            let mut body = e.to_api_error(&locale, &app_state.i18n_store);
            body.status = StatusCode::INTERNAL_SERVER_ERROR;
            (jar, body).into_response()
        }
    }
}

// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Usuário logado", body = Me),
        (status = 401, description = "Sessão inválida")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
) -> Result<Json<Me>, ApiError> {
    let me = app_state.backend
        .me(&session)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(me))
}

// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    extract::CookieJar,
    headers::{authorization::Bearer, Authorization, HeaderMapExt},
};

use crate::{common::error::AppError, config::AppState, models::auth::User};

// Nome do cookie que guarda o JWT da sessão
pub const SESSION_COOKIE: &str = "portal_session";

// O token pode vir do cookie (navegador) ou do cabeçalho Authorization (clientes de API).
// Ordem de tentativa: cookie primeiro, depois o cabeçalho.
fn session_tokens(jar: &CookieJar, request: &Request) -> Vec<String> {
    let cookie = jar.get(SESSION_COOKIE).map(|cookie| cookie.value().to_owned());
    let bearer = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_owned());

    cookie.into_iter().chain(bearer).collect()
}

// O middleware em si: sem sessão válida, volta para o login
pub async fn auth_guard(
    State(app_state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let mut outcome = Err(AppError::Unauthenticated);

    // Cookie vencido não pode esconder um Bearer válido
    for token in session_tokens(&jar, &request) {
        outcome = app_state.auth_service.validate_token(&token).await;
        if outcome.is_ok() {
            break;
        }
    }
    let user = outcome?;

    // Insere o usuário nos "extensions" da requisição
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header};

    fn request_with(headers: &[(header::HeaderName, &str)]) -> (CookieJar, Request) {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(name.clone(), *value);
        }
        let request = builder.body(Body::empty()).unwrap();
        (CookieJar::from_headers(request.headers()), request)
    }

    #[test]
    fn cookie_comes_before_bearer() {
        let (jar, request) = request_with(&[
            (header::COOKIE, "portal_session=do-cookie"),
            (header::AUTHORIZATION, "Bearer do-cabecalho"),
        ]);
        assert_eq!(session_tokens(&jar, &request), ["do-cookie", "do-cabecalho"]);
    }

    #[test]
    fn no_credentials_means_no_candidates() {
        let (jar, request) = request_with(&[(header::COOKIE, "outro=1")]);
        assert!(session_tokens(&jar, &request).is_empty());
    }
}

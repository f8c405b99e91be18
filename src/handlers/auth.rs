// src/handlers/auth.rs

use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    Form, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AuthenticatedUser, SESSION_COOKIE},
    models::auth::{LoginForm, LoginPayload, User},
    routes::{DASHBOARD_PATH, LOGIN_PATH},
};

// GET /login
#[utoipa::path(
    get,
    path = "/login",
    tag = "Auth",
    responses(
        (status = 200, description = "Campos esperados pelo formulário de login", body = LoginForm)
    )
)]
pub async fn login_page() -> Json<LoginForm> {
    Json(LoginForm {
        action: LOGIN_PATH.to_string(),
        method: "POST".to_string(),
        fields: vec!["username".to_string(), "password".to_string()],
    })
}

// POST /login
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body(content = LoginPayload, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Sessão criada, redireciona para o painel"),
        (status = 400, description = "Formulário inválido"),
        (status = 401, description = "Usuário ou senha inválidos")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Form(payload): Form<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let token = app_state
        .auth_service
        .login_user(payload.username.trim(), &payload.password)
        .await?;

    // Sem max_age: quem expira a sessão é o "exp" do JWT
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), Redirect::to(DASHBOARD_PATH)))
}

// POST /logout
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    responses((status = 303, description = "Sessão encerrada, redireciona para o login"))
)]
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        Redirect::to(LOGIN_PATH),
    )
}

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    responses((status = 200, description = "Usuário da sessão", body = User))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}

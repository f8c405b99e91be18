// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{normalize_path::NormalizePath, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

// Destinos dos redirects
pub const DASHBOARD_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

// Rotas aceitam barra final ("/requests/installations/" == "/requests/installations")
pub type PortalApp = NormalizePath<Router>;

pub fn build_router(app_state: AppState) -> PortalApp {
    // Rotas públicas
    let public_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            LOGIN_PATH,
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }));

    // Todo o resto exige sessão
    let portal_routes = Router::new()
        .route(DASHBOARD_PATH, get(handlers::dashboard::get_dashboard))
        .route("/me", get(handlers::auth::get_me))
        .route("/logout", post(handlers::auth::logout))
        .route(
            "/requests/installations",
            get(handlers::requests::list_installation_requests),
        )
        .route(
            "/requests/deliveries",
            get(handlers::requests::list_delivery_requests),
        )
        .route(
            "/requests/installations/free",
            get(handlers::requests::list_free_installation_requests),
        )
        .route(
            "/requests/deliveries/free",
            get(handlers::requests::list_free_delivery_requests),
        )
        .route(
            "/requests/installations/{id}/claim",
            post(handlers::requests::claim_installation),
        )
        .route(
            "/requests/deliveries/{id}/claim",
            post(handlers::requests::claim_delivery),
        )
        .route("/section/{section}", get(handlers::dashboard::get_section))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let router = Router::new()
        .merge(public_routes)
        .merge(portal_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // A normalização precisa rodar antes do roteamento
    NormalizePath::trim_trailing_slash(router)
}

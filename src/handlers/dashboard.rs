// src/handlers/dashboard.rs

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{dashboard::DashboardView, sections::SectionReport},
};

// GET /
#[utoipa::path(
    get,
    path = "/",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Painel do papel do usuário", body = DashboardView),
        (status = 303, description = "Sem sessão: redireciona para o login")
    )
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let view = app_state.dashboard_service.build(&user, Utc::now()).await?;
    Ok(Json(view))
}

// GET /section/{section}
#[utoipa::path(
    get,
    path = "/section/{section}",
    tag = "Dashboard",
    params(("section" = String, Path, description = "leads, managers, sales, site, production ou finance")),
    responses(
        (status = 200, description = "Pacote fixo de métricas da seção", body = SectionReport),
        (status = 303, description = "Seção desconhecida ou não permitida: redireciona para o painel")
    )
)]
pub async fn get_section(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(section): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state.section_catalog.lookup(&user, &section)?;
    Ok(Json(report.clone()))
}

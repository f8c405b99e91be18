// src/handlers/requests.rs

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::requests::{ListFilter, RequestKind, ServiceRequest},
};

// =============================================================================
//  LISTAGENS POR PAPEL
// =============================================================================

async fn list_requests(
    app_state: &AppState,
    user: &AuthenticatedUser,
    kind: RequestKind,
    filter: ListFilter,
) -> Result<Json<Vec<ServiceRequest>>, AppError> {
    let requests = app_state.request_service.list_visible(&user.0, kind, filter).await?;
    Ok(Json(requests))
}

async fn list_free_requests(
    app_state: &AppState,
    user: &AuthenticatedUser,
    kind: RequestKind,
    filter: ListFilter,
) -> Result<Json<Vec<ServiceRequest>>, AppError> {
    let requests = app_state.request_service.list_free(&user.0, kind, filter).await?;
    Ok(Json(requests))
}

// Sucesso volta para a listagem do tipo
async fn claim_request(
    app_state: &AppState,
    user: &AuthenticatedUser,
    kind: RequestKind,
    id: i64,
) -> Result<Redirect, AppError> {
    app_state.request_service.claim(&user.0, kind, id).await?;
    Ok(Redirect::to(kind.list_path()))
}

// GET /requests/installations
#[utoipa::path(
    get,
    path = "/requests/installations",
    tag = "Requests",
    params(ListFilter),
    responses(
        (status = 200, description = "Pedidos de instalação visíveis ao papel", body = Vec<ServiceRequest>),
        (status = 303, description = "Papel sem acesso: redireciona para o painel")
    )
)]
pub async fn list_installation_requests(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(filter): Query<ListFilter>,
) -> Result<impl IntoResponse, AppError> {
    list_requests(&app_state, &user, RequestKind::Installation, filter).await
}

// GET /requests/deliveries
#[utoipa::path(
    get,
    path = "/requests/deliveries",
    tag = "Requests",
    params(ListFilter),
    responses(
        (status = 200, description = "Pedidos de entrega visíveis ao papel", body = Vec<ServiceRequest>),
        (status = 303, description = "Papel sem acesso: redireciona para o painel")
    )
)]
pub async fn list_delivery_requests(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(filter): Query<ListFilter>,
) -> Result<impl IntoResponse, AppError> {
    list_requests(&app_state, &user, RequestKind::Delivery, filter).await
}

// =============================================================================
//  PEDIDOS LIVRES
// =============================================================================

// GET /requests/installations/free
#[utoipa::path(
    get,
    path = "/requests/installations/free",
    tag = "Requests",
    params(ListFilter),
    responses(
        (status = 200, description = "Pedidos de instalação sem instalador", body = Vec<ServiceRequest>),
        (status = 303, description = "Papel sem acesso: redireciona para o painel")
    )
)]
pub async fn list_free_installation_requests(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(filter): Query<ListFilter>,
) -> Result<impl IntoResponse, AppError> {
    list_free_requests(&app_state, &user, RequestKind::Installation, filter).await
}

// GET /requests/deliveries/free
#[utoipa::path(
    get,
    path = "/requests/deliveries/free",
    tag = "Requests",
    params(ListFilter),
    responses(
        (status = 200, description = "Pedidos de entrega sem entregador", body = Vec<ServiceRequest>),
        (status = 303, description = "Papel sem acesso: redireciona para o painel")
    )
)]
pub async fn list_free_delivery_requests(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(filter): Query<ListFilter>,
) -> Result<impl IntoResponse, AppError> {
    list_free_requests(&app_state, &user, RequestKind::Delivery, filter).await
}

// =============================================================================
//  ATRIBUIÇÃO
// =============================================================================

// POST /requests/installations/{id}/claim
#[utoipa::path(
    post,
    path = "/requests/installations/{id}/claim",
    tag = "Requests",
    params(("id" = i64, Path, description = "ID do pedido de instalação")),
    responses(
        (status = 303, description = "Atribuído; redireciona para a listagem (ou para os livres, se o papel não puder assumir)"),
        (status = 404, description = "Pedido inexistente ou já atribuído")
    )
)]
pub async fn claim_installation(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    claim_request(&app_state, &user, RequestKind::Installation, id).await
}

// POST /requests/deliveries/{id}/claim
#[utoipa::path(
    post,
    path = "/requests/deliveries/{id}/claim",
    tag = "Requests",
    params(("id" = i64, Path, description = "ID do pedido de entrega")),
    responses(
        (status = 303, description = "Atribuído; redireciona para a listagem (ou para os livres, se o papel não puder assumir)"),
        (status = 404, description = "Pedido inexistente ou já atribuído")
    )
)]
pub async fn claim_delivery(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    claim_request(&app_state, &user, RequestKind::Delivery, id).await
}

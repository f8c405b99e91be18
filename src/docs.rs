// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login_page,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::get_me,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard,
        handlers::dashboard::get_section,

        // --- Requests ---
        handlers::requests::list_installation_requests,
        handlers::requests::list_delivery_requests,
        handlers::requests::list_free_installation_requests,
        handlers::requests::list_free_delivery_requests,
        handlers::requests::claim_installation,
        handlers::requests::claim_delivery,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::LoginPayload,
            models::auth::LoginForm,

            // --- Requests ---
            models::requests::RequestKind,
            models::requests::ServiceRequest,

            // --- Dashboard ---
            models::dashboard::DashboardView,
            models::sections::SectionKey,
            models::sections::SectionReport,
            models::sections::Kpi,
            models::sections::Insight,
            models::sections::ListItem,
        )
    ),
    tags(
        (name = "Auth", description = "Sessão do portal"),
        (name = "Dashboard", description = "Painel e seções de relatório"),
        (name = "Requests", description = "Pedidos de instalação e entrega")
    )
)]
pub struct ApiDoc;

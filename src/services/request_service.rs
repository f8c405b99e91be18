// src/services/request_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::RequestRepository,
    models::{
        auth::{Role, User},
        requests::{ListFilter, RequestKind, RequestQuery, RequestScope, ServiceRequest},
    },
    routes::DASHBOARD_PATH,
};

#[derive(Clone)]
pub struct RequestService {
    repo: Arc<dyn RequestRepository>,
}

/// Recorte que o papel enxerga na listagem do tipo. `None` = sem acesso.
pub fn listing_scope(user: &User, kind: RequestKind) -> Option<RequestScope> {
    match user.role {
        Role::Manager => Some(RequestScope::ManagedBy(user.id)),
        role if role == kind.assignee_role() => Some(RequestScope::AssignedTo(user.id)),
        Role::Owner => Some(RequestScope::All),
        _ => None,
    }
}

impl RequestService {
    pub fn new(repo: Arc<dyn RequestRepository>) -> Self {
        Self { repo }
    }

    // --- LISTAGENS ---

    pub async fn list_visible(
        &self,
        user: &User,
        kind: RequestKind,
        filter: ListFilter,
    ) -> Result<Vec<ServiceRequest>, AppError> {
        let Some(scope) = listing_scope(user, kind) else {
            tracing::debug!(user_id = %user.id, role = %user.role, ?kind, "Listagem negada");
            return Err(AppError::AccessDenied(DASHBOARD_PATH));
        };

        let query = RequestQuery::scoped(scope).with_filter(filter);
        self.repo.find(kind, &query).await
    }

    pub async fn list_free(
        &self,
        user: &User,
        kind: RequestKind,
        filter: ListFilter,
    ) -> Result<Vec<ServiceRequest>, AppError> {
        if !user.role.can_view_free(kind) {
            tracing::debug!(user_id = %user.id, role = %user.role, ?kind, "Lista de livres negada");
            return Err(AppError::AccessDenied(DASHBOARD_PATH));
        }

        let query = RequestQuery::scoped(RequestScope::Unassigned).with_filter(filter);
        self.repo.find(kind, &query).await
    }

    // --- ATRIBUIÇÃO ---

    /// Atribui o pedido livre a quem chamou. Pedido inexistente ou já atribuído
    /// resulta em `RequestNotFound`, sem nenhuma alteração.
    pub async fn claim(&self, user: &User, kind: RequestKind, id: i64) -> Result<ServiceRequest, AppError> {
        if !user.role.can_claim(kind) {
            tracing::debug!(user_id = %user.id, role = %user.role, ?kind, id, "Atribuição negada");
            return Err(AppError::AccessDenied(kind.free_list_path()));
        }

        match self.repo.claim(kind, id, user.id).await? {
            Some(request) => {
                tracing::info!(user_id = %user.id, ?kind, id, "Pedido atribuído");
                Ok(request)
            }
            None => {
                let existing = self.repo.find_by_id(kind, id).await?;
                tracing::warn!(
                    user_id = %user.id,
                    ?kind,
                    id,
                    exists = existing.is_some(),
                    "Pedido inexistente ou já atribuído"
                );
                Err(AppError::RequestNotFound)
            }
        }
    }
}

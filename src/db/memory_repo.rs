// src/db/memory_repo.rs

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{RequestRepository, UserRepository},
    models::{
        auth::{Role, User},
        requests::{NewServiceRequest, RequestKind, RequestQuery, ServiceRequest},
    },
};

/// Store em processo com as mesmas regras do Postgres.
/// Só existe nos testes (feature `test-support`).
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    installations: BTreeMap<i64, ServiceRequest>,
    deliveries: BTreeMap<i64, ServiceRequest>,
    last_id: i64,
}

impl Inner {
    fn table(&self, kind: RequestKind) -> &BTreeMap<i64, ServiceRequest> {
        match kind {
            RequestKind::Installation => &self.installations,
            RequestKind::Delivery => &self.deliveries,
        }
    }

    fn table_mut(&mut self, kind: RequestKind) -> &mut BTreeMap<i64, ServiceRequest> {
        match kind {
            RequestKind::Installation => &mut self.installations,
            RequestKind::Delivery => &mut self.deliveries,
        }
    }

    fn role_of(&self, id: Uuid) -> Option<Role> {
        self.users.get(&id).map(|u| u.role)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cadastra um pedido livre, com o status pendente do tipo.
    pub async fn insert_request(
        &self,
        kind: RequestKind,
        new: NewServiceRequest,
    ) -> Result<ServiceRequest, AppError> {
        let mut inner = self.inner.write().await;

        if let Some(manager_id) = new.manager_id {
            if inner.role_of(manager_id) != Some(Role::Manager) {
                return Err(AppError::InvalidReference(format!(
                    "o usuário {manager_id} não é gerente"
                )));
            }
        }

        inner.last_id += 1;
        let request = ServiceRequest {
            id: inner.last_id,
            kind,
            client_name: new.client_name,
            phone: new.phone,
            address: new.address,
            scheduled_for: new.scheduled_for,
            created_at: Utc::now(),
            manager_id: new.manager_id,
            assignee_id: None,
            status: kind.pending_status().to_owned(),
        };
        inner.table_mut(kind).insert(request.id, request.clone());

        Ok(request)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn create_user(&self, username: &str, password_hash: &str, role: Role) -> Result<User, AppError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.username == username) {
            return Err(AppError::UsernameAlreadyExists);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_owned(),
            password_hash: password_hash.to_owned(),
            role,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl RequestRepository for MemoryStore {
    async fn find(&self, kind: RequestKind, query: &RequestQuery) -> Result<Vec<ServiceRequest>, AppError> {
        let inner = self.inner.read().await;
        let mut rows: Vec<ServiceRequest> = inner
            .table(kind)
            .values()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();

        rows.sort_by(|a, b| a.scheduled_for.cmp(&b.scheduled_for).then(a.id.cmp(&b.id)));
        if let Some(limit) = query.limit {
            rows.truncate(limit.max(0) as usize);
        }
        Ok(rows)
    }

    async fn find_by_id(&self, kind: RequestKind, id: i64) -> Result<Option<ServiceRequest>, AppError> {
        Ok(self.inner.read().await.table(kind).get(&id).cloned())
    }

    async fn claim(&self, kind: RequestKind, id: i64, assignee: Uuid) -> Result<Option<ServiceRequest>, AppError> {
        // Leitura e escrita sob o mesmo lock de escrita
        let mut inner = self.inner.write().await;
        if inner.role_of(assignee) != Some(kind.assignee_role()) {
            return Ok(None);
        }

        match inner.table_mut(kind).get_mut(&id) {
            Some(request) if request.is_free() => {
                request.assignee_id = Some(assignee);
                request.status = kind.assigned_status().to_owned();
                Ok(Some(request.clone()))
            }
            _ => Ok(None),
        }
    }
}

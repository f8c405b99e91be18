// src/models/requests.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::auth::Role;

// --- Enums ---

/// Tipo de pedido. Os dois tipos compartilham o mesmo formato de registro;
/// o tipo define tabela, coluna do responsável, papel exigido e os status fixos.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    #[default]
    Installation,
    Delivery,
}

impl RequestKind {
    pub fn table(&self) -> &'static str {
        match self {
            RequestKind::Installation => "installation_requests",
            RequestKind::Delivery => "delivery_requests",
        }
    }

    pub fn assignee_column(&self) -> &'static str {
        match self {
            RequestKind::Installation => "installer_id",
            RequestKind::Delivery => "courier_id",
        }
    }

    pub fn assignee_role(&self) -> Role {
        match self {
            RequestKind::Installation => Role::Installer,
            RequestKind::Delivery => Role::Delivery,
        }
    }

    pub fn pending_status(&self) -> &'static str {
        match self {
            RequestKind::Installation => "В ожидании установки",
            RequestKind::Delivery => "В ожидании доставки",
        }
    }

    pub fn assigned_status(&self) -> &'static str {
        match self {
            RequestKind::Installation => "Назначен установщик",
            RequestKind::Delivery => "Назначен доставщик",
        }
    }

    // Rotas de destino dos redirects
    pub fn list_path(&self) -> &'static str {
        match self {
            RequestKind::Installation => "/requests/installations",
            RequestKind::Delivery => "/requests/deliveries",
        }
    }

    pub fn free_list_path(&self) -> &'static str {
        match self {
            RequestKind::Installation => "/requests/installations/free",
            RequestKind::Delivery => "/requests/deliveries/free",
        }
    }
}

// --- Registro ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    #[schema(example = 7)]
    pub id: i64,
    // Não é coluna: vem da tabela consultada
    #[sqlx(skip)]
    pub kind: RequestKind,
    #[schema(example = "Ирина Власова")]
    pub client_name: String,
    #[schema(example = "+7 912 000-00-00")]
    pub phone: String,
    #[schema(example = "ул. Ленина, 12, кв. 4")]
    pub address: String,
    pub scheduled_for: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub manager_id: Option<Uuid>,
    /// Instalador ou entregador responsável. `None` = pedido livre.
    pub assignee_id: Option<Uuid>,
    #[schema(example = "В ожидании установки")]
    pub status: String,
}

impl ServiceRequest {
    pub fn is_free(&self) -> bool {
        self.assignee_id.is_none()
    }

    pub(crate) fn with_kind(mut self, kind: RequestKind) -> Self {
        self.kind = kind;
        self
    }
}

// Dados para cadastrar um pedido (usado pelo store em memória; na produção os pedidos chegam de fora)
#[derive(Debug, Clone)]
pub struct NewServiceRequest {
    pub client_name: String,
    pub phone: String,
    pub address: String,
    pub scheduled_for: DateTime<Utc>,
    pub manager_id: Option<Uuid>,
}

// --- Consultas ---

/// Recorte de visibilidade de uma listagem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestScope {
    All,
    ManagedBy(Uuid),
    AssignedTo(Uuid),
    Unassigned,
}

/// Filtros opcionais da query string (busca e status).
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListFilter {
    /// Busca por nome do cliente, telefone ou endereço.
    pub q: Option<String>,
    /// Status exato.
    pub status: Option<String>,
}

impl ListFilter {
    // Strings vazias vindas do formulário contam como ausentes
    pub fn search(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct RequestQuery {
    pub scope: RequestScope,
    pub filter: ListFilter,
    pub scheduled_from: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

impl RequestQuery {
    pub fn scoped(scope: RequestScope) -> Self {
        Self {
            scope,
            filter: ListFilter::default(),
            scheduled_from: None,
            limit: None,
        }
    }

    pub fn with_filter(mut self, filter: ListFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn upcoming(mut self, from: DateTime<Utc>, limit: i64) -> Self {
        self.scheduled_from = Some(from);
        self.limit = Some(limit);
        self
    }

    /// Aplica o recorte e os filtros a um registro já carregado.
    pub fn matches(&self, request: &ServiceRequest) -> bool {
        let in_scope = match self.scope {
            RequestScope::All => true,
            RequestScope::ManagedBy(id) => request.manager_id == Some(id),
            RequestScope::AssignedTo(id) => request.assignee_id == Some(id),
            RequestScope::Unassigned => request.assignee_id.is_none(),
        };
        if !in_scope {
            return false;
        }

        if let Some(from) = self.scheduled_from {
            if request.scheduled_for < from {
                return false;
            }
        }

        if let Some(status) = self.filter.status() {
            if request.status != status {
                return false;
            }
        }

        match self.filter.search() {
            Some(term) => {
                let term = term.to_lowercase();
                [&request.client_name, &request.phone, &request.address]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
            }
            None => true,
        }
    }
}

// src/db/request_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::requests::{RequestKind, RequestQuery, RequestScope, ServiceRequest},
};

/// Acesso às tabelas de pedidos. Um único contrato para os dois tipos:
/// o `RequestKind` escolhe a tabela e a coluna do responsável.
#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Lista os pedidos do tipo que atendem à consulta, por `scheduled_for` crescente.
    async fn find(&self, kind: RequestKind, query: &RequestQuery) -> Result<Vec<ServiceRequest>, AppError>;

    async fn find_by_id(&self, kind: RequestKind, id: i64) -> Result<Option<ServiceRequest>, AppError>;

    /// Atribui `assignee` ao pedido somente se ele ainda estiver livre.
    /// Comparação e escrita acontecem na mesma operação atômica; `None` quando
    /// o pedido não existe, já tem responsável ou o usuário não tem o papel do tipo.
    async fn claim(&self, kind: RequestKind, id: i64, assignee: Uuid) -> Result<Option<ServiceRequest>, AppError>;
}

#[derive(Clone)]
pub struct PgRequestRepository {
    pool: PgPool,
}

impl PgRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Colunas comuns; o responsável sai sempre como "assignee_id"
fn returning_columns(kind: RequestKind) -> String {
    format!(
        "id, client_name, phone, address, scheduled_for, created_at, manager_id, {} AS assignee_id, status",
        kind.assignee_column()
    )
}

// Escapa os curingas do LIKE (o escape padrão do Postgres é '\')
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn build_find_query(kind: RequestKind, query: &RequestQuery) -> QueryBuilder<'static, Postgres> {
    let column = kind.assignee_column();
    let mut qb = QueryBuilder::<Postgres>::new(format!(
        "SELECT {} FROM {} WHERE TRUE",
        returning_columns(kind),
        kind.table()
    ));

    match query.scope {
        RequestScope::All => {}
        RequestScope::ManagedBy(manager_id) => {
            qb.push(" AND manager_id = ").push_bind(manager_id);
        }
        RequestScope::AssignedTo(user_id) => {
            qb.push(format!(" AND {column} = ")).push_bind(user_id);
        }
        RequestScope::Unassigned => {
            qb.push(format!(" AND {column} IS NULL"));
        }
    }

    if let Some(from) = query.scheduled_from {
        qb.push(" AND scheduled_for >= ").push_bind(from);
    }

    if let Some(status) = query.filter.status() {
        qb.push(" AND status = ").push_bind(status.to_owned());
    }

    if let Some(term) = query.filter.search() {
        let pattern = like_pattern(term);
        qb.push(" AND (client_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR phone ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR address ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    qb.push(" ORDER BY scheduled_for ASC, id ASC");

    if let Some(limit) = query.limit {
        qb.push(" LIMIT ").push_bind(limit);
    }

    qb
}

// Compare-and-set em uma única instrução: o "IS NULL" é reavaliado
// depois do lock da linha, então só um UPDATE concorrente acha a linha livre.
// $1 = responsável, $2 = status atribuído, $3 = id do pedido, $4 = papel exigido.
fn build_claim_sql(kind: RequestKind) -> String {
    format!(
        "UPDATE {table} SET {column} = $1, status = $2 \
         WHERE id = $3 AND {column} IS NULL \
         AND EXISTS (SELECT 1 FROM users u WHERE u.id = $1 AND u.role = $4) \
         RETURNING {returning}",
        table = kind.table(),
        column = kind.assignee_column(),
        returning = returning_columns(kind),
    )
}

#[async_trait]
impl RequestRepository for PgRequestRepository {
    async fn find(&self, kind: RequestKind, query: &RequestQuery) -> Result<Vec<ServiceRequest>, AppError> {
        let mut qb = build_find_query(kind, query);
        let rows = qb
            .build_query_as::<ServiceRequest>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|row| row.with_kind(kind)).collect())
    }

    async fn find_by_id(&self, kind: RequestKind, id: i64) -> Result<Option<ServiceRequest>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1",
            returning_columns(kind),
            kind.table()
        );
        let row = sqlx::query_as::<_, ServiceRequest>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.with_kind(kind)))
    }

    async fn claim(&self, kind: RequestKind, id: i64, assignee: Uuid) -> Result<Option<ServiceRequest>, AppError> {
        let sql = build_claim_sql(kind);
        let row = sqlx::query_as::<_, ServiceRequest>(&sql)
            .bind(assignee)
            .bind(kind.assigned_status())
            .bind(id)
            .bind(kind.assignee_role())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.with_kind(kind)))
    }
}

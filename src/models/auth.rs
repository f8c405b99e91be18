// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::requests::RequestKind;
use crate::models::sections::SectionKey;

// Classificação plana do usuário. Não é hierarquia: cada view testa o papel explicitamente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Manager,
    Installer,
    Delivery,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Manager => "manager",
            Role::Installer => "installer",
            Role::Delivery => "delivery",
        }
    }

    /// Seções de relatório que o papel pode abrir.
    pub fn allowed_sections(&self) -> &'static [SectionKey] {
        match self {
            Role::Owner => &SectionKey::ALL,
            Role::Manager => &[SectionKey::Leads, SectionKey::Sales],
            Role::Installer | Role::Delivery => &[],
        }
    }

    pub fn can_open_section(&self, key: SectionKey) -> bool {
        self.allowed_sections().contains(&key)
    }

    // Lista de livres: quem executa o tipo e o dono
    pub fn can_view_free(&self, kind: RequestKind) -> bool {
        *self == Role::Owner || *self == kind.assignee_role()
    }

    // Só quem executa o tipo pode assumir (mantém a invariante do responsável)
    pub fn can_claim(&self, kind: RequestKind) -> bool {
        *self == kind.assignee_role()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "owner" => Ok(Role::Owner),
            "manager" => Ok(Role::Manager),
            "installer" => Ok(Role::Installer),
            "delivery" | "courier" => Ok(Role::Delivery),
            other => Err(format!("papel desconhecido: '{other}'")),
        }
    }
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    #[schema(example = "m.kuznetsova")]
    pub username: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados do formulário de login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(length(min = 1, max = 150, message = "Informe o nome de usuário."))]
    pub username: String,
    #[validate(length(min = 1, message = "Informe a senha."))]
    pub password: String,
}

// Descrição do formulário de login (GET /login)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub action: String,
    pub method: String,
    pub fields: Vec<String>,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

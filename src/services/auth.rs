// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, Role, User},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    jwt_secret: String,
    session_ttl_hours: u32,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        jwt_secret: String,
        session_ttl_hours: u32,
        bcrypt_cost: u32,
    ) -> Self {
        Self { user_repo, jwt_secret, session_ttl_hours, bcrypt_cost }
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.session_ttl_hours))
    }

    // Cadastro feito pela CLI (não existe rota HTTP para isso)
    pub async fn create_user(&self, username: &str, password: &str, role: Role) -> Result<User, AppError> {
        let password_clone = password.to_owned();
        let cost = self.bcrypt_cost;

        // Hashing é caro: roda fora do executor
        let hashed_password = tokio::task::spawn_blocking(move || hash(&password_clone, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let user = self.user_repo.create_user(username, &hashed_password, role).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "Usuário criado");
        Ok(user)
    }

    pub async fn login_user(&self, username: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            tracing::warn!(username, "Tentativa de login com senha inválida");
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, role = %user.role, "Login efetuado");
        self.issue_token(user.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::Unauthenticated)?;

        // Usuário removido depois do login também perde a sessão
        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::Unauthenticated)
    }

    pub fn issue_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.session_ttl())
            .ok_or_else(|| anyhow::anyhow!("Validade da sessão estoura a data máxima"))?;

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

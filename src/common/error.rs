// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::routes::LOGIN_PATH;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Nome de usuário já existe")]
    UsernameAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    // Sem sessão válida: volta para o login
    #[error("Sessão ausente ou inválida")]
    Unauthenticated,

    // Papel sem acesso: redireciona para a página segura, sem mostrar erro
    #[error("Acesso negado (redirecionando para {0})")]
    AccessDenied(&'static str),

    // Pedido inexistente ou já atribuído
    #[error("Pedido não encontrado")]
    RequestNotFound,

    // Só o MemoryStore grava pedidos; no Postgres quem barra é o trigger
    #[cfg(any(test, feature = "test-support"))]
    #[error("Referência inválida: {0}")]
    InvalidReference(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::Unauthenticated => return Redirect::to(LOGIN_PATH).into_response(),
            AppError::AccessDenied(fallback) => return Redirect::to(fallback).into_response(),
            AppError::UsernameAlreadyExists => (StatusCode::CONFLICT, "Este nome de usuário já está em uso."),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Usuário ou senha inválidos."),
            AppError::RequestNotFound => (StatusCode::NOT_FOUND, "Pedido não encontrado."),
            #[cfg(any(test, feature = "test-support"))]
            AppError::InvalidReference(ref reason) => {
                let body = Json(json!({ "error": reason }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente recebe só a genérica.
            ref e => {
                tracing::error!(error = ?e, "Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

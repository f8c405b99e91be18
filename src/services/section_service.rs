// src/services/section_service.rs

use std::{collections::HashMap, path::Path};

use anyhow::Context;

use crate::{
    common::error::AppError,
    models::{
        auth::User,
        sections::{SectionKey, SectionReport},
    },
    routes::DASHBOARD_PATH,
};

// Conteúdo de apresentação, não é derivado de dados do sistema
const EMBEDDED_SECTIONS: &str = include_str!("../../data/sections.json");

/// Tabela fixa seção -> pacote de métricas, carregada uma vez na inicialização.
#[derive(Debug, Clone)]
pub struct SectionCatalog {
    sections: HashMap<SectionKey, SectionReport>,
}

impl SectionCatalog {
    pub fn embedded() -> anyhow::Result<Self> {
        Self::from_json(EMBEDDED_SECTIONS).context("Falha ao ler o pacote de seções embutido")
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Falha ao abrir {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Arquivo de seções inválido: {}", path.display()))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let sections: HashMap<SectionKey, SectionReport> = serde_json::from_str(raw)?;

        // Toda chave do conjunto fechado precisa de conteúdo
        let missing: Vec<&str> = SectionKey::ALL
            .iter()
            .filter(|key| !sections.contains_key(*key))
            .map(|key| key.as_str())
            .collect();
        if !missing.is_empty() {
            anyhow::bail!("seções sem conteúdo: {}", missing.join(", "));
        }

        tracing::debug!(count = sections.len(), "Seções de relatório carregadas");
        Ok(Self { sections })
    }

    /// Busca a seção pelo slug da URL. Chave desconhecida ou não permitida
    /// ao papel redireciona para o painel.
    pub fn lookup(&self, user: &User, slug: &str) -> Result<&SectionReport, AppError> {
        let Ok(key) = slug.parse::<SectionKey>() else {
            return Err(AppError::AccessDenied(DASHBOARD_PATH));
        };

        if !user.role.can_open_section(key) {
            tracing::debug!(user_id = %user.id, role = %user.role, section = slug, "Seção negada");
            return Err(AppError::AccessDenied(DASHBOARD_PATH));
        }

        self.sections.get(&key).ok_or(AppError::AccessDenied(DASHBOARD_PATH))
    }
}

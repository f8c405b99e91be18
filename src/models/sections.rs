// src/models/sections.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Conjunto fechado de seções de relatório
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Leads,
    Managers,
    Sales,
    Site,
    Production,
    Finance,
}

impl SectionKey {
    pub const ALL: [SectionKey; 6] = [
        SectionKey::Leads,
        SectionKey::Managers,
        SectionKey::Sales,
        SectionKey::Site,
        SectionKey::Production,
        SectionKey::Finance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Leads => "leads",
            SectionKey::Managers => "managers",
            SectionKey::Sales => "sales",
            SectionKey::Site => "site",
            SectionKey::Production => "production",
            SectionKey::Finance => "finance",
        }
    }
}

impl std::str::FromStr for SectionKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Kpi {
    #[schema(example = "Новые лиды")]
    pub title: String,
    #[schema(example = "248")]
    pub value: String,
    #[schema(example = "+18% к прошлому месяцу")]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Insight {
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListItem {
    pub title: String,
    pub subtitle: String,
    pub value: String,
}

/// Pacote fixo de métricas de uma seção. Conteúdo de apresentação, servido como está.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionReport {
    pub title: String,
    pub subtitle: String,
    pub period: String,
    pub kpis: Vec<Kpi>,
    #[serde(default)]
    pub table_title: String,
    #[serde(default)]
    pub table_headers: Vec<String>,
    #[serde(default)]
    pub table_rows: Vec<Vec<String>>,
    #[serde(default)]
    pub insight_title: String,
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub list_title: String,
    #[serde(default)]
    pub list_items: Vec<ListItem>,
}

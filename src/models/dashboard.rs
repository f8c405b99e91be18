// src/models/dashboard.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{auth::Role, requests::ServiceRequest, sections::SectionKey};

// Painel inicial. A variante segue o papel de quem abriu.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub variant: Role,
    pub upcoming_installations: Vec<ServiceRequest>,
    pub upcoming_deliveries: Vec<ServiceRequest>,
    /// Limite da janela "em breve" (agora + 7 dias)
    pub soon_window: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_installations: Option<Vec<ServiceRequest>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_deliveries: Option<Vec<ServiceRequest>>,
    pub sections: Vec<SectionKey>,
}

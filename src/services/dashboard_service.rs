// src/services/dashboard_service.rs

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::{
    common::error::AppError,
    db::RequestRepository,
    models::{
        auth::{Role, User},
        dashboard::DashboardView,
        requests::{RequestKind, RequestQuery, RequestScope},
    },
};

// Quantos pedidos cada bloco do painel mostra
const UPCOMING_LIMIT: i64 = 5;
const SOON_WINDOW_DAYS: i64 = 7;

#[derive(Clone)]
pub struct DashboardService {
    repo: Arc<dyn RequestRepository>,
}

impl DashboardService {
    pub fn new(repo: Arc<dyn RequestRepository>) -> Self {
        Self { repo }
    }

    pub async fn build(&self, user: &User, now: DateTime<Utc>) -> Result<DashboardView, AppError> {
        let upcoming = RequestQuery::scoped(RequestScope::All).upcoming(now, UPCOMING_LIMIT);
        let upcoming_installations = self.repo.find(RequestKind::Installation, &upcoming).await?;
        let upcoming_deliveries = self.repo.find(RequestKind::Delivery, &upcoming).await?;

        let own = RequestQuery::scoped(RequestScope::AssignedTo(user.id)).upcoming(now, UPCOMING_LIMIT);
        let (my_installations, my_deliveries) = match user.role {
            Role::Installer => (Some(self.repo.find(RequestKind::Installation, &own).await?), None),
            Role::Delivery => (None, Some(self.repo.find(RequestKind::Delivery, &own).await?)),
            Role::Owner | Role::Manager => (None, None),
        };

        Ok(DashboardView {
            variant: user.role,
            upcoming_installations,
            upcoming_deliveries,
            soon_window: now + Duration::days(SOON_WINDOW_DAYS),
            my_installations,
            my_deliveries,
            sections: user.role.allowed_sections().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{MemoryStore, UserRepository},
        models::requests::NewServiceRequest,
    };

    async fn seed(store: &MemoryStore, kind: RequestKind, at: DateTime<Utc>) -> i64 {
        store
            .insert_request(
                kind,
                NewServiceRequest {
                    client_name: "Клиент".into(),
                    phone: "+7".into(),
                    address: "Пермь".into(),
                    scheduled_for: at,
                    manager_id: None,
                },
            )
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn upcoming_blocks_skip_the_past_and_cap_at_five() {
        let store = Arc::new(MemoryStore::new());
        let owner = store.create_user("owner", "x", Role::Owner).await.unwrap();
        let now = Utc::now();

        seed(&store, RequestKind::Installation, now - Duration::days(1)).await;
        for day in 1..=7 {
            seed(&store, RequestKind::Installation, now + Duration::days(day)).await;
        }

        let view = DashboardService::new(store.clone()).build(&owner, now).await.unwrap();
        assert_eq!(view.variant, Role::Owner);
        assert_eq!(view.upcoming_installations.len(), 5);
        assert!(view.upcoming_installations.iter().all(|r| r.scheduled_for >= now));
        assert!(view
            .upcoming_installations
            .windows(2)
            .all(|w| w[0].scheduled_for <= w[1].scheduled_for));
        assert!(view.upcoming_deliveries.is_empty());
        assert!(view.my_installations.is_none());
        assert_eq!(view.sections.len(), 6);
        assert_eq!(view.soon_window, now + Duration::days(7));
    }

    #[tokio::test]
    async fn courier_gets_own_deliveries() {
        let store = Arc::new(MemoryStore::new());
        let courier = store.create_user("courier", "x", Role::Delivery).await.unwrap();
        let now = Utc::now();

        let mine = seed(&store, RequestKind::Delivery, now + Duration::hours(3)).await;
        seed(&store, RequestKind::Delivery, now + Duration::hours(4)).await;
        store.claim(RequestKind::Delivery, mine, courier.id).await.unwrap();

        let view = DashboardService::new(store.clone()).build(&courier, now).await.unwrap();
        let own = view.my_deliveries.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].id, mine);
        assert!(view.my_installations.is_none());
        assert!(view.sections.is_empty());
    }
}

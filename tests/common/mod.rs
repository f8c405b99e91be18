#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, Response},
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use furniture_portal::{
    build_router,
    db::MemoryStore,
    models::{
        auth::{Role, User},
        requests::{NewServiceRequest, RequestKind, ServiceRequest},
    },
    AppConfig, AppState, PortalApp,
};

pub struct TestPortal {
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://unused".into(),
        jwt_secret: "segredo-dos-testes".into(),
        bind_addr: "127.0.0.1:0".into(),
        db_max_connections: 1,
        session_ttl_hours: 1,
        bcrypt_cost: 4,
        sections_path: None,
    }
}

impl TestPortal {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::from_repositories(store.clone(), store.clone(), &test_config())
            .expect("estado de teste");
        Self { store, state }
    }

    pub fn router(&self) -> PortalApp {
        build_router(self.state.clone())
    }

    pub async fn user(&self, username: &str, role: Role) -> User {
        self.state
            .auth_service
            .create_user(username, "senha-123", role)
            .await
            .unwrap()
    }

    pub fn token(&self, user: &User) -> String {
        self.state.auth_service.issue_token(user.id).unwrap()
    }

    pub async fn request(&self, kind: RequestKind, client: &str, manager: Option<&User>) -> ServiceRequest {
        self.store
            .insert_request(
                kind,
                NewServiceRequest {
                    client_name: client.into(),
                    phone: "+7 912 345-67-89".into(),
                    address: "Новосибирск, Красный пр. 10".into(),
                    scheduled_for: Utc::now() + Duration::days(1),
                    manager_id: manager.map(|m| m.id),
                },
            )
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str, user: Option<&User>) -> Response<Body> {
        self.send("GET", uri, user).await
    }

    pub async fn post(&self, uri: &str, user: Option<&User>) -> Response<Body> {
        self.send("POST", uri, user).await
    }

    async fn send(&self, method: &str, uri: &str, user: Option<&User>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token(user)));
        }
        self.router()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

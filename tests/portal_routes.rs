mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use furniture_portal::models::{auth::Role, requests::RequestKind};
use tower::ServiceExt;

use common::{json_body, location, TestPortal};

#[tokio::test]
async fn unauthenticated_calls_redirect_to_login() {
    let portal = TestPortal::new();

    for uri in ["/", "/requests/installations", "/section/leads", "/me"] {
        let response = portal.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/login", "{uri}");
    }

    let response = portal.post("/requests/installations/1/claim", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn health_and_login_form_are_public() {
    let portal = TestPortal::new();

    let response = portal.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = portal.get("/login", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["action"], "/login");
}

#[tokio::test]
async fn login_form_sets_session_cookie_that_opens_the_dashboard() {
    let portal = TestPortal::new();
    portal.user("v.sidorov", Role::Manager).await;

    let response = portal
        .router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=v.sidorov&password=senha-123"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_owned();
    assert!(set_cookie.starts_with("portal_session="));
    assert!(set_cookie.contains("HttpOnly"));
    let cookie = set_cookie.split(';').next().unwrap().to_owned();

    let response = portal
        .router()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["variant"], "manager");
    assert_eq!(body["sections"], serde_json::json!(["leads", "sales"]));
}

#[tokio::test]
async fn wrong_password_is_401() {
    let portal = TestPortal::new();
    portal.user("owner", Role::Owner).await;

    let response = portal
        .router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=owner&password=errada"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn courier_listing_installations_is_redirected_to_dashboard() {
    let portal = TestPortal::new();
    let courier = portal.user("courier", Role::Delivery).await;
    portal.request(RequestKind::Installation, "Анна", None).await;

    let response = portal.get("/requests/installations", Some(&courier)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn manager_sees_own_records_and_owner_sees_all() {
    let portal = TestPortal::new();
    let owner = portal.user("owner", Role::Owner).await;
    let manager = portal.user("manager", Role::Manager).await;
    let other = portal.user("manager2", Role::Manager).await;

    let mine = portal.request(RequestKind::Delivery, "Ирина Власова", Some(&manager)).await;
    portal.request(RequestKind::Delivery, "Максим Павлов", Some(&other)).await;

    let body = json_body(portal.get("/requests/deliveries", Some(&manager)).await).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], mine.id);
    assert_eq!(rows[0]["kind"], "delivery");
    assert_eq!(rows[0]["status"], "В ожидании доставки");

    let body = json_body(portal.get("/requests/deliveries", Some(&owner)).await).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let body = json_body(portal.get("/requests/deliveries?q=%D0%BF%D0%B0%D0%B2%D0%BB%D0%BE%D0%B2", Some(&owner)).await).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn installer_claims_free_request_and_second_claim_is_404() {
    let portal = TestPortal::new();
    let installer_a = portal.user("installer-a", Role::Installer).await;
    let installer_b = portal.user("installer-b", Role::Installer).await;
    let request = portal.request(RequestKind::Installation, "ООО «Гарден»", None).await;

    let free = json_body(portal.get("/requests/installations/free", Some(&installer_a)).await).await;
    assert_eq!(free.as_array().unwrap().len(), 1);

    let uri = format!("/requests/installations/{}/claim", request.id);
    let response = portal.post(&uri, Some(&installer_a)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/requests/installations");

    let response = portal.post(&uri, Some(&installer_b)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let own = json_body(portal.get("/requests/installations", Some(&installer_a)).await).await;
    let rows = own.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["assigneeId"], installer_a.id.to_string());
    assert_eq!(rows[0]["status"], "Назначен установщик");

    let free = json_body(portal.get("/requests/installations/free", Some(&installer_b)).await).await;
    assert!(free.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn claim_by_the_wrong_role_redirects_to_the_free_list() {
    let portal = TestPortal::new();
    let installer = portal.user("installer", Role::Installer).await;
    let request = portal.request(RequestKind::Delivery, "Анна Литвинова", None).await;

    let response = portal
        .post(&format!("/requests/deliveries/{}/claim", request.id), Some(&installer))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/requests/deliveries/free");
}

#[tokio::test]
async fn claiming_a_missing_record_is_404() {
    let portal = TestPortal::new();
    let courier = portal.user("courier", Role::Delivery).await;

    let response = portal.post("/requests/deliveries/7/claim", Some(&courier)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn finance_section_for_owner_but_not_for_manager() {
    let portal = TestPortal::new();
    let owner = portal.user("owner", Role::Owner).await;
    let manager = portal.user("manager", Role::Manager).await;

    let response = portal.get("/section/finance", Some(&owner)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["title"], "Финансы");
    assert_eq!(body["listItems"].as_array().unwrap().len(), 8);
    assert_eq!(body["tableHeaders"][0], "Неделя");

    let response = portal.get("/section/finance", Some(&manager)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = portal.get("/section/leads", Some(&manager)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = portal.get("/section/unknown", Some(&owner)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn installer_dashboard_includes_own_installations() {
    let portal = TestPortal::new();
    let installer = portal.user("installer", Role::Installer).await;
    let request = portal.request(RequestKind::Installation, "Анна", None).await;
    portal
        .post(&format!("/requests/installations/{}/claim", request.id), Some(&installer))
        .await;

    let body = json_body(portal.get("/", Some(&installer)).await).await;
    assert_eq!(body["variant"], "installer");
    assert_eq!(body["myInstallations"].as_array().unwrap().len(), 1);
    assert!(body.get("myDeliveries").is_none());
    assert_eq!(body["upcomingInstallations"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let portal = TestPortal::new();
    let response = portal.get("/api/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["paths"]["/section/{section}"].is_object());
}

#[tokio::test]
async fn trailing_slash_urls_reach_the_same_views() {
    let portal = TestPortal::new();
    let owner = portal.user("owner", Role::Owner).await;
    let installer = portal.user("installer", Role::Installer).await;
    let request = portal.request(RequestKind::Installation, "Анна", None).await;

    for uri in ["/requests/installations/", "/section/finance/", "/me/"] {
        let response = portal.get(uri, Some(&owner)).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }

    let response = portal.get("/login/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = portal
        .post(&format!("/requests/installations/{}/claim/", request.id), Some(&installer))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/requests/installations");
}

#[tokio::test]
async fn stale_cookie_does_not_hide_a_valid_bearer_token() {
    let portal = TestPortal::new();
    let manager = portal.user("manager", Role::Manager).await;

    let response = portal
        .router()
        .oneshot(
            Request::builder()
                .uri("/me")
                .header(header::COOKIE, "portal_session=token-vencido")
                .header(header::AUTHORIZATION, format!("Bearer {}", portal.token(&manager)))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["username"], "manager");

    let response = portal
        .router()
        .oneshot(
            Request::builder()
                .uri("/me")
                .header(header::COOKIE, "portal_session=token-vencido")
                .header(header::AUTHORIZATION, "Bearer outro-lixo")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

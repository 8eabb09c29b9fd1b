//! Admin panel HTTP tests.
//!
//! Every test gets its own admin app, so review moderation in one test is
//! never visible to another.

#![allow(clippy::unwrap_used)]

use proscience_integration_tests::{
    ADMIN_EMAIL, ADMIN_PASSWORD, TestServer, location, signed_in_admin, spawn_admin,
};
use reqwest::StatusCode;
use serde_json::Value;

async fn api_stats(server: &TestServer) -> Value {
    let resp = server
        .client
        .get(server.url("/api/stats"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.unwrap()
}

fn stat(stats: &Value, key: &str) -> u64 {
    stats.get(key).and_then(Value::as_u64).unwrap()
}

// ============================================================================
// Access control
// ============================================================================

#[tokio::test]
async fn test_health_is_public() {
    let server = spawn_admin().await;
    let (status, body) = server.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_pages_redirect_to_login_when_signed_out() {
    let server = spawn_admin().await;
    for path in [
        "/",
        "/orders",
        "/orders/1",
        "/customers",
        "/customers/1",
        "/reviews",
        "/products",
        "/analytics",
    ] {
        let resp = server.client.get(server.url(path)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&resp).as_deref(), Some("/auth/login"), "{path}");
    }
}

#[tokio::test]
async fn test_api_is_401_when_signed_out() {
    let server = spawn_admin().await;
    let resp = server
        .client
        .get(server.url("/api/stats"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_moderation_requires_login() {
    let server = spawn_admin().await;
    let resp = server.post_form("/reviews/3/approve", &[]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/auth/login"));
}

// ============================================================================
// Login / logout
// ============================================================================

#[tokio::test]
async fn test_login_page_renders() {
    let server = spawn_admin().await;
    let (status, body) = server.get("/auth/login").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Sign in"));
}

#[tokio::test]
async fn test_bad_credentials_are_rejected() {
    let server = spawn_admin().await;

    let resp = server
        .post_form(
            "/auth/login",
            &[("email", ADMIN_EMAIL), ("password", "wrong-password-1!")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Invalid email or password"));
    // The email is kept, the password is not.
    assert!(body.contains(ADMIN_EMAIL));

    let resp = server
        .post_form(
            "/auth/login",
            &[("email", "someone@else.com"), ("password", ADMIN_PASSWORD)],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = server.client.get(server.url("/orders")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let server = spawn_admin().await;
    let resp = server
        .post_form(
            "/auth/login",
            &[("email", "  OPS@ProScience.com "), ("password", ADMIN_PASSWORD)],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/"));
}

#[tokio::test]
async fn test_login_then_logout() {
    let server = signed_in_admin().await;

    let (status, body) = server.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Dashboard"));
    assert!(body.contains(ADMIN_EMAIL));

    // Signed-in admins skip the login form.
    let resp = server.client.get(server.url("/auth/login")).send().await.unwrap();
    assert_eq!(location(&resp).as_deref(), Some("/"));

    let resp = server.post_form("/auth/logout", &[]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/auth/login"));

    let resp = server.client.get(server.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
async fn test_signed_in_pages_render() {
    let server = signed_in_admin().await;
    for path in [
        "/",
        "/orders",
        "/customers",
        "/reviews",
        "/products",
        "/analytics",
        "/analytics?range=7d",
        "/analytics?range=90d",
        "/analytics?range=bogus",
    ] {
        let (status, _) = server.get(path).await;
        assert_eq!(status, StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn test_order_filters() {
    let server = signed_in_admin().await;

    let (_, body) = server.get("/orders?status=pending").await;
    assert!(body.contains("ORD-2024-001"));
    assert!(body.contains("ORD-2024-005"));
    assert!(!body.contains("ORD-2024-002"));

    let (_, body) = server.get("/orders?q=michael").await;
    assert!(body.contains("ORD-2024-002"));
    assert!(body.contains("ORD-2024-006"));
    assert!(!body.contains("ORD-2024-001"));

    // An unknown status is ignored.
    let (status, body) = server.get("/orders?status=lost").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ORD-2023-045"));
}

#[tokio::test]
async fn test_order_detail() {
    let server = signed_in_admin().await;

    let (status, body) = server.get("/orders/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Order ORD-2024-001"));
    assert!(body.contains("Sarah Johnson"));
    assert!(body.contains("$145.76"));
    assert!(body.contains("Free"));

    let (status, _) = server.get("/orders/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_customers() {
    let server = signed_in_admin().await;

    let (_, body) = server.get("/customers?q=EMILY").await;
    assert!(body.contains("Emily Rodriguez"));
    assert!(!body.contains("David Thompson"));

    let (status, body) = server.get("/customers/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Sarah Johnson"));
    assert!(body.contains("ORD-2024-001"));
    assert!(body.contains("ORD-2023-045"));

    let (status, _) = server.get("/customers/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_products_stock_view() {
    let server = signed_in_admin().await;

    let (_, body) = server.get("/products?category=protein").await;
    assert!(body.contains("Casein Night Protein"));
    assert!(body.contains("Out of Stock"));
    assert!(!body.contains("Omega-3 Premium"));
}

#[tokio::test]
async fn test_unknown_admin_path_is_404() {
    let server = signed_in_admin().await;
    let (status, body) = server.get("/settings").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("404"));
}

// ============================================================================
// Review moderation
// ============================================================================

#[tokio::test]
async fn test_review_filters() {
    let server = signed_in_admin().await;

    let (_, body) = server.get("/reviews?status=pending").await;
    assert!(body.contains("review-3"));
    assert!(body.contains("review-5"));
    assert!(!body.contains("review-1\""));

    let (_, body) = server.get("/reviews?q=jitters").await;
    assert!(body.contains("review-4"));
    assert!(!body.contains("review-2\""));
}

#[tokio::test]
async fn test_approve_updates_stats_and_keeps_filters() {
    let server = signed_in_admin().await;
    assert_eq!(stat(&api_stats(&server).await, "pending_reviews"), 2);

    let resp = server
        .post_form(
            "/reviews/3/approve",
            &[("status", "pending"), ("q", "")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&resp).as_deref(),
        Some("/reviews?status=pending")
    );

    assert_eq!(stat(&api_stats(&server).await, "pending_reviews"), 1);

    let (_, body) = server.get("/reviews?status=pending").await;
    assert!(!body.contains("review-3\""));
    assert!(body.contains("review-5"));
}

#[tokio::test]
async fn test_reject_and_delete() {
    let server = signed_in_admin().await;

    let resp = server.post_form("/reviews/5/reject", &[]).await;
    assert_eq!(location(&resp).as_deref(), Some("/reviews"));

    let (_, body) = server.get("/reviews?status=rejected").await;
    assert!(body.contains("review-5"));

    let resp = server.post_form("/reviews/5/delete", &[]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let (_, body) = server.get("/reviews").await;
    assert!(!body.contains("review-5\""));
    // Five left; the 3-star review no longer drags the average.
    assert!(body.contains("4.8"));

    let resp = server.post_form("/reviews/5/delete", &[]).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_stats_shape() {
    let server = signed_in_admin().await;
    let stats = api_stats(&server).await;

    assert_eq!(stat(&stats, "total_products"), 12);
    assert_eq!(stat(&stats, "low_stock_products"), 3);
    assert!(stats.get("total_revenue").and_then(Value::as_str).is_some());
}

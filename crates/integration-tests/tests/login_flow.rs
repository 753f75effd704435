//! Login flow against a mock storefront API.

#![allow(clippy::unwrap_used)]

use secrecy::ExposeSecret;
use serde_json::json;
use storefront_client::{LoginError, Route};
use storefront_core::{CartItem, LoginForm};
use storefront_integration_tests::{Note, TestContext, login_body};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn sam_form() -> LoginForm {
    LoginForm::new("sam@shop.example", "secret1")
}

async fn mount_login(ctx: &TestContext, role: &str) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({
            "email": "sam@shop.example",
            "password": "secret1",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body("u1", "Sam", role, "T")))
        .expect(1)
        .mount(&ctx.server)
        .await;
}

#[tokio::test]
async fn test_guest_cart_is_merged_and_server_cart_fetched() {
    let ctx = TestContext::new().await;
    ctx.guest_cart.add(CartItem::new("P1", 2)).unwrap();
    mount_login(&ctx, "customer").await;

    Mock::given(method("POST"))
        .and(path("/api/user/cart/merge"))
        .and(header("authorization", "Bearer T"))
        .and(body_json(json!({
            "userId": "u1",
            "localCartItems": [{ "productRef": "P1", "quantity": 2 }],
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&ctx.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/user/cart/u1"))
        .and(header("authorization", "Bearer T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "userId": "u1",
            "items": [
                { "productRef": "P1", "quantity": 2 },
                { "productRef": "P9", "quantity": 1, "size": "L" },
            ],
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let outcome = ctx.flow.submit(sam_form()).await.unwrap();

    assert_eq!(outcome.route, Route::AccountDashboard);
    let cart = outcome.cart.unwrap();
    assert_eq!(cart.item_count(), 3);
    assert_eq!(ctx.sessions.state().cart(), Some(cart));

    assert!(ctx.guest_cart.load().unwrap().is_empty());
    assert_eq!(ctx.recorder.notes(), vec![Note::Success("Welcome Sam".into())]);
    assert_eq!(ctx.recorder.routes(), vec![Route::AccountDashboard]);
    assert!(!ctx.flow.submit_state().is_submitting());
}

#[tokio::test]
async fn test_empty_guest_cart_skips_cart_calls() {
    let ctx = TestContext::new().await;
    mount_login(&ctx, "customer").await;

    Mock::given(method("POST"))
        .and(path("/api/user/cart/merge"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.server)
        .await;

    let outcome = ctx.flow.submit(sam_form()).await.unwrap();

    assert!(outcome.cart.is_none());
    assert_eq!(ctx.recorder.routes(), vec![Route::AccountDashboard]);
}

#[tokio::test]
async fn test_admin_lands_on_admin_overview() {
    let ctx = TestContext::new().await;
    mount_login(&ctx, "admin").await;

    let outcome = ctx.flow.submit(sam_form()).await.unwrap();

    assert_eq!(outcome.route, Route::AdminOverview);
    assert!(outcome.session.user.is_admin());
}

#[tokio::test]
async fn test_session_survives_restart() {
    let ctx = TestContext::new().await;
    mount_login(&ctx, "customer").await;

    ctx.flow.submit(sam_form()).await.unwrap();

    let restored = ctx.reopen().restore().unwrap().unwrap();
    assert_eq!(restored.user.id.as_str(), "u1");
    assert_eq!(restored.user.first_name, "Sam");
    assert_eq!(restored.token.expose_secret(), "T");
}

#[tokio::test]
async fn test_logout_forgets_stored_session() {
    let ctx = TestContext::new().await;
    mount_login(&ctx, "customer").await;
    ctx.flow.submit(sam_form()).await.unwrap();

    storefront_client::services::auth::logout(&ctx.sessions).unwrap();

    assert!(!ctx.sessions.state().is_authenticated());
    assert!(ctx.reopen().restore().unwrap().is_none());
}

#[tokio::test]
async fn test_rejected_credentials_show_server_message() {
    let ctx = TestContext::new().await;
    ctx.guest_cart.add(CartItem::new("P1", 1)).unwrap();

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Wrong email or password" })),
        )
        .expect(1)
        .mount(&ctx.server)
        .await;

    let err = ctx.flow.submit(sam_form()).await.unwrap_err();

    assert!(matches!(err, LoginError::Auth(_)));
    assert_eq!(
        ctx.recorder.notes(),
        vec![Note::Error("Wrong email or password".into())]
    );
    assert!(ctx.recorder.routes().is_empty());
    assert!(ctx.reopen().restore().unwrap().is_none());
    assert_eq!(ctx.guest_cart.load().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rejected_credentials_without_body() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&ctx.server)
        .await;

    ctx.flow.submit(sam_form()).await.unwrap_err();

    assert_eq!(
        ctx.recorder.notes(),
        vec![Note::Error("Invalid credentials".into())]
    );
}

#[tokio::test]
async fn test_invalid_form_sends_nothing() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.server)
        .await;

    let err = ctx
        .flow
        .submit(LoginForm::new("sam@shop", "12345"))
        .await
        .unwrap_err();

    let LoginError::Validation(errors) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(
        errors.get("email"),
        Some("Please enter a valid email address")
    );
    assert_eq!(
        errors.get("password"),
        Some("Password must be at least 6 characters")
    );
    assert!(ctx.recorder.notes().is_empty());
}

#[tokio::test]
async fn test_failed_merge_keeps_guest_cart() {
    let ctx = TestContext::new().await;
    ctx.guest_cart.add(CartItem::new("P1", 2)).unwrap();
    mount_login(&ctx, "customer").await;

    Mock::given(method("POST"))
        .and(path("/api/user/cart/merge"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&ctx.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/user/cart/u1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.server)
        .await;

    let err = ctx.flow.submit(sam_form()).await.unwrap_err();

    assert!(matches!(err, LoginError::CartMerge(_)));
    assert!(err.session_committed());
    assert_eq!(ctx.guest_cart.load().unwrap().len(), 1);
    assert_eq!(
        ctx.recorder.notes(),
        vec![Note::Error("Something went wrong. Please try again.".into())]
    );
    assert!(ctx.recorder.routes().is_empty());
    assert!(ctx.reopen().restore().unwrap().is_some());
}

#[tokio::test]
async fn test_failed_fetch_after_merge_clears_guest_cart() {
    let ctx = TestContext::new().await;
    ctx.guest_cart.add(CartItem::new("P1", 2)).unwrap();
    mount_login(&ctx, "customer").await;

    Mock::given(method("POST"))
        .and(path("/api/user/cart/merge"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&ctx.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/user/cart/u1"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "Cart service unavailable" })),
        )
        .expect(1)
        .mount(&ctx.server)
        .await;

    let err = ctx.flow.submit(sam_form()).await.unwrap_err();

    assert!(matches!(err, LoginError::CartFetch(_)));
    assert!(ctx.guest_cart.load().unwrap().is_empty());
    assert!(ctx.sessions.state().cart().is_none());
    assert_eq!(
        ctx.recorder.notes(),
        vec![Note::Error("Cart service unavailable".into())]
    );
}

use serde_json::{Value, json};

use crate::helpers::{PASSWORD, TestApp, assert_redacted, error_of, signup_body};

#[tokio::test]
async fn root_reports_running() {
    let app = TestApp::new().await;

    let response = app.get_root().await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "Bazaar API is running");
}

#[tokio::test]
async fn signup_returns_201_with_token_and_redacted_user() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/auth/signup", &signup_body("jane@shop.io", "+15550000001"))
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"], "jane@shop.io");
    assert_eq!(body["user"]["role"], "customer");
    assert_redacted(&body["user"]);
}

#[tokio::test]
async fn signup_with_taken_email_or_phone_returns_400() {
    let app = TestApp::new().await;
    app.signup_customer("jane@shop.io", "+15550000001").await;

    let same_email = app
        .post_json("/auth/signup", &signup_body("jane@shop.io", "+15550000002"))
        .await;
    assert_eq!(same_email.status().as_u16(), 400);
    assert_eq!(
        error_of(same_email).await,
        "User with this email already exists"
    );

    // same number, different formatting
    let same_phone = app
        .post_json("/auth/signup", &signup_body("john@shop.io", "+1 555-000-0001"))
        .await;
    assert_eq!(same_phone.status().as_u16(), 400);
}

#[tokio::test]
async fn signup_with_malformed_input_returns_400() {
    let app = TestApp::new().await;

    let cases = [
        json!({ "email": "jane@shop.io", "password": PASSWORD }),
        signup_body("not-an-email", "+15550000001"),
        signup_body("jane@shop.io", "call me"),
    ];

    for body in cases {
        let response = app.post_json("/auth/signup", &body).await;
        assert_eq!(response.status().as_u16(), 400, "accepted {body}");
    }
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    app.signup_customer("jane@shop.io", "+15550000001").await;

    let wrong_password = app
        .post_json(
            "/auth/login",
            &json!({ "email": "jane@shop.io", "password": "wrong password!" }),
        )
        .await;
    let unknown_email = app
        .post_json(
            "/auth/login",
            &json!({ "email": "nobody@shop.io", "password": PASSWORD }),
        )
        .await;

    assert_eq!(wrong_password.status().as_u16(), 401);
    assert_eq!(unknown_email.status().as_u16(), 401);
    assert_eq!(error_of(wrong_password).await, error_of(unknown_email).await);
}

#[tokio::test]
async fn login_returns_token_and_user() {
    let app = TestApp::new().await;
    app.signup_customer("jane@shop.io", "+15550000001").await;

    let response = app
        .post_json(
            "/auth/login",
            &json!({ "email": "jane@shop.io", "password": PASSWORD }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(body["token"].as_str().is_some());
    assert_redacted(&body["user"]);
}

#[tokio::test]
async fn password_reset_flow() {
    let app = TestApp::new().await;
    app.signup_customer("jane@shop.io", "+15550000001").await;

    let response = app
        .post_json(
            "/auth/password-reset-request",
            &json!({ "email": "jane@shop.io" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let token = body["resetToken"].as_str().unwrap().to_string();

    let reset_body = json!({ "token": token, "newPassword": "a brand new secret" });
    let response = app.post_json("/auth/password-reset", &reset_body).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Password successfully reset");

    // the token is single use
    let response = app.post_json("/auth/password-reset", &reset_body).await;
    assert_eq!(response.status().as_u16(), 400);

    let old = app
        .post_json(
            "/auth/login",
            &json!({ "email": "jane@shop.io", "password": PASSWORD }),
        )
        .await;
    assert_eq!(old.status().as_u16(), 401);

    let new = app
        .post_json(
            "/auth/login",
            &json!({ "email": "jane@shop.io", "password": "a brand new secret" }),
        )
        .await;
    assert_eq!(new.status().as_u16(), 200);
}

#[tokio::test]
async fn password_reset_request_for_unknown_email_returns_400() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/auth/password-reset-request",
            &json!({ "email": "nobody@shop.io" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn blank_and_unknown_reset_tokens_answer_alike() {
    let app = TestApp::new().await;

    let blank = app
        .post_json(
            "/auth/password-reset",
            &json!({ "token": "   ", "newPassword": "a brand new secret" }),
        )
        .await;
    let unknown = app
        .post_json(
            "/auth/password-reset",
            &json!({ "token": "deadbeef", "newPassword": "a brand new secret" }),
        )
        .await;

    assert_eq!(blank.status().as_u16(), 400);
    assert_eq!(unknown.status().as_u16(), 400);
    assert_eq!(error_of(blank).await, "Invalid or expired reset token");
    assert_eq!(error_of(unknown).await, "Invalid or expired reset token");
}

use serde_json::{Value, json};

use crate::helpers::{PASSWORD, TestApp, assert_redacted};

#[tokio::test]
async fn profile_requires_a_token() {
    let app = TestApp::new().await;

    let response = app.get_with_token("/users/profile", None).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn customers_and_admins_can_read_their_profile() {
    let app = TestApp::new().await;
    let (admin_token, admin_id) = app.bootstrap_admin().await;
    let (customer_token, customer_id) = app.signup_customer("jane@shop.io", "+15550000001").await;

    for (token, id) in [(admin_token, admin_id), (customer_token, customer_id)] {
        let response = app.get_with_token("/users/profile", Some(&token)).await;
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["id"], id.as_str());
        assert_redacted(&body);
    }
}

#[tokio::test]
async fn profile_update_changes_password() {
    let app = TestApp::new().await;
    let (token, _) = app.signup_customer("jane@shop.io", "+15550000001").await;

    let response = app
        .patch_with_token(
            "/users/profile",
            &token,
            &json!({ "firstName": "Janet", "password": "another long secret" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["firstName"], "Janet");

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
            &json!({ "email": "jane@shop.io", "password": "another long secret" }),
        )
        .await;
    assert_eq!(new.status().as_u16(), 200);
}

#[tokio::test]
async fn profile_update_cannot_change_role() {
    let app = TestApp::new().await;
    let (token, _) = app.signup_customer("jane@shop.io", "+15550000001").await;

    let response = app
        .patch_with_token("/users/profile", &token, &json!({ "role": "admin" }))
        .await;

    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn profile_update_rejects_taken_email() {
    let app = TestApp::new().await;
    app.signup_customer("jane@shop.io", "+15550000001").await;
    let (token, _) = app.signup_customer("john@shop.io", "+15550000002").await;

    let response = app
        .patch_with_token("/users/profile", &token, &json!({ "email": "jane@shop.io" }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

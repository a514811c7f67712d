use serde_json::{Value, json};

use crate::helpers::{TestApp, assert_redacted, error_of, signup_body};

#[tokio::test]
async fn first_admin_bootstrap_only_works_once() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/admin/setup/first-admin",
            &signup_body("root@shop.io", "+15550009999"),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["role"], "admin");
    assert_redacted(&body);

    let response = app
        .post_json(
            "/admin/setup/first-admin",
            &signup_body("other@shop.io", "+15550008888"),
        )
        .await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(error_of(response).await, "Admin user already exists");
}

#[tokio::test]
async fn admin_routes_require_an_admin_token() {
    let app = TestApp::new().await;
    let (customer_token, _) = app.signup_customer("jane@shop.io", "+15550000001").await;

    let anonymous = app.get_with_token("/admin/users", None).await;
    assert_eq!(anonymous.status().as_u16(), 401);

    let garbage = app.get_with_token("/admin/users", Some("not.a.jwt")).await;
    assert_eq!(garbage.status().as_u16(), 401);

    let customer = app
        .get_with_token("/admin/users", Some(&customer_token))
        .await;
    assert_eq!(customer.status().as_u16(), 403);
}

#[tokio::test]
async fn admin_lists_redacted_users() {
    let app = TestApp::new().await;
    let (admin_token, _) = app.bootstrap_admin().await;
    app.signup_customer("jane@shop.io", "+15550000001").await;

    let response = app.get_with_token("/admin/users", Some(&admin_token)).await;

    assert_eq!(response.status().as_u16(), 200);
    let users: Vec<Value> = response.json().await.unwrap();
    assert_eq!(users.len(), 2);
    users.iter().for_each(assert_redacted);
}

#[tokio::test]
async fn promote_then_demote_scenario() {
    let app = TestApp::new().await;
    let (admin_token, admin_id) = app.bootstrap_admin().await;
    let (customer_token, customer_id) = app.signup_customer("jane@shop.io", "+15550000001").await;

    // the last admin cannot step down
    let response = app
        .post_with_token(&format!("/admin/users/{admin_id}/demote"), &admin_token)
        .await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(error_of(response).await, "Cannot demote the last admin user");

    let response = app
        .post_with_token(&format!("/admin/users/{customer_id}/promote"), &admin_token)
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["role"], "admin");

    // the promotion applies to the token issued before it
    let response = app
        .get_with_token("/admin/stats", Some(&customer_token))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let stats: Value = response.json().await.unwrap();
    assert_eq!(stats, json!({ "total": 2, "admins": 2, "customers": 0 }));

    let response = app
        .post_with_token(&format!("/admin/users/{admin_id}/demote"), &customer_token)
        .await;
    assert_eq!(response.status().as_u16(), 200);

    // and the demotion revokes admin access at once
    let response = app.get_with_token("/admin/users", Some(&admin_token)).await;
    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn admins_cannot_be_deleted() {
    let app = TestApp::new().await;
    let (admin_token, admin_id) = app.bootstrap_admin().await;

    let response = app
        .delete_with_token(&format!("/admin/users/{admin_id}"), &admin_token)
        .await;

    assert_eq!(response.status().as_u16(), 403);
    assert_eq!(error_of(response).await, "Cannot delete an admin user");
}

#[tokio::test]
async fn deleting_a_customer_returns_204() {
    let app = TestApp::new().await;
    let (admin_token, _) = app.bootstrap_admin().await;
    let (_, customer_id) = app.signup_customer("jane@shop.io", "+15550000001").await;
    let path = format!("/admin/users/{customer_id}");

    let response = app.delete_with_token(&path, &admin_token).await;
    assert_eq!(response.status().as_u16(), 204);

    let response = app.get_with_token(&path, Some(&admin_token)).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn patch_cannot_grant_admin() {
    let app = TestApp::new().await;
    let (admin_token, _) = app.bootstrap_admin().await;
    let (_, customer_id) = app.signup_customer("jane@shop.io", "+15550000001").await;

    let response = app
        .patch_with_token(
            &format!("/admin/users/{customer_id}"),
            &admin_token,
            &json!({ "role": "admin" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn patch_updates_profile_fields() {
    let app = TestApp::new().await;
    let (admin_token, _) = app.bootstrap_admin().await;
    let (_, customer_id) = app.signup_customer("jane@shop.io", "+15550000001").await;

    let response = app
        .patch_with_token(
            &format!("/admin/users/{customer_id}"),
            &admin_token,
            &json!({ "lastName": "Smith", "isActive": false }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["lastName"], "Smith");
    assert_eq!(body["isActive"], false);
    assert_eq!(body["role"], "customer");
}

#[tokio::test]
async fn admin_created_users_are_customers() {
    let app = TestApp::new().await;
    let (admin_token, _) = app.bootstrap_admin().await;

    let response = app
        .post_json_with_token(
            "/admin/users",
            &admin_token,
            &signup_body("jane@shop.io", "+15550000001"),
        )
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["role"], "customer");
}

#[tokio::test]
async fn unknown_and_malformed_ids() {
    let app = TestApp::new().await;
    let (admin_token, _) = app.bootstrap_admin().await;

    let response = app
        .get_with_token(
            "/admin/users/00000000-0000-4000-8000-000000000000",
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let response = app
        .get_with_token("/admin/users/not-a-uuid", Some(&admin_token))
        .await;
    assert_eq!(response.status().as_u16(), 400);
}

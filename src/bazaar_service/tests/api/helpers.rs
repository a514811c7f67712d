use bazaar_adapters::{Argon2Hasher, HashMapUserStore, JwtAuthConfig, config::test};
use bazaar_service::StorefrontService;
use secrecy::Secret;
use serde_json::{Value, json};

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
}

impl TestApp {
    pub async fn new() -> Self {
        let service = StorefrontService::new(
            HashMapUserStore::default(),
            Argon2Hasher,
            JwtAuthConfig {
                jwt_secret: Secret::new("api-test-secret".to_string()),
                token_ttl_in_seconds: 600,
            },
            chrono::Duration::hours(1),
        );

        let listener = tokio::net::TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        let _ = tokio::spawn(service.run_standalone(listener, None));

        Self {
            address,
            http_client: reqwest::Client::new(),
        }
    }

    pub async fn get_root(&self) -> reqwest::Response {
        self.http_client
            .get(&format!("{}/", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.http_client
            .post(&format!("{}{}", &self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_with_token(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut request = self.http_client.get(&format!("{}{}", &self.address, path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn post_with_token(&self, path: &str, token: &str) -> reqwest::Response {
        self.http_client
            .post(&format!("{}{}", &self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_json_with_token(
        &self,
        path: &str,
        token: &str,
        body: &Value,
    ) -> reqwest::Response {
        self.http_client
            .post(&format!("{}{}", &self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn patch_with_token(&self, path: &str, token: &str, body: &Value) -> reqwest::Response {
        self.http_client
            .patch(&format!("{}{}", &self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete_with_token(&self, path: &str, token: &str) -> reqwest::Response {
        self.http_client
            .delete(&format!("{}{}", &self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Signs up a customer and returns `(token, user id)`.
    pub async fn signup_customer(&self, email: &str, phone: &str) -> (String, String) {
        let response = self.post_json("/auth/signup", &signup_body(email, phone)).await;
        assert_eq!(response.status().as_u16(), 201);
        session_of(response).await
    }

    /// Bootstraps the first admin and logs in as them. Returns `(token, user id)`.
    pub async fn bootstrap_admin(&self) -> (String, String) {
        let response = self
            .post_json(
                "/admin/setup/first-admin",
                &signup_body("root@shop.io", "+15550009999"),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201);

        let response = self
            .post_json(
                "/auth/login",
                &json!({ "email": "root@shop.io", "password": PASSWORD }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 200);
        session_of(response).await
    }
}

pub const PASSWORD: &str = "correct horse battery";

pub fn signup_body(email: &str, phone: &str) -> Value {
    json!({
        "email": email,
        "password": PASSWORD,
        "phone": phone,
        "firstName": "Jane",
        "lastName": "Doe"
    })
}

pub async fn session_of(response: reqwest::Response) -> (String, String) {
    let body: Value = response.json().await.expect("Could not deserialize body");
    (
        body["token"].as_str().expect("token").to_string(),
        body["user"]["id"].as_str().expect("user id").to_string(),
    )
}

pub async fn error_of(response: reqwest::Response) -> String {
    let body: Value = response.json().await.expect("Could not deserialize body");
    body["error"].as_str().expect("error message").to_string()
}

pub fn assert_redacted(user: &Value) {
    let object = user.as_object().expect("user is an object");
    assert!(!object.contains_key("passwordHash"));
    assert!(!object.contains_key("password"));
    assert!(!object.contains_key("passwordResetToken"));
    assert!(!object.contains_key("passwordResetExpires"));
}

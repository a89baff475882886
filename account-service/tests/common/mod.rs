use std::sync::Arc;

use account_service::account::service::AuthService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryAccountStore;
use auth::AuthSettings;
use auth::Authenticator;
use auth::Claims;
use auth::HashCost;
use chrono::Duration;
use chrono::Utc;
use serde_json::json;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub store: InMemoryAccountStore,
    pub authenticator: Arc<Authenticator>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());

        let settings = AuthSettings::new(
            TEST_SECRET,
            Duration::minutes(30),
            HashCost {
                memory_kib: 8,
                iterations: 1,
                parallelism: 1,
            },
        )
        .expect("Invalid test settings");
        let authenticator =
            Arc::new(Authenticator::new(&settings).expect("Failed to build authenticator"));

        let store = InMemoryAccountStore::new();
        let auth_service = Arc::new(AuthService::new(
            Arc::new(store.clone()),
            Arc::clone(&authenticator),
        ));

        let router = create_router(auth_service, Arc::clone(&authenticator));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            store,
            authenticator,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register an account and return the access token from the response
    pub async fn sign_up(&self, email: &str, name: &str, password: &str) -> String {
        let response = self
            .post("/auth/create-user")
            .json(&json!({
                "email": email,
                "name": name,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("Missing access_token")
            .to_string()
    }

    /// Sign a token for `subject` whose window starts at `issued_at`
    pub fn mint_token(&self, subject: &str, issued_at: chrono::DateTime<Utc>, ttl: Duration) -> String {
        let claims = Claims::for_subject(subject, issued_at, ttl);
        self.authenticator
            .token_codec()
            .encode_claims(&claims)
            .expect("Failed to sign token")
    }

    /// Sign a token that expired one hour ago
    pub fn expired_token(&self, subject: &str) -> String {
        self.mint_token(subject, Utc::now() - Duration::hours(2), Duration::hours(1))
    }
}

use enrol_adapters::{
    config::constants::test,
    email::MockEmailClient,
    hashing::Argon2PasswordHasher,
    persistence::{HashMapAppUserStore, HashMapConfirmationTokenStore},
};
use enrol_application::{AppUserService, ConfirmationTokenService, RegistrationService};
use enrol_core::RegexEmailValidator;
use enrol_service::EnrolService;
use serde_json::{Value, json};

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub email_client: MockEmailClient,
}

impl TestApp {
    pub async fn new() -> Self {
        let token_store = HashMapConfirmationTokenStore::new();
        let email_client = MockEmailClient::new();

        let app_user_service = AppUserService::new(
            HashMapAppUserStore::new(),
            ConfirmationTokenService::new(token_store.clone()),
            Argon2PasswordHasher::new(),
        );
        let registration_service = RegistrationService::new(
            RegexEmailValidator,
            app_user_service,
            ConfirmationTokenService::new(token_store),
            email_client.clone(),
            test::CONFIRMATION_BASE_URL,
        );

        let listener = tokio::net::TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        let service = EnrolService::new(registration_service);
        tokio::spawn(async move {
            service
                .run_standalone(listener, None)
                .await
                .expect("Enrol service stopped");
        });

        Self {
            address,
            http_client: reqwest::Client::new(),
            email_client,
        }
    }

    pub async fn post_registration(&self, body: &Value) -> reqwest::Response {
        self.http_client
            .post(format!("{}/api/v1/registration", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_confirm(&self, token: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}/api/v1/registration/confirm", &self.address))
            .query(&[("token", token)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_login(&self, body: &Value) -> reqwest::Response {
        self.http_client
            .post(format!("{}/api/v1/login", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register an account and return the token from the response body.
    pub async fn register(&self, email: &str, password: &str) -> String {
        let response = self
            .post_registration(&registration_body(email, password))
            .await;
        assert_eq!(response.status().as_u16(), 201);

        let body: Value = response.json().await.unwrap();
        body["token"].as_str().unwrap().to_owned()
    }
}

pub fn registration_body(email: &str, password: &str) -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": email,
        "password": password,
    })
}

pub async fn error_message(response: reqwest::Response) -> String {
    let body: Value = response.json().await.unwrap();
    body["error"].as_str().unwrap().to_owned()
}

use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post},
};
use enrol_adapters::{
    config::AllowedOrigins,
    http::routes::{confirm, login, register},
};
use enrol_application::RegistrationService;
use enrol_core::{AppUserStore, ConfirmationTokenStore, EmailClient, EmailValidator, PasswordHasher};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::telemetry::{make_span_with_request_id, on_request, on_response};

/// Registration HTTP service: sign-up, email confirmation and login routes
pub struct EnrolService {
    router: Router,
}

impl EnrolService {
    /// Create a new EnrolService around a fully wired registration service
    ///
    /// # Arguments
    /// * `registration_service` - Registration use case; its inner
    ///   `AppUserService` also backs the login route
    ///
    /// # Note on Architecture
    /// Stores implement Clone via internal Arc<RwLock> or a pooled connection,
    /// so each route gets its own cheap copy of the state it needs.
    pub fn new<V, U, T, H, E>(registration_service: RegistrationService<V, U, T, H, E>) -> Self
    where
        V: EmailValidator + Clone + 'static,
        U: AppUserStore + Clone + 'static,
        T: ConfirmationTokenStore + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
        E: EmailClient + Clone + 'static,
    {
        let app_user_service = registration_service.app_user_service().clone();

        let router = Router::new()
            .route("/api/v1/registration", post(register::<V, U, T, H, E>))
            .route(
                "/api/v1/registration/confirm",
                get(confirm::<V, U, T, H, E>),
            )
            .with_state(registration_service)
            // Login only needs the account service
            .route("/api/v1/login", post(login::<U, T, H>))
            .with_state(app_user_service);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the EnrolService into a router that can be nested into another application
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins.filter(|origins| !origins.is_empty()) {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the service as a standalone server on the given listener
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Enrol service listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}

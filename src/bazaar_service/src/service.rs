use axum::{
    Router,
    http::{HeaderValue, Method, request},
    middleware,
    routing::{get, post},
};
use bazaar_adapters::{JwtAuthConfig, config::AllowedOrigins};
use bazaar_axum::{RoleGate, StorefrontState, require_roles, routes};
use bazaar_core::{AllowedRoles, PasswordHasher, UserStore};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The storefront API: public account routes, the admin user-management
/// group and the signed-in user's profile group.
pub struct StorefrontService {
    router: Router,
}

impl StorefrontService {
    /// Assemble every route over one shared state.
    ///
    /// # Arguments
    /// * `user_store` - Store for user records (must be Clone)
    /// * `hasher` - Password hasher (must be Clone)
    /// * `jwt_config` - Secret and lifetime for signing and verifying tokens
    /// * `password_reset_ttl` - How long a password reset token stays valid
    ///
    /// Admin routes are gated on [`AllowedRoles::ADMIN_ONLY`], profile routes
    /// on [`AllowedRoles::ANY`]. Signup, login, password reset and the
    /// first-admin bootstrap stay public.
    pub fn new<U, H>(
        user_store: U,
        hasher: H,
        jwt_config: JwtAuthConfig,
        password_reset_ttl: chrono::Duration,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
    {
        let state = StorefrontState::new(user_store, hasher, jwt_config, password_reset_ttl);

        let admin = Router::new()
            .route(
                "/admin/users",
                get(routes::list_users::<U, H>).post(routes::create_user::<U, H>),
            )
            .route(
                "/admin/users/{id}",
                get(routes::get_user::<U, H>)
                    .patch(routes::update_user::<U, H>)
                    .delete(routes::delete_user::<U, H>),
            )
            .route("/admin/users/{id}/promote", post(routes::promote::<U, H>))
            .route("/admin/users/{id}/demote", post(routes::demote::<U, H>))
            .route("/admin/stats", get(routes::user_stats::<U, H>))
            .route_layer(middleware::from_fn_with_state(
                RoleGate::new(state.clone(), AllowedRoles::ADMIN_ONLY),
                require_roles::<U, H>,
            ));

        let profile = Router::new()
            .route(
                "/users/profile",
                get(routes::get_profile::<U, H>).patch(routes::update_profile::<U, H>),
            )
            .route_layer(middleware::from_fn_with_state(
                RoleGate::new(state.clone(), AllowedRoles::ANY),
                require_roles::<U, H>,
            ));

        let router = Router::new()
            .route("/", get(routes::root))
            .route("/auth/signup", post(routes::signup::<U, H>))
            .route("/auth/login", post(routes::login::<U, H>))
            .route(
                "/auth/password-reset-request",
                post(routes::request_password_reset::<U, H>),
            )
            .route("/auth/password-reset", post(routes::reset_password::<U, H>))
            .route(
                "/admin/setup/first-admin",
                post(routes::create_first_admin::<U, H>),
            )
            .merge(admin)
            .merge(profile)
            .with_state(state);

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

    /// Convert the service into a router that can be mounted on another
    /// router.
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                ])
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

    /// Run the service as a standalone server.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Storefront listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}

use std::sync::Arc;

use axum::{
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::{AuthError, AuthorizationGuard, TokenCodec};
use crate::config::{AppConfig, Environment};
use crate::database::Storage;
use crate::handlers::{protected, public};
use crate::middleware::require_account_owner;

/// Shared, read-only application context. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub guard: AuthorizationGuard,
    pub store: Arc<dyn Storage>,
}

impl AppState {
    /// Fails only when the configured secret cannot sign tokens.
    pub fn new(config: AppConfig, store: Arc<dyn Storage>) -> Result<Self, AuthError> {
        let codec = TokenCodec::new(&config.security.jwt_secret)?;
        Ok(Self {
            config: Arc::new(config),
            guard: AuthorizationGuard::new(Arc::new(codec)),
            store,
        })
    }

    pub fn tokens(&self) -> &TokenCodec {
        self.guard.codec()
    }

    /// Validated when the configuration was loaded.
    pub fn token_ttl(&self) -> chrono::Duration {
        self.config.security.token_ttl
    }
}

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    let mut app = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Account-scoped, guarded by token ownership
        .merge(protected_routes(state.clone()));

    // Global middleware
    if state.config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app.layer(ServiceBuilder::new().layer(cors)).with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(public::login_post))
        .route("/accounts", get(public::accounts_get).post(public::accounts_post))
        .route("/events", get(public::events_get).post(public::events_post))
        .route("/events/:id", get(public::event_get))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/accounts/:id",
            get(protected::account_get).delete(protected::account_delete),
        )
        .route("/accounts/:id/tickets", get(protected::account_tickets_get))
        .route_layer(middleware::from_fn_with_state(state, require_account_owner))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Nitelife API",
            "version": version,
            "description": "Accounts, events and tickets",
            "endpoints": {
                "login": "POST /login (public - token acquisition)",
                "accounts": "GET|POST /accounts (public)",
                "account": "GET|DELETE /accounts/:id (owner token)",
                "tickets": "GET /accounts/:id/tickets (owner token)",
                "events": "GET|POST /events, GET /events/:id (public)",
            },
            "listing": "filter with field=value or field__{ne,gt,gte,lt,lte,like,contains}=value; sort=field[:asc|desc],..."
        }
    }))
}

async fn health(axum::extract::State(state): axum::extract::State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}

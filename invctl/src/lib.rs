//! # invctl: Inventory Control Panel Backend
//!
//! `invctl` is the backend for an inventory/asset-tracking admin panel:
//! authenticated staff review arrival groups (shipments) and the products
//! tracked within them, manage staff accounts, and edit their own
//! profile. It exposes a JSON API consumed by a single-page frontend,
//! which is served as an embedded static shell.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum)
//! for the HTTP layer and uses PostgreSQL for persistence.
//!
//! ### Request Flow
//!
//! Browser page navigations first pass the route guard
//! ([`auth::middleware`]), a deliberately cheap cookie-presence check
//! that redirects to the login page before any protected UI renders. It
//! is not a security boundary: every API request is independently
//! authenticated by the auth gate ([`auth::current_user`]), which
//! extracts a session token from the `Authorization` header or the
//! session cookie, verifies its signature and expiry, and yields the
//! caller's identity. Handlers then work through the repository layer
//! ([`db::handlers`]); transient database failures are retried a bounded
//! number of times ([`db::retry`]) before surfacing as opaque 500s.
//!
//! Sessions are stateless: a signed token carries the identity claim,
//! so verification needs no shared state and logout is a client-side
//! cookie clear. See [`auth::session`] for the trade-offs this implies.
//!
//! ### Core Components
//!
//! - **API layer** ([`api`]): REST handlers and the request/response
//!   models defining the wire contract
//! - **Authentication** ([`auth`]): session token codec, Argon2 password
//!   hashing, the per-request auth gate, and the page route guard
//! - **Database layer** ([`db`]): repositories over SQLx connections,
//!   entity models, the error taxonomy, and the retry policy
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use invctl::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = invctl::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     invctl::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! The application requires a PostgreSQL database and runs migrations on
//! startup via [`migrator`]. An initial admin account is seeded from the
//! `admin_email`/`admin_password` configuration so the panel is usable
//! before any other account exists.
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
mod static_assets;
pub mod telemetry;
mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use axum::{
    Router, ServiceExt,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};
use axum_prometheus::PrometheusMetricLayer;
use bon::Builder;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

use crate::{
    auth::password,
    config::CorsOrigin,
    db::handlers::Users,
    db::models::users::{ProfileUpdateDBRequest, UserCreateDBRequest},
    openapi::ApiDoc,
};

pub use config::Config;
pub use types::{GroupId, ProductId, UserId};

/// Application state shared across all request handlers.
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the invctl database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create the initial admin account if it doesn't exist.
///
/// The panel has no self-registration: accounts are provisioned
/// out-of-band, so a fresh deployment needs this seed to be usable at
/// all. Idempotent - an existing account keeps its row and gets its
/// password updated when one is configured. Returns the account id, or
/// `None` when no password is configured and no account exists yet.
#[instrument(skip_all)]
pub async fn create_initial_admin_user(
    email: &str,
    password: Option<&str>,
    db: &PgPool,
) -> anyhow::Result<Option<UserId>> {
    let mut conn = db.acquire().await?;
    let mut user_repo = Users::new(&mut conn);

    if let Some(existing) = user_repo.get_by_email(email).await? {
        if let Some(pwd) = password {
            let password_hash = password::hash_string(pwd)?;
            user_repo
                .update_profile(
                    existing.id,
                    &ProfileUpdateDBRequest {
                        name: existing.name.clone(),
                        email: existing.email.clone(),
                        password_hash: Some(password_hash),
                    },
                )
                .await?;
        }
        return Ok(Some(existing.id));
    }

    let Some(pwd) = password else {
        info!("No admin password configured and no account for {email} exists; skipping seed");
        return Ok(None);
    };

    let password_hash = password::hash_string(pwd)?;
    let created = user_repo
        .create(&UserCreateDBRequest {
            name: "Administrator".to_string(),
            email: email.to_string(),
            password_hash,
        })
        .await?;

    info!("Created initial admin account for {email}");
    Ok(Some(created.id))
}

/// Connect the pool, run migrations, and seed the initial admin account.
async fn setup_database(config: &Config) -> anyhow::Result<PgPool> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.database.pool.max_connections)
        .min_connections(config.database.pool.min_connections)
        .acquire_timeout(config.database.pool.acquire_timeout)
        .connect(&config.database.url)
        .await?;

    migrator().run(&pool).await?;

    create_initial_admin_user(&config.admin_email, config.admin_password.as_deref(), &pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create initial admin account: {}", e))?;

    Ok(pool)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.auth.cors.allowed_origins {
        let header_value = match origin {
            CorsOrigin::Wildcard => "*".parse::<axum::http::HeaderValue>()?,
            CorsOrigin::Url(url) => url.as_str().parse::<axum::http::HeaderValue>()?,
        };
        origins.push(header_value);
    }

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(config.auth.cors.allow_credentials);

    if let Some(max_age) = config.auth.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router with all endpoints and middleware.
///
/// - Authentication routes (login, logout)
/// - The panel API (groups, products, inventory, users, profile, dashboard)
/// - API docs at `/docs`
/// - Static shell serving with SPA fallback
/// - CORS, optional Prometheus metrics, and tracing middleware
///
/// The page route guard is NOT part of the router: it wraps the whole
/// service ahead of path matching (see [`Application::serve`]).
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let auth_routes = Router::new()
        .route("/api/auth/login", post(api::handlers::auth::login))
        .route("/api/auth/logout", post(api::handlers::auth::logout))
        .with_state(state.clone());

    // Every route here authenticates through the CurrentUser extractor
    let api_routes = Router::new()
        .route("/api/groups", get(api::handlers::groups::list_groups))
        .route("/api/groups/{id}", delete(api::handlers::groups::delete_group))
        .route("/api/products", get(api::handlers::products::list_products))
        .route(
            "/api/products/{id}",
            delete(api::handlers::products::delete_product),
        )
        .route("/api/inventory", get(api::handlers::products::inventory))
        .route("/api/users", get(api::handlers::users::list_users))
        .route("/api/users/{id}", delete(api::handlers::users::delete_user))
        .route("/api/user/profile", get(api::handlers::profile::get_profile))
        .route("/api/user/update", put(api::handlers::profile::update_profile))
        .route("/api/dashboard", get(api::handlers::dashboard::get_dashboard))
        .with_state(state.clone());

    // Serve embedded static assets, falling back to the SPA shell
    let fallback = get(api::handlers::static_assets::serve_embedded_asset)
        .fallback(get(api::handlers::static_assets::spa_fallback));

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .merge(auth_routes)
        .merge(api_routes)
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/docs"))
        .fallback_service(fallback);

    let mut router = router.layer(create_cors_layer(&state.config)?);

    if state.config.enable_metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route(
                "/internal/metrics",
                get(|| async move { metric_handle.render() }),
            )
            .layer(prometheus_layer);
    }

    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// 1. **Create**: [`Application::new`] connects the pool, runs
///    migrations, seeds the admin account, and builds the router
/// 2. **Serve**: [`Application::serve`] binds a TCP port and handles
///    requests until the shutdown future resolves
pub struct Application {
    router: Router,
    app_state: AppState,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting inventory panel with configuration: {:#?}", config);

        let pool = setup_database(&config).await?;

        let app_state = AppState::builder().db(pool.clone()).config(config.clone()).build();

        let router = build_router(&app_state)?;

        Ok(Self {
            router,
            app_state,
            config,
            pool,
        })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Inventory panel listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        // The page guard runs ahead of path matching so it sees every
        // browser navigation, including ones the router would 404
        let middleware = from_fn_with_state(self.app_state, auth::middleware::page_guard);
        let service = middleware.layer(self.router);

        axum::serve(listener, service.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}

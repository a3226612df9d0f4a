use std::net::SocketAddr;
use std::sync::Arc;

use castlist_db::repositories::TokenStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use castlist_api::app::build_app;
use castlist_api::auth::jwks::JwksVerifier;
use castlist_api::auth::jwt::HmacVerifier;
use castlist_api::auth::TokenVerifier;
use castlist_api::config::{AuthConfig, ServerConfig};
use castlist_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    // LOG_FORMAT=json switches to one JSON object per line for log shippers.
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "castlist_api=debug,tower_http=debug".into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = castlist_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    castlist_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    castlist_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Token verification ---
    let verifier = build_verifier(&config.auth);

    // --- Session token store ---
    let retention = chrono::Duration::seconds(config.token_retention_secs);
    let token_store = Arc::new(TokenStore::new(pool.clone(), retention));
    tracing::info!(retention_secs = config.token_retention_secs, "Session token store ready");

    // --- App state ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let state = AppState {
        pool,
        config: Arc::new(config),
        verifier,
        token_store,
    };

    let app = build_app(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Pick the verifier for the configured identity provider.
///
/// An Auth0 tenant takes precedence over the shared secret.
fn build_verifier(auth: &AuthConfig) -> Arc<dyn TokenVerifier> {
    match (&auth.auth0_domain, &auth.api_audience, &auth.jwt_secret) {
        (Some(domain), Some(audience), _) => {
            tracing::info!(%domain, %audience, "Verifying tokens against tenant key set");
            Arc::new(
                JwksVerifier::for_tenant(domain, audience)
                    .expect("Failed to build key set HTTP client"),
            )
        }
        (None, _, Some(secret)) => {
            tracing::warn!("AUTH0_DOMAIN not set, verifying HS256 tokens with JWT_SECRET");
            Arc::new(HmacVerifier::new(secret, None, auth.api_audience.as_deref()))
        }
        _ => panic!("Either AUTH0_DOMAIN with API_AUDIENCE, or JWT_SECRET, must be set"),
    }
}

/// Resolve on SIGINT, or on SIGTERM where the platform has it.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        () = interrupt => "SIGINT",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal, "Shutting down, draining in-flight requests");
}

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ucsb_api::{
    AppState,
    config::{AppConfig, Env},
    create_router,
    models::User,
};
use uuid::Uuid;

/// main
///
/// Initializes configuration, logging, storage and the HTTP server.
#[tokio::main]
async fn main() {
    // 1. Configuration (fail-fast in production)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging: RUST_LOG wins, otherwise sensible local defaults.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ucsb_api=debug,tower_http=info,axum=trace".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // JSON lines for the log aggregator.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 3. Storage: Postgres when configured, otherwise the in-memory store (local only).
    let app_state = match config.db_url.clone() {
        Some(db_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&db_url)
                .await
                .expect("FATAL: Failed to connect to Postgres. Check DATABASE_URL.");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .expect("FATAL: Failed to apply database migrations.");
            tracing::info!("Database migrations applied.");

            AppState::postgres(pool, config.clone())
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using the in-memory store. Data is lost on exit.");
            let state = AppState::in_memory(config.clone());
            seed_local_users(&state).await;
            state
        }
    };

    // 4. Router and server startup
    let app = create_router(app_state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .expect("FATAL: Failed to bind listener. Check BIND_ADDR.");

    tracing::info!("Listening on {}", config.bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at /swagger-ui");

    axum::serve(listener, app)
        .await
        .expect("FATAL: HTTP server terminated unexpectedly.");
}

/// Creates one admin and one regular account so the in-memory store is usable
/// through the `x-user-id` bypass. Their ids are logged at startup.
async fn seed_local_users(state: &AppState) {
    let accounts = [("admin@localhost", true), ("user@localhost", false)];
    for (email, admin) in accounts {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            admin,
        };
        match state.users.save_user(user).await {
            Ok(user) => tracing::info!("local account {} -> x-user-id: {}", user.email, user.id),
            Err(e) => tracing::error!("failed to seed local account {}: {}", email, e),
        }
    }
}

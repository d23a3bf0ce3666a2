// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{env, net::SocketAddr};

use tracing_subscriber::EnvFilter;

use verde_server::{
    api::router,
    auth::password,
    config,
    state::AppState,
    store::{self, UserRepository},
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));

    match env::var(config::LOG_FORMAT_ENV).as_deref() {
        Ok("json") => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

/// Create the admin account named by `ADMIN_EMAIL`/`ADMIN_PASSWORD` if it
/// does not already exist. An existing row is left untouched.
async fn seed_admin(state: &AppState) {
    let (Ok(email), Ok(admin_password)) = (
        env::var(config::ADMIN_EMAIL_ENV),
        env::var(config::ADMIN_PASSWORD_ENV),
    ) else {
        return;
    };

    let password_hash = match password::hash_password(&admin_password, state.bcrypt_cost) {
        Ok(hash) => hash,
        Err(_) => {
            tracing::error!("failed to hash admin seed password, skipping seed");
            return;
        }
    };

    match UserRepository::ensure_admin(&state.pool, &email, &password_hash).await {
        Ok(()) => tracing::info!(%email, "admin account ensured"),
        Err(error) => tracing::error!(%email, %error, "failed to seed admin account"),
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let database_url =
        env::var(config::DATABASE_URL_ENV).expect("DATABASE_URL must be set");
    let max_connections: u32 = env::var(config::DATABASE_MAX_CONNECTIONS_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(config::DEFAULT_DATABASE_MAX_CONNECTIONS);

    let pool = store::connect(&database_url, max_connections)
        .await
        .expect("failed to open database");
    store::run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    let bcrypt_cost: u32 = env::var(config::BCRYPT_COST_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(config::DEFAULT_BCRYPT_COST);

    let state = AppState::new(pool).with_bcrypt_cost(bcrypt_cost);
    seed_admin(&state).await;

    let app = router(state);

    let host = env::var(config::HOST_ENV).unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var(config::PORT_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(config::DEFAULT_PORT);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("failed to parse bind address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listen address");

    tracing::info!(%addr, "catalog server listening (docs at /docs)");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server failed");
}

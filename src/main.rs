//! Ringside service entry point.
//!
//! Loads configuration, wires the PostgreSQL adapters to the ledger
//! handlers, and serves the REST API.

use std::sync::Arc;

use http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use ringside::adapters::auth::JwtSessionValidator;
use ringside::adapters::clock::SystemClock;
use ringside::adapters::http::bookings::BookingsAppState;
use ringside::adapters::http::profile::ProfileAppState;
use ringside::adapters::http::slots::SlotsAppState;
use ringside::adapters::http::{api_router, middleware::AuthState};
use ringside::adapters::postgres::{
    PostgresBookingRepository, PostgresSlotStore, PostgresSubscriptionAccount,
};
use ringside::config::AppConfig;
use ringside::ports::{BookingRepository, Clock, SlotStore, SubscriptionAccount};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let slots: Arc<dyn SlotStore> = Arc::new(PostgresSlotStore::new(pool.clone()));
    let subscriptions: Arc<dyn SubscriptionAccount> =
        Arc::new(PostgresSubscriptionAccount::new(pool.clone()));
    let bookings: Arc<dyn BookingRepository> = Arc::new(PostgresBookingRepository::new(pool));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
    let validator: AuthState = Arc::new(JwtSessionValidator::new(&config.auth));

    let app = api_router(
        SlotsAppState {
            slots: slots.clone(),
            clock: clock.clone(),
        },
        BookingsAppState {
            slots: slots.clone(),
            subscriptions: subscriptions.clone(),
            bookings: bookings.clone(),
            clock: clock.clone(),
            policy: config.booking.cancellation_policy(),
        },
        ProfileAppState {
            slots,
            subscriptions,
            bookings,
            clock,
        },
        validator,
    )
    .layer(TraceLayer::new_for_http())
    .layer(cors_layer(&config)?);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "ringside listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(config: &AppConfig) -> Result<CorsLayer, http::header::InvalidHeaderValue> {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = origins
        .iter()
        .map(|o| o.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}

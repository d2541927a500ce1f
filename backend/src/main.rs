//! Backend entry-point: loads configuration, prepares the database and
//! serves the REST API.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use kpi_backend::config::AppSettings;
use kpi_backend::inbound::http::health::HealthState;
use kpi_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|e| io::Error::other(e.to_string()))?;
    let database_url = settings.database_url().map_err(io::Error::other)?;
    let jwt_secret = settings.jwt_secret().map_err(io::Error::other)?;
    if jwt_secret.is_ephemeral() {
        warn!("KPI_JWT_SECRET unset; using a random signing key, tokens will not survive a restart");
    }

    if settings.skip_migrations {
        info!("skipping migrations");
    } else {
        let applied = run_pending_migrations(database_url)
            .await
            .map_err(io::Error::other)?;
        info!(applied, "migrations complete");
    }

    let pool_config = PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
    let pool = DbPool::new(pool_config).await.map_err(io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let db_ready = match pool.ping().await {
        Ok(()) => {
            info!("database connection established");
            true
        }
        Err(e) => {
            warn!(error = %e, "database ping failed; readiness will stay down");
            false
        }
    };

    let bind_addr = (settings.host().to_owned(), settings.port());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(bind_addr, pool, jwt_secret),
    )?;
    if !db_ready {
        health_state.mark_not_ready();
    }
    server.await
}

//! Create a user account out-of-band, e.g. the first administrator.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;

use clap::Parser;
use tokio::runtime::Builder;

use kpi_backend::domain::ports::{PasswordVerifier, UserRepository, UserRepositoryError};
use kpi_backend::domain::{NewUser, UserRole};
use kpi_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
use kpi_backend::outbound::security::BcryptPasswordVerifier;

const PASSWORD_ENV: &str = "KPI_NEW_USER_PASSWORD";
const DATABASE_URL_ENV: &str = "KPI_DATABASE_URL";

/// `create-user` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "create-user",
    about = "Create a KPI backend user account",
    version
)]
struct CliArgs {
    /// Account email; also accepted as the login identifier.
    #[arg(long, value_name = "address")]
    email: String,
    /// Password. Falls back to `KPI_NEW_USER_PASSWORD` when omitted.
    #[arg(long, value_name = "secret")]
    password: Option<String>,
    /// Optional login id such as a guard code.
    #[arg(long = "login-id", value_name = "id")]
    login_id: Option<String>,
    /// Display name. Defaults to the email address.
    #[arg(long, value_name = "name")]
    name: Option<String>,
    /// `user` or `admin`.
    #[arg(long, value_name = "role", default_value = "admin")]
    role: UserRole,
    /// Database connection URL. Falls back to `KPI_DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let password = resolve_setting(args.password, PASSWORD_ENV, "--password")?;
    let database_url = resolve_setting(args.database_url, DATABASE_URL_ENV, "--database-url")?;

    let password_hash = BcryptPasswordVerifier::default()
        .hash(&password)
        .map_err(|error| io::Error::other(format!("hash password: {error}")))?;
    let name = args.name.as_deref().unwrap_or(&args.email);
    let new_user = NewUser::try_new(
        args.login_id.as_deref(),
        name,
        &args.email,
        password_hash,
        args.role,
    )
    .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error.to_string()))?;

    let pool = DbPool::new(PoolConfig::new(&database_url).with_max_size(1))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
    let users = DieselUserRepository::new(pool);

    let user = users.insert(&new_user).await.map_err(|error| match error {
        UserRepositoryError::Duplicate { .. } => io::Error::new(
            io::ErrorKind::AlreadyExists,
            "a user with this email or login id already exists",
        ),
        other => io::Error::other(format!("insert user: {other}")),
    })?;

    println!("id={}", user.id);
    println!("email={}", user.email);
    println!("role={}", user.role);
    Ok(())
}

/// Prefer the explicit flag, else the environment variable; blank values are
/// rejected.
fn resolve_setting(explicit: Option<String>, env_key: &str, flag: &str) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{flag} must not be empty when provided"),
            ));
        }
        return Ok(value);
    }

    let from_env = env::var(env_key).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("missing value: set {flag} or {env_key}"),
        )
    })?;
    if from_env.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{env_key} must not be empty"),
        ));
    }
    Ok(from_env)
}

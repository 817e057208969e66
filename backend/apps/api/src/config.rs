//! Server Configuration
//!
//! Everything the binary reads from the environment (after `.env` is loaded).

use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use sqlx::postgres::PgConnectOptions;

const DEFAULT_PORT: u16 = 3000;

/// Which user store backs the auth routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Postgres,
    /// Process-local; data is lost on restart
    Memory,
}

pub struct ApiConfig {
    pub port: u16,
    pub storage: Storage,
    /// Only set for `Storage::Postgres`
    pub database: Option<PgConnectOptions>,
    /// Empty means any origin
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {raw:?}"))?,
            None => DEFAULT_PORT,
        };

        let storage = match var("AUTH_STORAGE").as_deref().map(str::trim) {
            None | Some("postgres") => Storage::Postgres,
            Some("memory") => Storage::Memory,
            Some(other) => bail!("AUTH_STORAGE must be `postgres` or `memory`, got {other:?}"),
        };

        let database = match storage {
            Storage::Postgres => Some(database_options(&var)?),
            Storage::Memory => None,
        };

        let frontend_origins = var("FRONTEND_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let mut auth = match var("SECRET") {
            Some(secret) => AuthConfig::new(secret.into_bytes()),
            None if cfg!(debug_assertions) => {
                tracing::warn!("SECRET not set, using a random signing secret for this process");
                AuthConfig::development()
            }
            None => bail!("SECRET must be set in production"),
        };

        if let Some(raw) = var("TOKEN_TTL_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .with_context(|| format!("TOKEN_TTL_SECS must be a positive integer, got {raw:?}"))?;
            auth = auth.with_token_ttl(Duration::from_secs(secs));
        }

        if let Some(pepper) = var("PASSWORD_PEPPER") {
            auth = auth.with_pepper(pepper.into_bytes());
        }

        Ok(Self {
            port,
            storage,
            database,
            frontend_origins,
            auth,
        })
    }
}

/// `DATABASE_URL`, or assembled from the `DB_*` parts
///
/// Parts are set field by field, so credentials need no URL escaping.
fn database_options<F>(var: &F) -> anyhow::Result<PgConnectOptions>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = var("DATABASE_URL") {
        return url
            .trim()
            .parse::<PgConnectOptions>()
            .context("DATABASE_URL is not a valid postgres URL");
    }

    let part = |key: &str| {
        var(key).with_context(|| format!("{key} must be set when DATABASE_URL is not"))
    };
    let user = part("DB_USER")?;
    let pass = part("DB_PASS")?;
    let host = part("DB_HOST")?;
    let name = part("DB_NAME")?;
    let port = match var("DB_PORT") {
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .with_context(|| format!("DB_PORT must be a port number, got {raw:?}"))?,
        None => 5432,
    };

    Ok(PgConnectOptions::new()
        .host(&host)
        .port(port)
        .username(&user)
        .password(&pass)
        .database(&name))
}

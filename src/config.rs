//! Environment-driven configuration.

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub nats_url: Option<String>,
}

impl Config {
    /// Reads configuration from the environment. `.env` is honored when
    /// present. `DATABASE_URL` is the only required variable.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().context("PORT is not a valid port number")?,
            Err(_) => 8083,
        };
        let nats_url = std::env::var("NATS_URL").ok();

        Ok(Self {
            database_url,
            port,
            nats_url,
        })
    }
}

use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub swapi_base_url: String,
    pub swapi_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "8000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://starfilms.db?mode=rwc".to_string());

        let swapi_base_url =
            std::env::var("SWAPI_BASE_URL").unwrap_or_else(|_| "https://swapi.dev/api".to_string());

        let swapi_timeout_secs: u64 = match std::env::var("SWAPI_TIMEOUT_SECS") {
            Ok(s) => s.parse().context("SWAPI_TIMEOUT_SECS")?,
            Err(_) => 10,
        };

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            swapi_base_url,
            swapi_timeout_secs,
        })
    }
}

use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use rand::{rngs::OsRng, RngCore};

use crate::auth::decode_secret_key;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub jwt_secret: Vec<u8>,
    pub token_ttl: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let listen_addr: SocketAddr = std::env::var("GG_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid GG_LISTEN_ADDR")?;
        let db_path = std::env::var("GG_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("GG_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("GG_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let ttl_minutes: u64 = std::env::var("GG_TOKEN_TTL_MINUTES")
            .unwrap_or_else(|_| "1440".into())
            .parse()
            .unwrap_or(1440);

        let jwt_secret = match std::env::var("GG_JWT_SECRET") {
            Ok(raw) => decode_secret_key(&raw).context("Invalid GG_JWT_SECRET")?,
            Err(_) => {
                tracing::warn!(
                    "GG_JWT_SECRET is not set; using a random secret. Tokens will not survive a restart."
                );
                random_secret()
            }
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            token_ttl: Duration::from_secs(ttl_minutes * 60),
        })
    }
}

pub fn random_secret() -> Vec<u8> {
    let mut secret = vec![0u8; 32];
    OsRng.fill_bytes(&mut secret);
    secret
}

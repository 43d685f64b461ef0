use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

use url::Url;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub api_root: Url,
    pub notification_ttl: Duration,
    pub static_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let listen_addr: SocketAddr = env::var("APP_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        let api_root = parse_api_root(
            &env::var("TRAVEL_API_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8080/api/travels".to_string()),
        )?;

        let ttl_secs: u64 = env::var("NOTIFICATION_TTL_SECS")
            .unwrap_or_else(|_| "3".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid NOTIFICATION_TTL_SECS: {err}")))?;

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));

        Ok(Self {
            listen_addr,
            api_root,
            notification_ttl: Duration::from_secs(ttl_secs),
            static_dir,
        })
    }
}

pub fn parse_api_root(raw: &str) -> Result<Url, AppError> {
    let url =
        Url::parse(raw).map_err(|err| AppError::Config(format!("invalid TRAVEL_API_URL: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(AppError::Config(format!(
            "TRAVEL_API_URL must be an http(s) URL, got {raw}"
        )));
    }
    Ok(url)
}

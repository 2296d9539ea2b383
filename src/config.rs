use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{validation_error, Error};

const DEFAULT_MAPS_API_BASE: &str = "https://maps.googleapis.com";
const DEFAULT_ROUTES_API_BASE: &str = "https://routes.googleapis.com";
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub maps_api_base: String,
    pub routes_api_base: String,
    pub listen_addr: SocketAddr,
    pub timeout: Duration,
}

impl Config {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let api_key = env::var("GOOGLE_MAPS_API_KEY")?;

        let maps_api_base = env::var("GOOGLE_MAPS_API_BASE")
            .unwrap_or_else(|_| DEFAULT_MAPS_API_BASE.into());
        let routes_api_base = env::var("GOOGLE_ROUTES_API_BASE")
            .unwrap_or_else(|_| DEFAULT_ROUTES_API_BASE.into());

        let listen_addr = env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.into())
            .parse()
            .map_err(|_| validation_error("LISTEN_ADDR is not a socket address"))?;

        let timeout = match env::var("PROVIDER_TIMEOUT_SECS") {
            Ok(secs) => secs
                .parse()
                .map_err(|_| validation_error("PROVIDER_TIMEOUT_SECS is not a number"))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            maps_api_base: trim_base(maps_api_base),
            routes_api_base: trim_base(routes_api_base),
            listen_addr,
            timeout: Duration::from_secs(timeout),
        })
    }

    /// Configuration pointing both Google endpoints at one base URL.
    pub fn with_base(api_key: &str, base: &str) -> Self {
        Self {
            api_key: api_key.into(),
            maps_api_base: trim_base(base.into()),
            routes_api_base: trim_base(base.into()),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn trim_base(base: String) -> String {
    base.trim_end_matches('/').to_string()
}

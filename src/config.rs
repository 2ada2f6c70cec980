use std::{
    env,
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};

use crate::error::AppError;

const DEFAULT_DATABASE: &str = "trips.db";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub listen_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let database_path = env::var("DATABASE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATABASE));

        let host: IpAddr = env::var("HOST")
            .unwrap_or_else(|_| DEFAULT_HOST.to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid HOST: {err}")))?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|err| AppError::Config(format!("invalid PORT {raw:?}: {err}")))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            database_path,
            listen_addr: SocketAddr::new(host, port),
        })
    }
}

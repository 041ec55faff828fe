use clap::{Parser, ValueEnum};
use hashlink_telemetry::LogFormat;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::state::RuntimeMode;

pub const HOST_ENV: &str = "HASHLINK_HOST";
pub const PORT_ENV: &str = "PORT";
pub const MODE_ENV: &str = "HASHLINK_MODE";
pub const STORAGE_BACKEND_ENV: &str = "HASHLINK_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "HASHLINK_MYSQL_DSN";
pub const LOG_FORMAT_ENV: &str = "HASHLINK_LOG_FORMAT";
pub const ENV_FILE_ENV: &str = "HASHLINK_ENV_FILE";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "hashlink-gateway")]
pub struct Cli {
    #[arg(long, env = HOST_ENV, default_value = DEFAULT_HOST)]
    pub host: IpAddr,

    #[arg(long, env = PORT_ENV, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, env = MODE_ENV, value_enum, default_value_t = RuntimeMode::Production)]
    pub mode: RuntimeMode,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    #[arg(long, env = LOG_FORMAT_ENV, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Loads variables from `HASHLINK_ENV_FILE` or `.env` into the process
/// environment. Variables that are already set win.
///
/// Returns the path that was loaded, if any.
pub fn load_env_file() -> Result<Option<PathBuf>, dotenvy::Error> {
    load_env_file_from(std::env::var(ENV_FILE_ENV).ok().as_deref())
}

/// A file named explicitly must exist and parse. The implicit `.env` may be
/// absent, but a present one that fails to parse is still an error.
fn load_env_file_from(explicit: Option<&str>) -> Result<Option<PathBuf>, dotenvy::Error> {
    match explicit {
        Some(path) => dotenvy::from_filename(path).map(Some),
        None => match dotenvy::dotenv() {
            Ok(path) => Ok(Some(path)),
            Err(dotenvy::Error::Io(err)) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        },
    }
}

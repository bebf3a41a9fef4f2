//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "vetrina";
const ENV_PREFIX: &str = "VETRINA";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PUBLIC_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 8;
const DEFAULT_CACHE_LISTING_LIMIT: usize = 256;
const DEFAULT_BRAND_TITLE: &str = "Vetrina";
const DEFAULT_FOOTER_COPY: &str = "Powered by Vetrina";

/// Command-line arguments for the Vetrina binary.
#[derive(Debug, Parser)]
#[command(name = "vetrina", version, about = "Vetrina content platform server")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "VETRINA_CONFIG_FILE", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the HTTP service.
    Serve(Box<ServeArgs>),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    /// Override the public listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the public listener port.
    #[arg(long = "server-public-port", value_name = "PORT")]
    pub public_port: Option<u16>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the database connection URL.
    #[arg(long = "database-url", value_name = "URL")]
    pub database_url: Option<String>,

    /// Override the database pool size.
    #[arg(long = "database-max-connections", value_name = "COUNT")]
    pub database_max_connections: Option<u32>,

    /// Toggle the block-listing cache.
    #[arg(
        long = "cache-enabled",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub cache_enabled: Option<bool>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("configuration could not be loaded: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl SettingsError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub public_addr: SocketAddr,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub enabled: bool,
    pub listing_limit: usize,
}

/// Site chrome values. Settings CRUD is out of scope for this service, so
/// the shared header/footer read from static configuration.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub brand_title: String,
    pub footer_copy: String,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
    pub cache: CacheSettings,
    pub site: SiteSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    server: RawServer,
    database: RawDatabase,
    logging: RawLogging,
    cache: RawCache,
    site: RawSite,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawServer {
    host: Option<String>,
    public_port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDatabase {
    url: Option<String>,
    max_connections: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLogging {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCache {
    enabled: Option<bool>,
    listing_limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSite {
    brand_title: Option<String>,
    footer_copy: Option<String>,
}

/// Parse CLI arguments and resolve the layered configuration.
pub fn load_with_cli() -> Result<(CliArgs, Settings), SettingsError> {
    let cli_args = CliArgs::parse();
    let overrides = match &cli_args.command {
        Some(Command::Serve(args)) => args.overrides.clone(),
        None => ServeOverrides::default(),
    };
    let settings = load(cli_args.config_file.as_deref(), &overrides)?;
    Ok((cli_args, settings))
}

pub fn load(
    config_file: Option<&std::path::Path>,
    overrides: &ServeOverrides,
) -> Result<Settings, SettingsError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path));
    }

    let raw: RawSettings = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?
        .try_deserialize()?;

    resolve(raw, overrides)
}

fn resolve(raw: RawSettings, overrides: &ServeOverrides) -> Result<Settings, SettingsError> {
    let host = overrides
        .server_host
        .clone()
        .or(raw.server.host)
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = overrides
        .public_port
        .or(raw.server.public_port)
        .unwrap_or(DEFAULT_PUBLIC_PORT);
    let public_addr = format!("{host}:{port}")
        .parse::<SocketAddr>()
        .map_err(|err| SettingsError::invalid("server.host", err.to_string()))?;

    let level_source = overrides
        .log_level
        .clone()
        .or(raw.logging.level)
        .unwrap_or_else(|| "info".to_string());
    let level = LevelFilter::from_str(&level_source)
        .map_err(|err| SettingsError::invalid("logging.level", err.to_string()))?;
    let json = overrides.log_json.or(raw.logging.json).unwrap_or(false);
    let format = if json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(Settings {
        server: ServerSettings { public_addr },
        database: DatabaseSettings {
            url: overrides.database_url.clone().or(raw.database.url),
            max_connections: overrides
                .database_max_connections
                .or(raw.database.max_connections)
                .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
        },
        logging: LoggingSettings { level, format },
        cache: CacheSettings {
            enabled: overrides.cache_enabled.or(raw.cache.enabled).unwrap_or(true),
            listing_limit: raw
                .cache
                .listing_limit
                .unwrap_or(DEFAULT_CACHE_LISTING_LIMIT),
        },
        site: SiteSettings {
            brand_title: raw
                .site
                .brand_title
                .unwrap_or_else(|| DEFAULT_BRAND_TITLE.to_string()),
            footer_copy: raw
                .site
                .footer_copy
                .unwrap_or_else(|| DEFAULT_FOOTER_COPY.to_string()),
        },
    })
}

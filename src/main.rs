use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod catalog;
use catalog::load_catalog;

mod config;
use config::{AppConfig, CliConfig, FileConfig};

mod quiz;
use quiz::QuizSession;

mod result_store;
use result_store::SqliteResultStore;

mod server;
use server::{run_server, RequestsLoggingLevel};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the JSON artwork catalog file.
    #[clap(value_parser = parse_path)]
    pub catalog_path: PathBuf,

    /// Directory holding the quiz result database.
    #[clap(value_parser = parse_path)]
    pub db_dir: PathBuf,

    /// Optional TOML config file; its values override the CLI.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        catalog_path: Some(cli_args.catalog_path),
        db_dir: Some(cli_args.db_dir),
        port: cli_args.port,
        logging_level: cli_args.logging_level,
        frontend_dir_path: cli_args.frontend_dir_path,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Loading artwork catalog from {:?}...", config.catalog_path);
    let catalog = Arc::new(load_catalog(&config.catalog_path)?);

    info!(
        "Opening quiz result database at {:?}...",
        config.result_db_path()
    );
    let result_store = Arc::new(SqliteResultStore::new(config.result_db_path())?);

    let quiz_session = QuizSession::new(catalog.clone(), result_store)?;
    if quiz_session.quiz_result().is_some() {
        info!("A previous quiz result is available.");
    }

    info!("Ready to serve at port {}!", config.port);
    run_server(
        catalog,
        quiz_session,
        config.logging_level,
        config.port,
        config.frontend_dir_path,
    )
    .await
}

//! Homework bot — watches the review status of homework submissions and
//! reports every change to a Telegram chat.
//!
//! Secrets come from the environment (or a `.env` file):
//! `PRACTICUM_TOKEN`, `TELEGRAM_TOKEN`, `TELEGRAM_CHAT_ID`. The process
//! refuses to start when any of them is missing; after that it polls
//! until killed.

use anyhow::{Context, Result};
use clap::Parser;
use common::config::{ConfigError, Secrets};
use std::path::{Path, PathBuf};
use std::time::Duration;
use telegram::TelegramNotifier;
use tracing::{error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracker::{PracticumClient, Poller, DEFAULT_ENDPOINT};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Homework status API endpoint.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    /// Seconds to wait between poll cycles.
    #[arg(
        long,
        default_value_t = tracker::DEFAULT_RETRY_INTERVAL.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    retry_secs: u64,
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    request_timeout_secs: u64,
    /// Also write logs to this file, rotated daily.
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_tracing(&args)?;

    info!("📚 Homework bot v{}", env!("CARGO_PKG_VERSION"));

    let secrets = check_tokens(|name| std::env::var(name).ok())?;

    let source = PracticumClient::new(
        &args.endpoint,
        &secrets.practicum_token,
        Duration::from_secs(args.request_timeout_secs),
    )
    .context("Failed to build HTTP client")?;
    let notifier = TelegramNotifier::new(&secrets.telegram_token, &secrets.telegram_chat_id);

    info!(endpoint = %args.endpoint, chat = %secrets.telegram_chat_id, "Configuration loaded");

    let poller = Poller::new(
        Box::new(source),
        Box::new(notifier),
        chrono::Utc::now().timestamp(),
        Duration::from_secs(args.retry_secs),
    );
    poller.run().await;

    Ok(())
}

/// Number of rotated log files kept next to `--log-file`.
const MAX_LOG_FILES: usize = 5;

/// Startup precondition: every secret must be present before polling.
fn check_tokens<F>(lookup: F) -> Result<Secrets>
where
    F: Fn(&str) -> Option<String>,
{
    match Secrets::from_lookup(lookup) {
        Ok(secrets) => Ok(secrets),
        Err(ConfigError::MissingVars(vars)) => {
            for var in &vars {
                error!(variable = *var, "Missing required environment variable");
            }
            anyhow::bail!("missing required tokens ({}), update the .env file", vars.join(", "))
        }
    }
}

/// Daily-rotated appender for `path`: `logs/main.log` becomes
/// `logs/main.<date>.log`, keeping the newest [`MAX_LOG_FILES`].
fn file_appender(path: &Path) -> Result<RollingFileAppender> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let prefix = path
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("Invalid log file name {}", path.display()))?;

    let mut builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .max_log_files(MAX_LOG_FILES);
    if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
        builder = builder.filename_suffix(ext);
    }

    builder
        .build(dir)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

fn init_tracing(args: &Args) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let (writer, ansi) = match &args.log_file {
        Some(path) => {
            let appender = file_appender(path)?;
            (BoxMakeWriter::new(std::io::stdout.and(appender)), false)
        }
        None => (BoxMakeWriter::new(std::io::stdout), true),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer);

    if args.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

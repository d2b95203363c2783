mod logging;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use std::future::Future;
use std::io;
use std::sync::Arc;
use tgloop_core::{
    config::{self, Config},
    traits::{Bot, BotApi},
};
use tgloop_runtime::{bots, LongPollingRunner, StopHandle};
use tgloop_transport::Telegram;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "tgloop",
    version,
    about = "Run a Telegram bot over long polling"
)]
struct Cli {
    /// Telegram bot token.
    #[arg(short, long, env = "TGLOOP_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Long-polling updates limit (default: 100).
    #[arg(long)]
    limit: Option<u32>,

    /// Long-polling timeout in seconds (default: 5).
    #[arg(long)]
    timeout: Option<u32>,

    /// Logging level (default: info).
    #[arg(short, long, value_enum)]
    verbosity: Option<Verbosity>,

    /// Log file (default: stderr).
    #[arg(short, long)]
    log_file: Option<String>,

    /// Path to config file.
    #[arg(short, long, default_value = "tgloop.toml")]
    config: String,

    /// Remove any webhook before polling.
    #[arg(long)]
    delete_webhook: bool,

    /// Bot to run (default: simple).
    #[arg(value_name = "BOT")]
    bot: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Verbosity {
    Debug,
    Info,
    Warning,
    Error,
}

impl Verbosity {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl Cli {
    /// Command-line values take precedence over the config file.
    fn apply(&self, cfg: &mut Config) {
        if let Some(ref token) = self.token {
            cfg.bot.token = token.clone();
        }
        if let Some(ref bot) = self.bot {
            cfg.bot.handler = bot.clone();
        }
        if let Some(limit) = self.limit {
            cfg.polling.limit = limit;
        }
        if let Some(timeout) = self.timeout {
            cfg.set_poll_timeout(timeout);
        }
        if let Some(verbosity) = self.verbosity {
            cfg.log.level = verbosity.as_str().to_string();
        }
        if let Some(ref file) = self.log_file {
            cfg.log.file = Some(file.clone());
        }
    }
}

/// Resolve a bot name, failing the way clap reports bad arguments.
fn select_bot(name: &str) -> Result<Arc<dyn Bot>, clap::Error> {
    bots::by_name(name).ok_or_else(|| {
        Cli::command().error(
            ErrorKind::InvalidValue,
            format!(
                "unknown bot '{name}', expected one of: {}",
                bots::NAMES.join(", ")
            ),
        )
    })
}

/// First interrupt asks the runner to stop after the current cycle.
/// Returns `true` on a second interrupt, meaning exit without draining.
async fn handle_interrupts<S, F>(mut signal: S, stop: StopHandle) -> bool
where
    S: FnMut() -> F,
    F: Future<Output = io::Result<()>>,
{
    if signal().await.is_err() {
        return false;
    }
    info!("interrupted, waiting for the current cycle to finish (interrupt again to quit)");
    stop.stop();
    signal().await.is_ok()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load(&cli.config)?;
    cli.apply(&mut cfg);

    let bot = select_bot(&cfg.bot.handler).unwrap_or_else(|e| e.exit());
    cfg.validate()?;

    let _log_guard = logging::init(&cfg.log)?;

    let api = Arc::new(Telegram::from_config(&cfg.bot.token, &cfg.transport)?);
    if cli.delete_webhook {
        if api.delete_webhook().await? {
            info!("webhook removed");
        } else {
            warn!("deleteWebhook was not acknowledged");
        }
    }

    let mut runner = LongPollingRunner::from_config(api, bot, &cfg.polling);
    let stop = runner.stop_handle();
    tokio::spawn(async move {
        if handle_interrupts(tokio::signal::ctrl_c, stop).await {
            warn!("interrupted again, exiting");
            std::process::exit(130);
        }
    });

    runner.run().await?;
    Ok(())
}

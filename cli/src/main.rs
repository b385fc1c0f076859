//! CLI entrypoint for Layers
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use layers_application::{JournalController, SessionStore};
use layers_infrastructure::{
    ConfigLoader, FileConfig, FileSessionBackend, HttpRelayGateway, JsonlConversationLogger,
};
use layers_presentation::{
    Cli, Command, ConsoleFormatter, JournalRepl, ProgressReporter, ReplConfig, resolve_thread,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Kept alive until exit so buffered log lines are flushed
    let _log_guard = init_logging(&cli)?;

    info!("Starting Layers");

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if let Some(relay) = &cli.relay {
        config.relay.endpoint = relay.clone();
    }

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        println!();
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    config.validate().context("Invalid configuration")?;

    // === Dependency Injection ===
    let controller = Arc::new(build_controller(&config, cli.quiet)?);

    match cli.command {
        Some(Command::Threads) => {
            let threads = if config.repl.enrich_titles {
                controller.list_threads_titled().await
            } else {
                controller.list_threads()
            };
            println!("{}", ConsoleFormatter::format_thread_list(&threads));
        }
        Some(Command::Show { id }) => {
            let Some(thread_id) = resolve_thread(&controller.list_threads(), &id) else {
                bail!("No thread {}", id);
            };
            let session = controller.get_thread(&thread_id)?;
            println!("{}", ConsoleFormatter::format_thread(&session));
        }
        Some(Command::Delete { id }) => {
            let Some(thread_id) = resolve_thread(&controller.list_threads(), &id) else {
                bail!("No thread {}", id);
            };
            controller.delete_thread(&thread_id)?;
            println!("Deleted {}", thread_id);
        }
        None => {
            let repl_config = ReplConfig {
                show_progress: config.repl.show_progress,
                history_file: config.repl.history_file.clone(),
                enrich_titles: config.repl.enrich_titles,
            };
            let mut repl = JournalRepl::new(controller, repl_config);
            repl.run(cli.brain_dump).await?;
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity level, to stderr or `--log-file`
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = &cli.log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("Not a log file path: {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        dir, file_name,
    ));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

fn build_controller(config: &FileConfig, quiet: bool) -> Result<JournalController> {
    let storage_path = config
        .storage
        .resolved_path()
        .context("No data directory on this platform; set storage.path")?;
    info!("Threads stored in {}", storage_path.display());

    let store = Arc::new(SessionStore::new(
        Arc::new(FileSessionBackend::new(storage_path)),
        config.storage.capacity,
    ));
    let gateway = Arc::new(HttpRelayGateway::new(
        &config.relay.endpoint,
        config.relay_timeout(),
    )?);

    let mut controller = JournalController::new(gateway, store, config.behavior_config());

    if config.logging.conversation_log {
        match config
            .logging
            .resolved_directory()
            .and_then(JsonlConversationLogger::in_directory)
        {
            Some(logger) => {
                info!("Conversation log: {}", logger.path().display());
                controller = controller.with_conversation_logger(Arc::new(logger));
            }
            None => warn!("Conversation log requested but could not be opened"),
        }
    }

    if config.repl.show_progress && !quiet {
        controller = controller.with_progress(Arc::new(ProgressReporter::new()));
    }

    Ok(controller)
}

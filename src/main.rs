//! Termox - CLI
//!
//! Wordle-style word game in the terminal, and the word server it talks to.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use termox::{
    commands::run_simple,
    config::{ClientArgs, ClientConfig, ServerArgs, ServerConfig},
    game::GameSessionController,
    interactive::{App, run_tui},
    server,
    source::ClientSource,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "termox",
    about = "Wordle-style word game with single and multi-board play",
    version,
    author,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    client: ClientArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI game (default)
    Play(ClientArgs),

    /// Simple text mode (type whole words at a prompt)
    Simple(ClientArgs),

    /// Run the word server
    Serve(ServerArgs),
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Log to stderr
fn init_stderr_logging(default: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default))
        .with_writer(std::io::stderr)
        .init();
}

/// Log to a file, or nowhere; the TUI owns the terminal
fn init_file_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play(cli.client));

    match command {
        Commands::Play(args) => run_play_command(args),
        Commands::Simple(args) => run_simple_command(args),
        Commands::Serve(args) => run_serve_command(args),
    }
}

fn client_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}

fn run_play_command(args: ClientArgs) -> Result<()> {
    init_file_logging(args.log_file.as_deref())?;
    let config = ClientConfig::try_from(args)?;

    let source = ClientSource::from_config(&config.source)?;
    let label = source.describe();
    let controller = GameSessionController::new(source).with_step_delay(config.step_delay);

    let app = App::new(controller, config.boards, label);
    client_runtime()?.block_on(run_tui(app))
}

fn run_simple_command(args: ClientArgs) -> Result<()> {
    match args.log_file.as_deref() {
        Some(path) => init_file_logging(Some(path))?,
        None => init_stderr_logging("warn"),
    }
    let config = ClientConfig::try_from(args)?;

    let source = ClientSource::from_config(&config.source)?;
    // Rows are printed once revealed, so there is nothing to animate
    let mut controller = GameSessionController::new(source).with_step_delay(Duration::ZERO);

    client_runtime()?.block_on(run_simple(&mut controller, config.boards))
}

fn run_serve_command(args: ServerArgs) -> Result<()> {
    init_stderr_logging("info");
    let config = ServerConfig::from(args);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?
        .block_on(server::run(&config))
}

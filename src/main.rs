//! Side-stacker - Unified CLI
//!
//! Runs the REST game server or a terminal AI-vs-AI exhibition.

#![warn(missing_docs)]

mod cli;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::TimeDelta;
use clap::Parser;
use cli::{Cli, Command};
use side_stacker::{
    AiDifficulty, GameMode, GameRepository, GameService, GameStore, MemoryStore, ServerConfig,
    SystemClock, TurnOrchestrator,
};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            db,
            memory,
        } => run_server(config, host, port, db, memory).await,
        Command::Exhibition { p1, p2, delay_ms } => run_exhibition(p1, p2, delay_ms).await,
    }
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,side_stacker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the REST game server
#[instrument(skip_all)]
async fn run_server(
    config_path: Option<std::path::PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    db: Option<String>,
    memory: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(db) = db {
        config = config.with_database_path(db);
    }

    let store: Arc<dyn GameStore> = if memory {
        info!("Using in-memory store");
        Arc::new(MemoryStore::new())
    } else {
        let repo = GameRepository::open(config.database_path().clone())?;
        info!(path = %repo.db_path(), "Using SQLite store");
        Arc::new(repo)
    };

    let orchestrator = TurnOrchestrator::new(config.ai_move_delay());
    info!(
        addr = %config.bind_addr(),
        delay_ms = orchestrator.delay().num_milliseconds(),
        "Starting side-stacker server"
    );
    let service = Arc::new(GameService::new(store, Arc::new(SystemClock), orchestrator));

    side_stacker::serve(&config.bind_addr(), service).await
}

/// Play an AI-vs-AI game through the regular read path, printing each ply
#[instrument]
async fn run_exhibition(p1: AiDifficulty, p2: AiDifficulty, delay_ms: u64) -> Result<()> {
    let service = GameService::new(
        Arc::new(MemoryStore::new()),
        Arc::new(SystemClock),
        TurnOrchestrator::new(TimeDelta::milliseconds(i64::try_from(delay_ms)?)),
    );

    let mut game = service.start_game(GameMode::DualAi, Some(p1), Some(p2))?;
    println!("X ({}) vs O ({})\n{}\n", p1, p2, game.board().display());

    while !game.status().is_terminal() {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        let next = service.get_game(game.id())?;
        if next.last_move_at() != game.last_move_at() {
            println!("{} moved\n{}\n", game.current_player(), next.board().display());
        }
        game = next;
    }

    match game.winner() {
        Some(winner) => println!("{} wins", winner),
        None => println!("Draw"),
    }
    Ok(())
}

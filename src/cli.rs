//! Command-line interface for side_stacker.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use side_stacker::AiDifficulty;

/// Side-stacker game server
#[derive(Parser, Debug)]
#[command(name = "side_stacker")]
#[command(about = "Side-stacker game server with AI opponents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the REST game server
    Serve {
        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database file (overrides config)
        #[arg(long)]
        db: Option<String>,

        /// Keep games in memory instead of SQLite
        #[arg(long, conflicts_with = "db")]
        memory: bool,
    },

    /// Play an AI-vs-AI game in the terminal
    Exhibition {
        /// Difficulty for X
        #[arg(long, default_value = "easy", value_parser = parse_difficulty)]
        p1: AiDifficulty,

        /// Difficulty for O
        #[arg(long, default_value = "medium", value_parser = parse_difficulty)]
        p2: AiDifficulty,

        /// Milliseconds between AI moves
        #[arg(long, default_value = "1000")]
        delay_ms: u64,
    },
}

fn parse_difficulty(s: &str) -> Result<AiDifficulty, String> {
    s.parse()
        .map_err(|_| format!("unknown difficulty '{}' (expected easy or medium)", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from(["side_stacker", "serve", "--port", "4000", "--memory"]).unwrap();
        match cli.command {
            Command::Serve { port, memory, db, .. } => {
                assert_eq!(port, Some(4000));
                assert!(memory);
                assert!(db.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_memory_conflicts_with_db() {
        assert!(Cli::try_parse_from(["side_stacker", "serve", "--memory", "--db", "x.db"]).is_err());
    }

    #[test]
    fn test_exhibition_difficulties() {
        let cli = Cli::try_parse_from(["side_stacker", "exhibition", "--p1", "medium"]).unwrap();
        match cli.command {
            Command::Exhibition { p1, p2, delay_ms } => {
                assert_eq!(p1, AiDifficulty::Medium);
                assert_eq!(p2, AiDifficulty::Medium);
                assert_eq!(delay_ms, 1000);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_difficulty_rejected() {
        assert!(Cli::try_parse_from(["side_stacker", "exhibition", "--p1", "hard"]).is_err());
    }
}

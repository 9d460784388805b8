use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{
    ENV_ADMIN_TOKEN, ENV_CONFIG, ENV_DRAW_POINTS, ENV_HOST, ENV_LOSS_POINTS, ENV_PORT,
    ENV_WIN_POINTS,
};

#[derive(Parser)]
#[command(name = "tourney")]
#[command(version, about = "Tournament backend server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Disable admin authentication (for development)
    #[arg(long, global = true)]
    pub no_auth: bool,

    /// Admin bearer token (generated on startup if unset)
    #[arg(long, global = true, env = ENV_ADMIN_TOKEN)]
    pub admin_token: Option<String>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Points awarded for a win
    #[arg(long, global = true, env = ENV_WIN_POINTS)]
    pub win_points: Option<i64>,

    /// Points awarded for a draw
    #[arg(long, global = true, env = ENV_DRAW_POINTS)]
    pub draw_points: Option<i64>,

    /// Points awarded for a loss
    #[arg(long, global = true, env = ENV_LOSS_POINTS)]
    pub loss_points: Option<i64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server (default)
    Start,

    /// System maintenance commands
    System {
        #[command(subcommand)]
        command: SystemCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum SystemCommands {
    /// Delete the local data directory (database and all tournament data)
    Prune {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// CLI values that feed into config resolution
#[derive(Debug, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub no_auth: bool,
    pub admin_token: Option<String>,
    pub config: Option<PathBuf>,
    pub win_points: Option<i64>,
    pub draw_points: Option<i64>,
    pub loss_points: Option<i64>,
}

/// Parse CLI arguments into config values and an optional command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();

    let config = CliConfig {
        host: cli.host,
        port: cli.port,
        no_auth: cli.no_auth,
        admin_token: cli.admin_token,
        config: cli.config,
        win_points: cli.win_points,
        draw_points: cli.draw_points,
        loss_points: cli.loss_points,
    };

    (config, cli.command)
}

pub mod commands;
pub mod config;
pub mod remote;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "sadhana")]
#[command(about = "Sadhana CLI - tenant login and super admin panel for the tracking system")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Log in to a tracking system with an authentication code")]
    Login {
        #[arg(help = "Authentication code (will prompt if not provided)")]
        code: Option<String>,
    },

    #[command(about = "Super admin panel")]
    Admin {
        #[command(subcommand)]
        cmd: commands::admin::AdminCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Login { code } => commands::login::handle(code, output_format).await,
        Commands::Admin { cmd } => commands::admin::handle(cmd, output_format).await,
    }
}

pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "medimg")]
#[command(about = "medimg CLI - inspect access rules and mint development sessions")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format (overrides --json)")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List the access table in priority order")]
    Routes,

    #[command(about = "Show how the access gate classifies a path")]
    Classify {
        #[arg(help = "Request path, e.g. /api/reports/mongo")]
        path: String,
    },

    #[command(about = "Mint a development session token")]
    Token {
        #[arg(help = "User id to put in the token subject")]
        user_id: String,
        #[arg(long, help = "Lifetime in hours (defaults to SESSION_TTL_HOURS)")]
        hours: Option<u64>,
    },

    #[command(about = "Show which integrations are configured (never prints secrets)")]
    Config,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json && !cli.text {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = crate::config::config();

    match cli.command {
        Commands::Routes => commands::access::routes(output_format),
        Commands::Classify { path } => commands::access::classify(&path, config, output_format),
        Commands::Token { user_id, hours } => commands::token::handle(&user_id, hours, config, output_format),
        Commands::Config => commands::config::handle(config, output_format),
    }
}

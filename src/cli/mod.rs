pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "product-api")]
#[command(about = "Owner-scoped product API server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides PRODUCT_API_PORT / PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Print a bearer token for a user id")]
    Token {
        #[arg(help = "User id the token authenticates")]
        user_id: String,
        #[arg(long, help = "Hours until the token expires (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
        hours: Option<u64>,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { port } => commands::serve::handle(port).await,
        Commands::Token { user_id, hours } => commands::token::handle(&user_id, hours),
    }
}

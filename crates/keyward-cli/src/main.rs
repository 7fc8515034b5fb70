use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "keyward", version, about = "Keyward multitenant token manager CLI")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a random signing secret.
    Secret {
        /// Secret length in bytes, before base64 encoding.
        #[arg(long, default_value_t = 32)]
        bytes: usize,
    },

    /// Parse and validate a configuration file.
    Check {
        /// Path to keyward.yaml
        file: PathBuf,
    },

    /// Token operations.
    Token {
        #[command(subcommand)]
        cmd: TokenCommand,
    },
}

#[derive(Subcommand, Debug)]
enum TokenCommand {
    /// Create a tenant against an in-memory store and print its first
    /// token (local development aid; nothing is persisted).
    Mint {
        /// Path to keyward.yaml
        #[arg(long)]
        config: PathBuf,

        /// Tenant display label.
        #[arg(long)]
        label: String,

        /// Wallet key for the tenant.
        #[arg(long)]
        wallet_key: Option<String>,

        /// Extra claim as key=value; repeatable.
        #[arg(long = "claim")]
        claims: Vec<String>,
    },

    /// Print a token's claim payload without verifying the signature.
    Inspect { token: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Secret { bytes } => commands::secret::generate(bytes),
        Command::Check { file } => commands::check::run(&file),
        Command::Token { cmd } => match cmd {
            TokenCommand::Mint {
                config,
                label,
                wallet_key,
                claims,
            } => commands::token::mint(&config, &label, wallet_key.as_deref(), &claims).await,
            TokenCommand::Inspect { token } => commands::token::inspect(&token),
        },
    }
}

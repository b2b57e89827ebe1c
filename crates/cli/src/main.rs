//! Request auth CLI for signing keys and signatures.
//!
//! This tool provides commands for:
//! - Inspecting an `EC PRIVATE KEY` PEM file and printing its key identifier
//! - Generating a fresh secp256k1 key in OpenSSL layout
//! - Signing a message and verifying a signature
//! - Validating signing configuration

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod config;
mod error;
mod key;
mod logging;
mod sign;

use error::CliError;

#[derive(Parser)]
#[command(name = "racli")]
#[command(about = "Request auth CLI for secp256k1 signing keys")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Signing configuration file, overridable with REQUEST_AUTH__ variables
    #[arg(long, short, global = true, env = "REQUEST_AUTH_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Key management
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Sign a message and print the authentication headers
    Sign {
        /// PEM key file (default: signing.key_file from the config)
        #[arg(long, short)]
        key: Option<PathBuf>,

        /// Message to sign
        #[arg(long, short)]
        message: String,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Verify a base64 signature against an uncompressed public key
    Verify {
        /// Public key as 128 hex characters (X || Y)
        #[arg(long)]
        public_key: String,

        /// Message that was signed
        #[arg(long, short)]
        message: String,

        /// Base64 signature (r || s)
        #[arg(long, short)]
        signature: String,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Show the public key and key identifier of a PEM key file
    Inspect {
        /// PEM key file (default: signing.key_file from the config)
        #[arg(long, short)]
        key: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print only the key identifier
    Id {
        /// PEM key file (default: signing.key_file from the config)
        #[arg(long, short)]
        key: Option<PathBuf>,
    },

    /// Generate a new key as EC PARAMETERS + EC PRIVATE KEY PEM
    Generate {
        /// Output file path (prints to stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate the configuration file
    Validate {
        /// Path to the TOML configuration file
        #[arg(long, short)]
        file: PathBuf,
    },

    /// Print the effective configuration, environment overrides applied
    Show {
        /// Path to the TOML configuration file
        #[arg(long, short)]
        file: PathBuf,
    },
}

#[derive(Clone, ValueEnum, Debug)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logger(cli.verbose) {
        eprintln!("Error: failed to initialize logging: {}", e);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.config;
    match cli.command {
        Commands::Key { action } => match action {
            KeyAction::Inspect { key: key_path, format } => {
                key::inspect(config.as_deref(), key_path.as_deref(), format)
            }
            KeyAction::Id { key: key_path } => key::print_id(config.as_deref(), key_path.as_deref()),
            KeyAction::Generate { output } => key::generate(output.as_deref()),
        },
        Commands::Sign {
            key: key_path,
            message,
            format,
        } => sign::sign_message(config.as_deref(), key_path.as_deref(), &message, format),
        Commands::Verify {
            public_key,
            message,
            signature,
        } => sign::verify_signature(&public_key, &message, &signature),
        Commands::Config { action } => match action {
            ConfigAction::Validate { file } => config::validate(&file),
            ConfigAction::Show { file } => config::show(&file),
        },
    }
}

//! Axiom CLI - sign requests, verify signatures, and run verified transactions.

use std::path::PathBuf;

use axiom_core::DEFAULT_NONCE_BYTES;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod input;
mod output;

use commands::{canonicalize, crypto, execute, status};

#[derive(Parser)]
#[command(name = "axiom")]
#[command(about = "Axiom request signing and proof verification CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by commands that talk to the API.
#[derive(Args)]
pub struct RemoteArgs {
    /// API key (bearer token and signing key)
    #[arg(long, env = "AXIOM_API_KEY", hide_env_values = true)]
    api_key: String,
    /// TOML config file (AXIOM_* variables override it)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show canonical bytes for input JSON
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// SHA-256 hex digest of text or input bytes
    Hash {
        /// Hash this UTF-8 text instead of reading input
        #[arg(long, conflicts_with = "input")]
        text: Option<String>,
        /// Input file (or stdin if not provided)
        input: Option<String>,
    },
    /// HMAC-SHA256 signature of input bytes
    Sign {
        /// Signing key
        #[arg(long)]
        key: String,
        /// Sign the canonical form of the input JSON
        #[arg(long)]
        canonical: bool,
        /// Input file (or stdin if not provided)
        input: Option<String>,
    },
    /// Check a signature over input bytes
    VerifySignature {
        /// Signing key
        #[arg(long)]
        key: String,
        /// Base64 signature to check
        #[arg(long)]
        signature: String,
        /// Verify against the canonical form of the input JSON
        #[arg(long)]
        canonical: bool,
        /// Input file (or stdin if not provided)
        input: Option<String>,
    },
    /// Generate random base64 nonces
    Nonce {
        /// Random bytes per nonce
        #[arg(long, default_value_t = DEFAULT_NONCE_BYTES)]
        bytes: usize,
        /// Number of nonces
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Derive a symmetric key from a password and salt
    DeriveKey {
        /// Password
        #[arg(long)]
        password: String,
        /// Salt
        #[arg(long)]
        salt: String,
    },
    /// Sign and submit a transaction, printing the verified response
    Execute {
        /// Operation name
        #[arg(long)]
        operation: String,
        /// Parameters as a JSON object
        #[arg(long)]
        params: Option<String>,
        /// Nonce to send (random if not provided)
        #[arg(long)]
        nonce: Option<String>,
        #[command(flatten)]
        remote: RemoteArgs,
    },
    /// Fetch a previous result by request id
    Status {
        /// Request id returned by execute
        request_id: String,
        #[command(flatten)]
        remote: RemoteArgs,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Canonicalize { input } => canonicalize::run(input),
        Commands::Hash { text, input } => crypto::hash(text, input),
        Commands::Sign {
            key,
            canonical,
            input,
        } => crypto::sign(key, canonical, input),
        Commands::VerifySignature {
            key,
            signature,
            canonical,
            input,
        } => crypto::verify_signature(key, signature, canonical, input),
        Commands::Nonce { bytes, count } => crypto::nonce(bytes, count),
        Commands::DeriveKey { password, salt } => crypto::derive_key(password, salt),
        Commands::Execute {
            operation,
            params,
            nonce,
            remote,
        } => execute::run(operation, params, nonce, remote).await,
        Commands::Status { request_id, remote } => status::run(request_id, remote).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! healthpass CLI - offline verification and inspection of signed health passes.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod input;
mod output;

#[cfg(feature = "dev-tools")]
use commands::sign;
use commands::{inspect, verify};

#[derive(Parser)]
#[command(name = "healthpass")]
#[command(about = "Offline verification of COSE-signed health passes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a signed envelope against a key or a set of trust anchors
    Verify {
        /// Envelope file (or stdin if not provided)
        envelope: Option<String>,
        /// JWK file holding the issuer public key
        #[arg(long, conflicts_with = "jwks", required_unless_present = "jwks")]
        key: Option<String>,
        /// JWKS file of trusted keys, selected by the envelope's kid
        #[arg(long)]
        jwks: Option<String>,
        /// Input is hex text instead of raw CBOR
        #[arg(long)]
        hex: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Exit with error code unless the envelope verifies
        #[arg(long)]
        strict: bool,
    },
    /// Show the decoded structure of an envelope
    Inspect {
        /// Envelope file (or stdin if not provided)
        envelope: Option<String>,
        /// Input is hex text instead of raw CBOR
        #[arg(long)]
        hex: bool,
    },
    /// Sign a JSON payload into a test envelope (hex on stdout)
    #[cfg(feature = "dev-tools")]
    Sign {
        /// Payload JSON file (or stdin if not provided)
        payload: Option<String>,
        /// Hex-encoded 32-byte P-256 private scalar
        #[arg(long)]
        key: String,
        /// Key identifier written to the protected header
        #[arg(long)]
        kid: String,
        /// Also write the public key as a JWK to this path
        #[arg(long)]
        jwk_out: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Verify {
            envelope,
            key,
            jwks,
            hex,
            json,
            strict,
        } => verify::run(envelope, key, jwks, hex, json, strict),
        Commands::Inspect { envelope, hex } => inspect::run(envelope, hex),
        #[cfg(feature = "dev-tools")]
        Commands::Sign {
            payload,
            key,
            kid,
            jwk_out,
        } => sign::run(payload, key, kid, jwk_out),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

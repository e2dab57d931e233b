//! Command line interface: derives a DID from an X.509 certificate file and
//! prints it to stdout.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

/// Generates a Decentralized ID (DID) from an X.509 certificate.
#[derive(Parser)]
#[command(name = "didgen")]
struct Cli {
    /// Path to X.509 certificate file. The file must be DER-encoded and may
    /// be supplied in binary or printable encoding (PEM).
    #[arg(short, long, value_name = "FILE", required_unless_present = "version")]
    input: Option<PathBuf>,

    /// DID method to derive the identifier with ("key" or "jwk").
    #[arg(short, long, default_value = "key")]
    method: String,

    /// Also output JSON Web Key (JWK) to stderr.
    #[arg(short, long)]
    jwk: bool,

    /// Print version and exit.
    #[arg(short = 'v', long)]
    version: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    if cli.version {
        println!("didgen {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let input = cli.input.context("--input is required")?;
    let bytes =
        std::fs::read(&input).with_context(|| format!("failed to read {}", input.display()))?;

    let jwk = didgen::jwk_from_bytes(&bytes)?;
    if cli.jwk {
        eprintln!("{}", serde_json::to_string(&jwk)?);
    }

    let Some(did) = didgen::did_from_jwk(&jwk, &cli.method)? else {
        anyhow::bail!("registration completed without a DID");
    };
    println!("{did}");
    Ok(())
}

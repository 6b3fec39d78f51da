use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bioledger",
    about = "BioLedger: proof-of-work ledger for biometric credential digests",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Print the SHA-256 digest of a credential sample
    Digest(DigestArgs),
    /// Mine blocks on a throwaway chain and report timings
    Bench(BenchArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Override the bind address
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Override the proof-of-work difficulty
    #[arg(long)]
    pub difficulty: Option<u32>,
}

#[derive(Args)]
pub struct DigestArgs {
    pub sample: String,
}

#[derive(Args)]
pub struct BenchArgs {
    #[arg(short = 'n', long, default_value = "10")]
    pub blocks: usize,
    #[arg(short, long, default_value = "4")]
    pub difficulty: u32,
}

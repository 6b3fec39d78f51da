use std::time::Instant;

use anyhow::Context;
use colored::Colorize;

use bioledger_crypto::ContentHasher;
use bioledger_ledger::{Chain, ChainConfig};
use bioledger_server::{BioLedgerServer, ServerConfig};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Digest(args) => cmd_digest(args),
        Command::Bench(args) => cmd_bench(args),
    }
}

fn resolve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(difficulty) = args.difficulty {
        config.chain.difficulty = difficulty;
    }
    config.validate()?;
    Ok(config)
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    println!(
        "{} BioLedger server on {} (difficulty {})",
        "✓".green().bold(),
        config.bind_addr.to_string().bold(),
        config.chain.difficulty.to_string().yellow()
    );
    let server = BioLedgerServer::new(config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn cmd_digest(args: DigestArgs) -> anyhow::Result<()> {
    println!("{}", ContentHasher::digest(args.sample.as_bytes()));
    Ok(())
}

fn cmd_bench(args: BenchArgs) -> anyhow::Result<()> {
    let mut chain = Chain::with_config(ChainConfig::with_difficulty(args.difficulty))?;
    println!(
        "Mining {} blocks at difficulty {}...",
        args.blocks.to_string().bold(),
        args.difficulty.to_string().yellow()
    );

    let start = Instant::now();
    for i in 0..args.blocks {
        let digest = ContentHasher::digest(format!("bench-sample-{i}").as_bytes());
        let mined = Instant::now();
        let block = chain.append(&format!("bench-{i}"), "fingerprint", &digest)?;
        println!(
            "  block {:>4}  nonce {:>8}  {}  {:?}",
            block.index(),
            block.nonce(),
            block.hash()[..16].cyan(),
            mined.elapsed()
        );
    }
    let total = start.elapsed();

    let valid = chain.validate();
    let status = if valid { "✓".green().bold() } else { "✗".red().bold() };
    println!(
        "{} {} blocks in {:?} (avg {:?}); chain integrity {}",
        status,
        args.blocks,
        total,
        total.checked_div(args.blocks.max(1) as u32).unwrap_or_default(),
        if valid { "ok".green() } else { "BROKEN".red() }
    );
    tracing::debug!(blocks = chain.len(), valid, "bench complete");
    Ok(())
}

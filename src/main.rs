use anyhow::{Context, Result};
use clap::Parser;
use nrow::config::GameConfig;
use nrow::protocol::ProtocolHandler;
use nrow::transposition::DEFAULT_CAPACITY;
use std::io::Write;

#[derive(Parser, Debug)]
#[command(name = "nrow", about = "Play N-in-a-row against the engine", version)]
struct Args {
    /// Board edge length
    #[arg(short = 's', long, default_value_t = 3)]
    size: usize,

    /// Symbols in a row needed to win
    #[arg(short = 'l', long, default_value_t = 3)]
    length: usize,

    /// Maximum search depth in plies
    #[arg(short = 'd', long, default_value_t = 9)]
    levels: u32,

    /// Memoization table bucket count
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout carries only protocol output
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .target(env_logger::Target::Stderr)
    .init();

    let config = GameConfig::new(args.size, args.length, args.levels)
        .and_then(|config| config.with_table_capacity(args.capacity))
        .context("invalid game configuration")?;

    let mut handler = ProtocolHandler::new(config).context("failed to set up the search")?;
    handler.run()
}

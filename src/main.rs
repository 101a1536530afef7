use anyhow::{Context, Result};
use clap::Parser;
use macos_route_dump::{RoutingTable, SystemInterfaces};
use tracing_subscriber::EnvFilter;

/// Dump the IPv4 routing table, read straight from the routing socket
#[derive(Parser, Debug)]
#[command(name = "route-dump")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log every decoded route message and its addresses
    #[arg(short, long, env = "ROUTE_DUMP_VERBOSE")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("macOS equivalent command: netstat -nr");

    let table = RoutingTable::load().context("loading routing table")?;
    table
        .render(std::io::stdout().lock(), &SystemInterfaces)
        .context("writing routing table")?;

    Ok(())
}

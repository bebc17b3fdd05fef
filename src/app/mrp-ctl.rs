use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use mrpipe::cmd::ctl::{Args, Commands};
use mrpipe::orchestrator::Orchestrator;
use mrpipe::utils;
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    utils::init_tracing();
    let args = Args::parse();
    let orchestrator = Orchestrator::new(args.endpoints(), Duration::from_secs(args.timeout))?;

    match args.command {
        Commands::Run { url } => print_json(&orchestrator.run(&url).await?),
        Commands::Split { url } => print_json(&orchestrator.split(&url).await?),
        Commands::Map { bucket, key } => print_json(&orchestrator.map(&bucket, &key).await?),
        Commands::Reduce { bucket, files } => {
            print_json(&orchestrator.reduce(&bucket, files).await?)
        }
    }
}

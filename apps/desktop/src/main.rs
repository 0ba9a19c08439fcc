use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    config::normalize_server_url, load_settings, ApiClient, MemoryTokenStorage, Router,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

mod commands;
mod controller;

use commands::Command;

#[derive(Parser, Debug)]
#[command(about = "Weather-aware recipe recommendations from the terminal")]
struct Args {
    /// TOML file with server_url / session_file / default_location.
    #[arg(long)]
    config: Option<String>,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    session_file: Option<PathBuf>,
    /// Keep the token in memory only; nothing survives exit.
    #[arg(long)]
    ephemeral: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(server_url) = &args.server_url {
        settings.server_url = normalize_server_url(server_url)?;
    }
    if let Some(session_file) = args.session_file {
        settings.session_file = session_file;
    }
    tracing::info!(server_url = %settings.server_url, "starting recipe client");

    let mut router = if args.ephemeral {
        Router::with_storage(&settings, MemoryTokenStorage::new())
    } else {
        Router::from_settings(&settings)
    };
    let probe = ApiClient::new(&settings.server_url);

    controller::print_view(&router);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        match commands::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(cmd) => controller::dispatch(&mut router, &probe, cmd).await,
            Err(err) => println!("! {err}"),
        }
    }

    Ok(())
}

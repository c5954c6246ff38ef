// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cb - Club bot operator tool

mod commands;
mod output;
mod table;

use output::OutputFormat;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{migrate, sessions};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "cb", version, about = "Club bot - operator tool")]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Inspect or reset stored admin sessions
    Sessions(sessions::SessionsArgs),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(1);
    }
}

/// Format an anyhow error, skipping causes the top message already shows.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();
    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));
    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            return Ok(());
        }
    };

    dotenvy::dotenv().ok();
    let pool = connect().await?;

    let result = match command {
        Commands::Migrate => migrate::handle(&pool, format).await,
        Commands::Sessions(args) => sessions::handle(args.command, &pool, format).await,
    };
    pool.close().await;
    result
}

async fn connect() -> Result<PgPool> {
    let dsn = std::env::var("DB_DSN").context("DB_DSN is not set")?;
    PgPoolOptions::new()
        .max_connections(2)
        .connect(&dsn)
        .await
        .context("cannot connect to the database")
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

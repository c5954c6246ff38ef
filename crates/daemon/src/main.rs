// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Club Bot Daemon (clubbotd)
//!
//! Long-polls Telegram and hands every update to the dispatcher.
//!
//! Startup:
//! - Configuration from the environment (and `.env`)
//! - Postgres pool, then pending schema migrations
//! - Telegram polling until SIGINT or SIGTERM

use std::sync::Arc;
use std::time::Duration;

use cb_adapters::{TelegramAdapter, TracedChat};
use cb_core::SystemClock;
use cb_daemon::{logging, Config};
use cb_engine::Club;
use cb_storage::{MigrationRegistry, PgClubRepo, PgSessionRepo};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use teloxide::prelude::*;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{info, warn};

type Updates = cb_daemon::Dispatcher<PgSessionRepo, TracedChat<TelegramAdapter>, SystemClock>;

const MAX_LIFETIME: Duration = Duration::from_secs(60 * 60);
const IDLE_TIMEOUT: Duration = Duration::from_secs(15 * 60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("clubbotd {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("clubbotd {}", env!("CARGO_PKG_VERSION"));
                println!("Club Bot Daemon - Telegram bot for the club administrators");
                println!();
                println!("USAGE:");
                println!("    clubbotd");
                println!();
                println!("Configuration is read from the environment or a .env file:");
                println!("    BOT_TOKEN, DB_DSN, ADMIN_IDS, CLUB_TZ");
                println!("    SESSION_TTL_HOURS, LOG_FORMAT, DEBUG (optional)");
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: clubbotd [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };
    let _log_guard = logging::init(&config);

    info!(tz = %config.tz, admins = config.admin_ids.len(), "starting club bot");

    let pool = connect(&config.db_dsn).await?;
    let applied = MigrationRegistry::new().apply(&pool).await?;
    info!(applied, "schema up to date");

    let bot = Bot::new(config.bot_token.clone());
    let chat = TracedChat::new(TelegramAdapter::new(bot.clone()));
    let club = Club::new(Arc::new(PgClubRepo::new(pool.clone())));
    let updates: Arc<Updates> = Arc::new(
        cb_daemon::Dispatcher::new(
            config.admin_ids.clone(),
            PgSessionRepo::new(pool.clone()),
            club,
            chat,
            SystemClock,
            config.tz,
        )
        .with_session_ttl(config.session_ttl),
    );

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    let mut polling = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![updates])
        .enable_ctrlc_handler()
        .build();

    // Ctrl-C is handled by teloxide; SIGTERM stops polling the same way.
    let token = polling.shutdown_token();
    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::spawn(async move {
        sigterm.recv().await;
        info!("Received SIGTERM, shutting down...");
        match token.shutdown() {
            Ok(done) => done.await,
            Err(e) => warn!(error = ?e, "dispatcher was not running"),
        }
    });

    info!("polling for updates");
    polling.dispatch().await;

    pool.close().await;
    info!("club bot stopped");
    Ok(())
}

/// Sessions run in UTC; timestamps are converted to club time only for
/// display and input.
async fn connect(dsn: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_lifetime(MAX_LIFETIME)
        .idle_timeout(IDLE_TIMEOUT)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                sqlx::query("SET TIME ZONE 'UTC'").execute(&mut *conn).await?;
                Ok(())
            })
        })
        .connect(dsn)
        .await
}

async fn on_message(msg: Message, updates: Arc<Updates>) -> ResponseResult<()> {
    if let Some(inbound) = TelegramAdapter::inbound_from_message(&msg) {
        updates.handle(inbound).await;
    }
    Ok(())
}

async fn on_callback(q: CallbackQuery, updates: Arc<Updates>) -> ResponseResult<()> {
    if let Some(inbound) = TelegramAdapter::inbound_from_callback(&q) {
        updates.handle(inbound).await;
    }
    Ok(())
}

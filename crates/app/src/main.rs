use std::sync::Arc;

use anyhow::Context;
use futures::StreamExt;
use heroes_app::command::Command;
use heroes_app::config::AppConfig;
use heroes_app::console::{self, Console, Reply};
use heroes_client::HttpHeroBackend;
use heroes_core::{HeroBackend, HeroService, InMemoryHeroBackend, MessageLog};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tour_of_heroes=info,heroes_core=info,heroes_search=info,heroes_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Console exited with an error");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Invalid configuration")?;

    let backend: Arc<dyn HeroBackend> = match &config.api_url {
        Some(url) => {
            tracing::info!(url = %url, "Using remote hero API");
            Arc::new(
                HttpHeroBackend::with_timeout(url, config.request_timeout)
                    .context("Failed to create HTTP backend")?,
            )
        }
        None => {
            tracing::info!("Using offline hero store");
            Arc::new(InMemoryHeroBackend::seeded())
        }
    };

    let log = Arc::new(MessageLog::with_capacity(config.message_capacity));
    let service = HeroService::new(backend, log.clone());

    let lookup_service = service.clone();
    let (search, mut results) = heroes_search::spawn(
        move |term| {
            let service = lookup_service.clone();
            async move { service.search_heroes(&term).await }
        },
        config.debounce,
    );

    let printer = tokio::spawn(async move {
        while let Some(heroes) = results.next().await {
            println!("{}", console::render_search(&heroes));
        }
    });

    let mut console = Console::new(service, log, search.clone());
    let loaded = console.load().await;
    tracing::info!(heroes = loaded, "Roster loaded");
    println!("Tour of Heroes. Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                search.shutdown();
                break;
            }
        };

        let Some(line) = line else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match console.execute(command).await {
            Reply::Lines(out) => {
                for line in out {
                    println!("{line}");
                }
            }
            Reply::Quit => break,
        }
    }

    // Closing every input handle lets the pipeline flush its pending term.
    drop(console);
    drop(search);
    printer.await.context("Search printer task failed")?;

    Ok(())
}

use anyhow::Result;
use netdash::command::{Command, HELP};
use netdash::*;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app_config = config::AppConfig::load()?;
    let client = Arc::new(client::MetricsClient::new(&app_config.backend.base_url)?);
    if let Some((username, password)) = app_config.backend.credentials() {
        client.login(username, password).await?;
        tracing::info!(username, "Logged in");
    }

    let mut page = page::Page::new(&app_config.ui.tabs);
    if let Some(tab) = app_config.ui.initial_tab() {
        page.open_tab(tab, &page::button_id(tab))?;
    }
    let page = page.into_shared();

    let (alert_tx, mut alert_rx) = alerts::channel();
    tokio::spawn(async move {
        while let Some(alert) = alert_rx.recv().await {
            println!("ALERT: {}", alert);
        }
    });

    let dashboard = dashboard::Dashboard::new(client.clone(), page.clone(), alert_tx);
    if let Err(e) = dashboard.on_ready().await {
        tracing::warn!(error = %e, operation = "on_ready", "Initial log load failed");
    }

    let poller = poller::spawn(
        client.clone(),
        page.clone(),
        poller::PollerConfig {
            interval_ms: app_config.polling.bandwidth_interval_ms,
        },
    );
    tracing::info!(
        backend = client.base_url(),
        interval_ms = app_config.polling.bandwidth_interval_ms,
        "Dashboard ready; type `help` for commands"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(cmd) => dispatch(&dashboard, &client, cmd).await,
                    Err(command::CommandError::Empty) => {}
                    Err(e) => println!("{}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received shutdown signal");
                break;
            }
        }
    }

    poller.stop().await;
    Ok(())
}

/// Ping and uptime run as their own tasks so a hung request only stalls that section.
async fn dispatch(dashboard: &dashboard::Dashboard, client: &client::MetricsClient, cmd: Command) {
    match cmd {
        Command::Ping(target) => {
            let dashboard = dashboard.clone();
            tokio::spawn(async move {
                match dashboard.ping(&target).await {
                    Ok(result) => println!("{}", result.render()),
                    Err(e) => tracing::warn!(
                        error = %e,
                        operation = "ping",
                        ping_target = %target,
                        "Ping failed"
                    ),
                }
            });
        }
        Command::Uptime(url) => {
            let dashboard = dashboard.clone();
            tokio::spawn(async move {
                match dashboard.check_uptime(&url).await {
                    Ok(result) => println!("{}: {}", result.url, result.status),
                    Err(e) => tracing::warn!(
                        error = %e,
                        operation = "check_uptime",
                        url = %url,
                        "Uptime check failed"
                    ),
                }
            });
        }
        Command::Tab(name) => {
            if let Err(e) = dashboard.open_tab(&name, &page::button_id(&name)).await {
                println!("{}", e);
            }
        }
        Command::Logs => {
            if let Err(e) = dashboard.on_ready().await {
                tracing::warn!(error = %e, operation = "load_logs", "Log load failed");
            }
        }
        Command::History => match client.bandwidth_history().await {
            Ok(rows) => {
                for row in rows {
                    println!(
                        "{}: down {} Mbps, up {} Mbps",
                        row.time,
                        models::two_decimals(row.download),
                        models::two_decimals(row.upload)
                    );
                }
            }
            Err(e) => tracing::warn!(
                error = %e,
                operation = "bandwidth_history",
                "History load failed"
            ),
        },
        Command::Show => {
            let page = dashboard.page().read().await;
            print!("{}", &*page);
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
}

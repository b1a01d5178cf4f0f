mod api;
mod config;
mod error;
mod events;
mod input;
mod state;

use anyhow::Result;
use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use api::CoinGeckoClient;
use config::Config;
use events::Event;
use state::{MarketSeries, PriceSnapshot, RefreshController};

/// How many trailing series points the detail listing shows.
const SERIES_TAIL: usize = 20;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load("config.toml")?;
    info!(?config, "starting btcwatch");

    let feed = CoinGeckoClient::new(&config.api_base_url)?;
    let mut controller = RefreshController::new();

    // Producers push onto one channel; the loop below owns the controller.
    let (tx, mut rx) = mpsc::channel::<Event>(32);
    input::spawn_ticker(tx.clone());
    input::spawn_console(tx.clone());
    input::spawn_signal(tx.clone());

    println!("btcwatch - commands: refresh | auto on|off | interval <secs> | status | quit");

    while let Some(event) = rx.recv().await {
        match event {
            Event::Tick => {
                let now = Utc::now();
                if controller.check_auto_refresh(now) {
                    // Interval elapsed: ask for an immediate re-poll; the
                    // due check on that tick picks up the armed trigger.
                    let _ = tx.send(Event::Tick).await;
                    continue;
                }
                if controller.is_refresh_due(now) {
                    match controller.refresh(&feed, &config, now).await {
                        Ok(()) => render(&controller),
                        Err(err) => warn!("refresh failed, keeping last data: {}", err),
                    }
                }
            }
            Event::Refresh => controller.request_refresh(),
            Event::SetAutoRefresh(on) => {
                controller.set_auto_refresh(on);
                info!(auto_refresh = on, "auto-refresh toggled");
            }
            Event::SetInterval(secs) => {
                controller.set_interval(secs);
                info!(
                    interval_secs = controller.interval_secs(),
                    "refresh interval changed"
                );
            }
            Event::Status => print_status(&controller),
            Event::Shutdown => {
                info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}

/// Terminal rendition of the dashboard: price line, update time, series tail.
fn render(controller: &RefreshController) {
    if let Some(snapshot) = controller.snapshot() {
        print_snapshot(snapshot);
    }
    if let Some(last) = controller.last_update() {
        println!("updated {}", last.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(series) = controller.series() {
        print_series_tail(series);
    }
}

fn print_status(controller: &RefreshController) {
    println!(
        "auto-refresh {} every {}s{}",
        if controller.auto_refresh() { "on" } else { "off" },
        controller.interval_secs(),
        if controller.manual_trigger() {
            ", refresh pending"
        } else {
            ""
        },
    );
    render(controller);
}

fn print_snapshot(snapshot: &PriceSnapshot) {
    let trend = if snapshot.is_up() { "▲" } else { "▼" };
    println!(
        "BTC ${:.2} {} {:+.2} USD ({:+.2}%)",
        snapshot.price, trend, snapshot.change_24h, snapshot.change_pct_24h
    );
}

fn print_series_tail(series: &MarketSeries) {
    let points = series.points();
    let tail = &points[points.len().saturating_sub(SERIES_TAIL)..];
    for point in tail {
        println!(
            "  {}  ${:.2}",
            point.time.format("%m-%d %H:%M"),
            point.price
        );
    }
}

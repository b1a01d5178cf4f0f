use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tracing::warn;

use crate::events::{parse_command, Event};

/// How often the host loop gets polled.
const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Spawns the poll ticker.
pub fn spawn_ticker(tx: mpsc::Sender<Event>) {
    tokio::spawn(async move {
        let mut ticker = interval(TICK_PERIOD);
        loop {
            ticker.tick().await;
            if tx.send(Event::Tick).await.is_err() {
                break; // host loop is gone
            }
        }
    });
}

/// Spawns the console command reader.
pub fn spawn_console(tx: mpsc::Sender<Event>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match parse_command(&line) {
                Some(event) => {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
                None if line.trim().is_empty() => {}
                None => {
                    println!("commands: refresh | auto on|off | interval <secs> | status | quit");
                }
            }
        }
    });
}

/// Spawns the Ctrl+C watcher.
pub fn spawn_signal(tx: mpsc::Sender<Event>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = tx.send(Event::Shutdown).await;
            }
            Err(e) => warn!("could not listen for ctrl-c: {}", e),
        }
    });
}

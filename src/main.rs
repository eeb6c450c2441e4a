use crate::argparse::{Commands, Heights};
use anyhow::Result;
use futures::future::join_all;
use tankmon::sensor::{command, DeviceConfig};
use tankmon::{console, display, logging, sensor};
use tokio::signal;
use tokio::sync::mpsc;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn, Level};

// Binary-local module, the CLI surface is not part of the library crate
mod argparse;

const READINGS_QUEUE: usize = 16;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = argparse::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _guards = logging::init(level, cli.console, Some(cli.log_file));

    match cli.command {
        Commands::Monitor {
            device,
            interval,
            no_console,
        } => {
            let settings = DeviceConfig {
                host: device.host,
                port: device.port,
            };
            monitor(settings, Duration::from_secs(interval), !no_console).await?;
        }
        Commands::Set { device, heights } => {
            let settings = DeviceConfig {
                host: device.host,
                port: device.port,
            };
            set_heights(&settings, heights).await;
        }
    }
    Ok(())
}

async fn monitor(settings: DeviceConfig, period: Duration, with_console: bool) -> Result<()> {
    info!(
        "monitoring sensor at {}:{} every {:?}",
        settings.host, settings.port, period
    );

    let token = CancellationToken::new();
    let (tx, rx) = mpsc::channel(READINGS_QUEUE);

    let mut tasks = Vec::new();
    let settings1 = settings.clone();
    let token1 = token.clone();
    tasks.push(tokio::spawn(async move {
        if let Err(e) = sensor::polling_task(settings1, period, tx, token1).await {
            warn!("polling task failed: {e}");
        }
    }));
    tasks.push(tokio::spawn(async move {
        if let Err(e) = display::display_task(rx).await {
            warn!("display task failed: {e}");
        }
    }));
    if with_console {
        let settings1 = settings.clone();
        let token1 = token.clone();
        tasks.push(tokio::spawn(async move {
            if let Err(e) = console::console_task(settings1, token1).await {
                warn!("console task failed: {e}");
            }
        }));
    }

    signal::ctrl_c().await?;
    info!("shutting down");
    token.cancel();
    join_all(tasks).await;
    Ok(())
}

// Failures on the write path are logged, never turned into an exit code.
async fn set_heights(settings: &DeviceConfig, heights: Heights) {
    if let Some(h1) = heights.h1 {
        push_height(settings, command::PARAM_H1, &h1).await;
    }
    if let Some(h2) = heights.h2 {
        push_height(settings, command::PARAM_H2, &h2).await;
    }
}

async fn push_height(settings: &DeviceConfig, key: &str, value: &str) {
    match command::send_parameter(settings, key, value).await {
        Ok(()) => info!("sent {key}={value} to {}", settings.host),
        Err(e) => warn!("sending {key}={value} failed: {e}"),
    }
}

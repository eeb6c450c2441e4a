pub mod command;
pub mod transport;

use super::ReadingEvent;
use anyhow::Result;
use chrono::prelude::*;
use tokio::sync::mpsc::Sender;
use tokio::time::{interval, Duration};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// How many times a metric is requested before a cycle gives up on it.
pub const MAX_ATTEMPTS: usize = 3;

/// Shown in place of a reading the sensor never delivered.
pub const UNAVAILABLE: &str = "N/A";

/// Where the sensor lives on the local network. Fixed for the lifetime
/// of every task it is handed to.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Distance,
    Voltage,
    LastReception,
}

impl Metric {
    /// Resource path the sensor serves this metric under.
    pub fn path(&self) -> &'static str {
        match self {
            Metric::Distance => "distance",
            Metric::Voltage => "volt",
            Metric::LastReception => "time",
        }
    }
}

/// The three readings of one polling cycle, as delivered by the sensor.
#[derive(Debug, Clone)]
pub struct Readings {
    pub distance: String,
    pub voltage: String,
    pub last_reception: String,
}

/// Asks for a metric up to [`MAX_ATTEMPTS`] times and keeps the first
/// non empty body. No backoff between attempts, the per request timeout
/// already paces them.
pub async fn fetch_with_retry(settings: &DeviceConfig, metric: Metric) -> String {
    let path = metric.path();
    for attempt in 1..=MAX_ATTEMPTS {
        match transport::fetch(settings, path).await {
            Ok(body) if !body.is_empty() => return body,
            Ok(_) => warn!("empty reply for /{path}, attempt {attempt}/{MAX_ATTEMPTS}"),
            Err(e) => warn!("request for /{path} failed ({e}), attempt {attempt}/{MAX_ATTEMPTS}"),
        }
    }
    String::from(UNAVAILABLE)
}

// The sensor copes badly with concurrent requests, so the three metrics
// of a cycle are always fetched one after another.
async fn poll_once(settings: &DeviceConfig) -> Readings {
    let distance = fetch_with_retry(settings, Metric::Distance).await;
    let voltage = fetch_with_retry(settings, Metric::Voltage).await;
    let last_reception = fetch_with_retry(settings, Metric::LastReception).await;
    Readings {
        distance,
        voltage,
        last_reception,
    }
}

/// Polls the sensor on a fixed period until cancelled, handing each
/// timestamped cycle to the display side of the channel. A single task
/// runs all cycles, so two cycles can never overlap on the wire.
pub async fn polling_task(
    settings: DeviceConfig,
    period: Duration,
    channel: Sender<ReadingEvent>,
    token: CancellationToken,
) -> Result<()> {
    let mut ticker = interval(period);
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => {
                let readings = poll_once(&settings).await;
                let tstamp = Utc::now();
                if channel.send((tstamp, readings)).await.is_err() {
                    break; // display side is gone
                }
            }
        }
    }
    info!("polling task finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Metric;

    #[test]
    fn metric_paths_match_the_sensor_firmware() {
        assert_eq!(Metric::Distance.path(), "distance");
        assert_eq!(Metric::Voltage.path(), "volt");
        assert_eq!(Metric::LastReception.path(), "time");
    }
}

use super::sensor::Readings;
use super::{ReadingEvent, Timestamp};
use anyhow::Result;
use tokio::sync::mpsc::Receiver;
use tracing::info;

/// Owns the receiving end of the readings channel and renders every
/// cycle as three text lines. Being the only consumer, all display
/// output is serialized here no matter which task produced the data.
pub struct Panel {
    channel: Receiver<ReadingEvent>,
}

impl Panel {
    fn new(channel: Receiver<ReadingEvent>) -> Self {
        Self { channel }
    }

    fn render(&self, tstamp: &Timestamp, readings: &Readings) {
        let at = tstamp.format("%H:%M:%S");
        info!("[{at}] Measured Distance: {} cm", readings.distance);
        info!("[{at}] Battery Voltage: {} V", readings.voltage);
        info!(
            "[{at}] Time spent for last reception: {} min",
            readings.last_reception
        );
    }

    async fn run(&mut self) {
        while let Some((tstamp, readings)) = self.channel.recv().await {
            self.render(&tstamp, &readings);
        }
    }
}

pub async fn display_task(channel: Receiver<ReadingEvent>) -> Result<()> {
    let mut panel = Panel::new(channel);
    panel.run().await;
    info!("display task finished");
    Ok(())
}

// Write path: pushing tank height parameters to the sensor.

use super::{transport, DeviceConfig};
use anyhow::Result;
use tracing::{debug, warn};

const SET_RESOURCE: &str = "get";

/// Device side keys for the two tank heights the user may adjust.
pub const PARAM_H1: &str = "input_h1";
pub const PARAM_H2: &str = "input_h2";

/// One `GET /get?key=value` exchange. The value goes on the wire
/// verbatim, nothing is URL escaped. The sensor's answer is logged and
/// otherwise discarded; there is no retry on this path.
pub async fn send_parameter(settings: &DeviceConfig, key: &str, value: &str) -> Result<()> {
    let path = format!("{SET_RESOURCE}?{key}={value}");
    let reply = transport::fetch(settings, &path).await?;
    debug!("sensor answered {key}={value} with {} byte(s)", reply.len());
    Ok(())
}

/// Fire and forget variant for user triggered updates: the send runs on
/// its own task and failures are logged, never surfaced.
pub fn send_in_background(settings: DeviceConfig, key: &'static str, value: String) {
    tokio::spawn(async move {
        if let Err(e) = send_parameter(&settings, key, &value).await {
            warn!("parameter update {key}={value} failed: {e}");
        }
    });
}

pub mod console;
pub mod display;
pub mod logging;
pub mod sensor;

use chrono::prelude::*;
use dotenvy::dotenv;
use std::env;

pub type Timestamp = DateTime<Utc>;
pub type ReadingEvent = (Timestamp, sensor::Readings);

const DEVICE_HOST: &str = "TANKMON_HOST";
const DEFAULT_HOST: &str = "192.168.4.1";

pub fn get_device_host() -> String {
    dotenv().ok();
    env::var(DEVICE_HOST).unwrap_or_else(|_| String::from(DEFAULT_HOST))
}

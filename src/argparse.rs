use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tankmon::get_device_host;

pub fn parse() -> Cli {
    Cli::parse()
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Turn console logging on
    #[arg(short, long)]
    pub console: bool,

    /// Log to a file
    #[arg(short, long, value_name = "FILE", default_value = "tankmon.log")]
    pub log_file: PathBuf,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Poll the sensor and render its readings until interrupted
    Monitor {
        #[command(flatten)]
        device: Device,

        /// Seconds between polling cycles
        #[arg(short, long, default_value_t = 3)]
        interval: u64,

        /// Don't read h1=/h2= commands from stdin
        #[arg(long)]
        no_console: bool,
    },

    /// Push tank height parameters to the sensor and exit
    Set {
        #[command(flatten)]
        device: Device,

        #[command(flatten)]
        heights: Heights,
    },
}

#[derive(Args)]
pub struct Device {
    /// Sensor address on the local network
    #[arg(long, default_value = get_device_host())]
    pub host: String,

    /// Sensor TCP port
    #[arg(long, default_value_t = 80)]
    pub port: u16,
}

#[derive(Args)]
#[group(required = true, multiple = true)]
pub struct Heights {
    /// Tank height h1 in cm
    #[arg(long, value_name = "CM")]
    pub h1: Option<String>,

    /// Tank height h2 in cm
    #[arg(long, value_name = "CM")]
    pub h2: Option<String>,
}

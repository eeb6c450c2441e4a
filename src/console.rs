// Stand-in for the two submit actions of the sensor's front end: typing
// `h1=<cm>` or `h2=<cm>` on stdin pushes that height to the sensor.

use super::sensor::command;
use super::sensor::DeviceConfig;
use anyhow::Result;
use regex::Regex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::warn;

const COMMAND: &str = r"^\s*(h1|h2)\s*=\s*(\S+)\s*$";

pub async fn console_task(settings: DeviceConfig, token: CancellationToken) -> Result<()> {
    let re = Regex::new(COMMAND)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            line = lines.next_line() => match line? {
                Some(text) => dispatch(&re, &settings, &text),
                None => break, // stdin reached EOF
            },
        }
    }
    Ok(())
}

fn dispatch(re: &Regex, settings: &DeviceConfig, text: &str) {
    if let Some((key, value)) = parse(re, text) {
        command::send_in_background(settings.clone(), key, value);
    } else if !text.trim().is_empty() {
        warn!("unrecognized command {text:?}, expected h1=<value> or h2=<value>");
    }
}

fn parse(re: &Regex, text: &str) -> Option<(&'static str, String)> {
    let result = re.captures(text)?;
    let key = if &result[1] == "h1" {
        command::PARAM_H1
    } else {
        command::PARAM_H2
    };
    Some((key, result[2].to_string()))
}

#[cfg(test)]
mod tests {
    use super::{parse, COMMAND};
    use crate::sensor::command::{PARAM_H1, PARAM_H2};
    use regex::Regex;

    #[test]
    fn heights_map_to_their_device_keys() {
        let re = Regex::new(COMMAND).unwrap();
        assert_eq!(parse(&re, "h1=40"), Some((PARAM_H1, String::from("40"))));
        assert_eq!(parse(&re, " h2 = 180 "), Some((PARAM_H2, String::from("180"))));
    }

    #[test]
    fn noise_is_rejected() {
        let re = Regex::new(COMMAND).unwrap();
        assert_eq!(parse(&re, "h3=40"), None);
        assert_eq!(parse(&re, "h1 40"), None);
        assert_eq!(parse(&re, ""), None);
        assert_eq!(parse(&re, "h1=40 extra"), None);
    }
}

// Raw socket exchange with the tank sensor.
//
// The sensor speaks a loose dialect of HTTP/1.1: it understands a GET
// request line plus Host/Connection headers and answers with raw bytes,
// closing the connection when it is done. No status code or header is
// ever validated; the body is whatever follows the first blank line.

use super::DeviceConfig;
use bytes::BytesMut;
use std::io;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{timeout, Duration};
use tracing::debug;

const BUF_SIZE: usize = 4096;
const HEADER_END: &str = "\r\n\r\n";

/// Bound on connect, send and every single read from the sensor.
pub const IO_TIMEOUT: Duration = Duration::from_secs(1);

/// One GET exchange. Connect and send failures are reported as errors;
/// once the request is on the wire, whatever came back before the peer
/// closed or went idle is kept, so the result may be an empty body.
pub async fn fetch(settings: &DeviceConfig, path: &str) -> Result<String, io::Error> {
    let mut endpoint = String::from(&settings.host);
    endpoint.push(':');
    endpoint.push_str(&settings.port.to_string());
    debug!("connecting to {endpoint} for /{path}");
    let mut stream = timeout(IO_TIMEOUT, TcpStream::connect(&endpoint))
        .await
        .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "connect timed out"))??;
    let request = format!(
        "GET /{} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        path, settings.host
    );
    timeout(IO_TIMEOUT, stream.write_all(request.as_bytes()))
        .await
        .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "send timed out"))??;
    let raw = read_until_close(&mut stream).await;
    Ok(String::from(body_of(&raw)))
}

async fn read_until_close(stream: &mut TcpStream) -> String {
    let mut buffer = BytesMut::with_capacity(BUF_SIZE);
    loop {
        match timeout(IO_TIMEOUT, stream.read_buf(&mut buffer)).await {
            Ok(Ok(0)) => break, // peer closed the connection
            Ok(Ok(_)) => (),
            Ok(Err(e)) => {
                debug!("read failed, keeping {} byte(s): {e}", buffer.len());
                break;
            }
            Err(_) => {
                debug!("idle timeout, keeping {} byte(s)", buffer.len());
                break;
            }
        }
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// The reply body is whatever follows the first blank line. A reply
/// without one is treated as headers only and yields an empty body.
pub fn body_of(response: &str) -> &str {
    match response.find(HEADER_END) {
        Some(at) => &response[at + HEADER_END.len()..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::body_of;

    #[test]
    fn body_follows_first_blank_line() {
        assert_eq!(body_of("HTTP/1.1 200 OK\r\n\r\n42"), "42");
    }

    #[test]
    fn only_the_first_blank_line_splits() {
        let reply = "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nfirst\r\n\r\nsecond";
        assert_eq!(body_of(reply), "first\r\n\r\nsecond");
    }

    #[test]
    fn missing_blank_line_means_headers_only() {
        assert_eq!(body_of("distance 42 without a header break"), "");
    }

    #[test]
    fn empty_reply_has_empty_body() {
        assert_eq!(body_of(""), "");
        assert_eq!(body_of("HTTP/1.1 200 OK\r\n\r\n"), "");
    }
}

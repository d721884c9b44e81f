//! Helpers for the terminal host.

use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Reads one line from `reader`, or `None` at end of input.
///
/// The same reader must be passed on every call, lines already buffered
/// by it are not seen by any other reader.
pub async fn read_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> Option<String> {
    let mut line = String::new();

    match reader.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}

/// Parses a request timeout given in whole seconds. Zero is rejected,
/// since every request would time out at once.
pub fn parse_timeout_secs(value: &str) -> Option<Duration> {
    match value.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
    }
}

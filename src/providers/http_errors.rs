use std::error::Error as StdError;
use std::io::ErrorKind;

use crate::error::ApiError;

/// Walks the source chain looking for an io error of `kind`, or a message
/// containing `needle` for transports that only surface text.
fn error_chain_matches(err: &(dyn StdError + 'static), kind: ErrorKind, needle: &str) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(source) = current {
        if let Some(io_err) = source.downcast_ref::<std::io::Error>()
            && io_err.kind() == kind
        {
            return true;
        }

        if source.to_string().to_ascii_lowercase().contains(needle) {
            return true;
        }

        current = source.source();
    }

    false
}

pub(crate) fn classify_request_error(
    err: reqwest::Error,
    api_url: &str,
    timeout_secs: Option<u64>,
) -> ApiError {
    if err.is_timeout() || error_chain_matches(&err, ErrorKind::TimedOut, "timed out") {
        return ApiError::Timeout {
            api_url: api_url.to_string(),
            timeout_secs,
        };
    }

    if err.is_connect() {
        return ApiError::Connection {
            api_url: api_url.to_string(),
            refused: error_chain_matches(&err, ErrorKind::ConnectionRefused, "connection refused"),
        };
    }

    ApiError::Request {
        api_url: api_url.to_string(),
        message: err.to_string(),
    }
}

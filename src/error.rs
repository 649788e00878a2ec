use thiserror::Error;

/// Why a single chat turn failed. Returned as data so the caller decides
/// whether to keep going (interactive) or stop (one-shot).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },

    #[error(
        "connection error: {} chat API at '{api_url}'. Check OPENAI_BASE_URL and network connectivity.",
        connect_phrase(.refused)
    )]
    Connection { api_url: String, refused: bool },

    #[error("timeout: chat request to '{api_url}' timed out{}", timeout_hint(.timeout_secs))]
    Timeout {
        api_url: String,
        timeout_secs: Option<u64>,
    },

    #[error("request error: failed to call chat API at '{api_url}': {message}")]
    Request { api_url: String, message: String },

    #[error("unexpected response from chat API: {0}")]
    UnexpectedResponse(String),
}

fn connect_phrase(refused: &bool) -> &'static str {
    if *refused {
        "connection refused by"
    } else {
        "failed to connect to"
    }
}

fn timeout_hint(timeout_secs: &Option<u64>) -> String {
    match timeout_secs {
        Some(secs) => format!(" after {secs}s. Increase OPENAI_TIMEOUT_SECS or retry."),
        None => ".".to_string(),
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API key not found. Set OPENAI_API_KEY or pass --key <keyfile>.")]
    MissingApiKey,
}

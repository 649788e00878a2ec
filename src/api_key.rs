use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const KEY_FILE_FIELD: &str = "apiKey";

/// Reads `{"apiKey": "..."}` from `path`. Missing, unreadable or malformed
/// files yield `None`; only the absence of any key is fatal, and that is
/// decided by the caller.
pub fn load_key_file(path: &Path) -> Option<String> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not read API key file");
            return None;
        }
    };

    let parsed: Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "API key file is not valid JSON");
            return None;
        }
    };

    let key = non_blank(parsed.get(KEY_FILE_FIELD).and_then(Value::as_str));
    if key.is_none() {
        warn!(
            path = %path.display(),
            field = KEY_FILE_FIELD,
            "API key file has no usable key field"
        );
    }
    key
}

/// A non-blank `OPENAI_API_KEY` wins over the key file.
pub fn resolve_api_key(key_file: Option<&Path>, env_key: Option<&str>) -> Option<String> {
    if let Some(key) = non_blank(env_key) {
        debug!(source = "environment", "resolved API key");
        return Some(key);
    }

    let key = key_file.and_then(load_key_file);
    if key.is_some() {
        debug!(source = "key file", "resolved API key");
    }
    key
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::providers::http_errors::classify_request_error;
use crate::request::ChatRequest;

const API_VERSION_HEADER: &str = "OpenAI-Beta";
const API_VERSION: &str = "assistants=v1";

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub(crate) fn chat_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

/// Extracts `choices[0].message.content` from a 2xx body.
pub(crate) fn parse_reply(body: &str) -> Result<String, ApiError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|err| ApiError::UnexpectedResponse(format!("invalid completion body: {err}")))?;

    let first = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::UnexpectedResponse("response has no choices".to_string()))?;

    first.message.content.ok_or_else(|| {
        ApiError::UnexpectedResponse("first choice has no message content".to_string())
    })
}

/// One POST, no retries. Every failure comes back as an `ApiError`.
pub async fn chat(
    client: &Client,
    cfg: &Config,
    request: &ChatRequest,
) -> Result<String, ApiError> {
    let api_url = chat_url(&cfg.api_base_url);
    debug!(
        api_url = %api_url,
        model = %request.model,
        message_count = request.messages.len(),
        "sending chat completion request"
    );

    let response = client
        .post(&api_url)
        .bearer_auth(&cfg.api_key)
        .header(API_VERSION_HEADER, API_VERSION)
        .json(request)
        .send()
        .await
        .map_err(|err| {
            warn!(
                api_url = %api_url,
                model = %request.model,
                error = %err,
                "chat completion request failed"
            );
            classify_request_error(err, &api_url, cfg.request_timeout_secs)
        })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| classify_request_error(err, &api_url, cfg.request_timeout_secs))?;

    if !status.is_success() {
        warn!(
            api_url = %api_url,
            model = %request.model,
            status = %status,
            response_body_len = body.len(),
            "chat API returned non-success status"
        );
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let reply = parse_reply(&body)?;
    debug!(
        model = %request.model,
        response_len = reply.len(),
        "received chat completion"
    );
    Ok(reply)
}

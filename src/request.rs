use serde::Serialize;

use crate::history::History;
use crate::model::Message;

/// Body of a chat-completions POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

/// System message (if any), then stored history, then the new prompt as the
/// final user entry. Prompt size is left for the API to judge.
pub fn build_request(
    prompt: &str,
    system_message: &str,
    history: &History,
    model: &str,
) -> ChatRequest {
    let mut messages = history.to_request_messages(system_message);
    messages.push(Message::user(prompt));
    ChatRequest {
        model: model.to_string(),
        messages,
    }
}

use serde::{Deserialize, Serialize};

use crate::model::Message;

/// Chronological user/assistant exchanges of the current session.
///
/// Entries are always added in pairs, so the length stays even. Serializes as
/// `{ "exchanges": [ {role, content}, ... ] }`, which is the transcript format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    exchanges: Vec<Message>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exchanges(&self) -> &[Message] {
        &self.exchanges
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn pair_count(&self) -> usize {
        self.exchanges.len() / 2
    }

    /// Pushes the user entry, then the assistant entry.
    pub fn append(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.exchanges.push(Message::user(user));
        self.exchanges.push(Message::assistant(assistant));
    }

    /// Drops the oldest pairs until at most `max_pairs` remain. Zero means unbounded.
    pub fn trim(&mut self, max_pairs: usize) {
        if max_pairs == 0 {
            return;
        }
        self.keep_newest_pairs(max_pairs);
    }

    /// Records one completed turn. Trimming happens before the append and
    /// leaves room for the incoming pair, so the stored count never exceeds
    /// `max_pairs` pairs once the turn is recorded.
    pub fn record_turn(
        &mut self,
        user: impl Into<String>,
        assistant: impl Into<String>,
        max_pairs: usize,
    ) {
        if max_pairs > 0 {
            self.keep_newest_pairs(max_pairs - 1);
        }
        self.append(user, assistant);
    }

    /// Request prefix: the system message (when non-blank) followed by every
    /// stored exchange in order.
    pub fn to_request_messages(&self, system_message: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.exchanges.len() + 2);
        if !system_message.trim().is_empty() {
            messages.push(Message::system(system_message));
        }
        messages.extend(self.exchanges.iter().cloned());
        messages
    }

    fn keep_newest_pairs(&mut self, keep: usize) {
        let excess = self.exchanges.len().saturating_sub(keep.saturating_mul(2));
        if excess > 0 {
            self.exchanges.drain(..excess);
        }
    }
}

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::history::History;
use crate::model_gateway::ModelGateway;
use crate::request::build_request;
use crate::transcript;

/// Owns the conversation state for one process run.
pub struct Session<'a, G> {
    cfg: &'a Config,
    gateway: G,
    history: History,
}

impl<'a, G> Session<'a, G>
where
    G: ModelGateway,
{
    pub fn new(cfg: &'a Config, gateway: G) -> Self {
        Self {
            cfg,
            gateway,
            history: History::new(),
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Sends `prompt` with the current history. History and transcript are
    /// only touched when the API call succeeds.
    pub async fn run_turn(&mut self, prompt: &str) -> Result<String, ApiError> {
        let request = build_request(
            prompt,
            &self.cfg.system_message,
            &self.history,
            &self.cfg.model,
        );
        let reply = self.gateway.chat(&request).await?;

        self.history
            .record_turn(prompt, reply.as_str(), self.cfg.max_history);
        debug!(
            exchange_count = self.history.len(),
            max_history = self.cfg.max_history,
            "recorded turn"
        );
        self.persist_transcript();

        Ok(reply)
    }

    fn persist_transcript(&self) {
        let Some(path) = &self.cfg.log_path else {
            return;
        };

        if let Err(err) = transcript::write(path, &self.history) {
            warn!(path = %path.display(), error = %err, "failed to write conversation log");
            eprintln!("Warning: {err:#}");
        }
    }
}

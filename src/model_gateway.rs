use reqwest::Client;
use std::future::Future;
use std::pin::Pin;

use crate::config::Config;
use crate::error::ApiError;
use crate::providers;
use crate::request::ChatRequest;

pub type ModelGatewayFuture<'a> = Pin<Box<dyn Future<Output = Result<String, ApiError>> + 'a>>;

/// Where a session sends its requests. Production code talks HTTP; tests
/// substitute a recording stub.
pub trait ModelGateway {
    fn chat<'a>(&'a self, request: &'a ChatRequest) -> ModelGatewayFuture<'a>;
}

pub struct OpenAiGateway<'a> {
    client: &'a Client,
    cfg: &'a Config,
}

impl<'a> OpenAiGateway<'a> {
    pub fn new(client: &'a Client, cfg: &'a Config) -> Self {
        Self { client, cfg }
    }
}

impl ModelGateway for OpenAiGateway<'_> {
    fn chat<'b>(&'b self, request: &'b ChatRequest) -> ModelGatewayFuture<'b> {
        Box::pin(async move { providers::openai::chat(self.client, self.cfg, request).await })
    }
}

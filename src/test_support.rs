use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::cli::DEFAULT_MODEL;
use crate::config::{Config, RunMode};
use crate::error::ApiError;
use crate::model_gateway::{ModelGateway, ModelGatewayFuture};
use crate::request::ChatRequest;

pub(crate) fn test_config() -> Config {
    Config {
        api_key: "sk-test".to_string(),
        api_base_url: "http://127.0.0.1:9/v1".to_string(),
        model: DEFAULT_MODEL.to_string(),
        system_message: String::new(),
        max_history: 0,
        mode: RunMode::Interactive,
        log_path: None,
        request_timeout_secs: None,
    }
}

pub(crate) fn unique_temp_dir(suffix: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock should be after unix epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "chatgpt-cli-{suffix}-{stamp}-{}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("failed to create temp directory");
    dir
}

/// Serves one HTTP response and hands back the raw request it received.
/// Returns the base URL (ending in `/v1`) to point a `Config` at.
pub(crate) fn spawn_http_responder(status: u16, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let addr = listener.local_addr().expect("address should be available");
    let body = body.to_string();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept should succeed");
        let request = read_http_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {status} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream
            .write_all(response.as_bytes())
            .expect("write response should succeed");
        request
    });
    (format!("http://{addr}/v1"), handle)
}

fn read_http_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let read = stream.read(&mut chunk).expect("read request should succeed");
        if read == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..read]);

        let Some(header_end) = buf.windows(4).position(|window| window == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= header_end + 4 + content_length {
            break;
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Replays canned outcomes in order and records every request it sees.
#[derive(Debug)]
pub(crate) struct StubGateway {
    outcomes: RefCell<VecDeque<Result<String, ApiError>>>,
    calls: RefCell<Vec<ChatRequest>>,
}

impl StubGateway {
    pub(crate) fn new(outcomes: Vec<Result<String, ApiError>>) -> Self {
        Self {
            outcomes: RefCell::new(outcomes.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(replies.into_iter().map(|reply| Ok(reply.into())).collect())
    }

    pub(crate) fn requests(&self) -> Vec<ChatRequest> {
        self.calls.borrow().clone()
    }
}

impl ModelGateway for StubGateway {
    fn chat<'a>(&'a self, request: &'a ChatRequest) -> ModelGatewayFuture<'a> {
        self.calls.borrow_mut().push(request.clone());
        let outcome = self
            .outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::UnexpectedResponse("stub exhausted".to_string())));
        Box::pin(async move { outcome })
    }
}

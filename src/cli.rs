use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Send prompts to a chat-completions API and print the replies.
///
/// Runs an interactive session unless --prompt is given. Type 'exit' to quit.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "chatgpt-cli", version)]
pub struct Cli {
    /// JSON file holding {"apiKey": "..."}; OPENAI_API_KEY takes precedence
    #[arg(short, long, value_name = "KEYFILE")]
    pub key: Option<PathBuf>,

    /// Print the reply to this prompt and exit
    #[arg(short, long, value_name = "TEXT", allow_hyphen_values = true)]
    pub prompt: Option<String>,

    /// Keep at most N user/assistant pairs of history (0 keeps everything)
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub max_history: usize,

    /// Rewrite the conversation to this JSON file after every turn
    #[arg(long, value_name = "PATH")]
    pub log: Option<PathBuf>,

    /// Model identifier sent with each request
    #[arg(long, value_name = "NAME", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// System instruction placed before every request
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    pub system_message: Option<String>,
}

use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{info, warn};

use crate::model_gateway::ModelGateway;
use crate::session::Session;

const PROMPT: &str = "ChatGPT >> ";
const EXIT_COMMAND: &str = "exit";

/// Source of interactive input lines. `Ok(None)` means end of input.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

pub struct TerminalInput {
    editor: DefaultEditor,
}

impl TerminalInput {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().context("Failed to initialize terminal input")?;
        Ok(Self { editor })
    }
}

impl LineSource for TerminalInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty()
                    && let Err(err) = self.editor.add_history_entry(line.as_str())
                {
                    warn!(error = %err, "failed to add line to input history");
                }
                Ok(Some(line))
            }
            // Ctrl-C drops the current line only.
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err).context("Failed to read terminal input"),
        }
    }
}

pub async fn run_repl<G, S>(session: &mut Session<'_, G>, input: &mut S) -> Result<()>
where
    G: ModelGateway,
    S: LineSource,
{
    info!("starting interactive session");
    println!("type a prompt, or '{EXIT_COMMAND}' to quit");

    while let Some(line) = input.read_line(PROMPT)? {
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        if command == EXIT_COMMAND {
            break;
        }

        match session.run_turn(&line).await {
            Ok(reply) => println!("\n{}\n", reply.trim()),
            Err(err) => {
                warn!(error = %err, "chat turn failed");
                eprintln!("Error: {err}");
            }
        }
    }

    info!(
        exchange_count = session.history().len(),
        "interactive session finished"
    );
    Ok(())
}

//! Dialog confirmation sources.
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use runtime::{AckError, Acknowledger, AutoAcknowledger, Prompt};

/// Prints each prompt and waits for the player to press enter.
pub struct ConsoleAcknowledger {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl ConsoleAcknowledger {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

impl Default for ConsoleAcknowledger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Acknowledger for ConsoleAcknowledger {
    async fn acknowledge(&self, prompt: Prompt) -> Result<(), AckError> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(format!("\n  {}\n  [enter] ", prompt.text()).as_bytes())
            .await?;
        stdout.flush().await?;

        let mut lines = self.lines.lock().await;
        match lines.next_line().await? {
            Some(_) => Ok(()),
            None => Err(AckError::Closed(prompt)),
        }
    }
}

/// Where dialog confirmations come from, picked at startup.
pub enum PromptSource {
    Console(ConsoleAcknowledger),
    Auto(AutoAcknowledger),
}

impl PromptSource {
    pub fn new(auto_ack: bool) -> Self {
        if auto_ack {
            PromptSource::Auto(AutoAcknowledger)
        } else {
            PromptSource::Console(ConsoleAcknowledger::new())
        }
    }
}

#[async_trait]
impl Acknowledger for PromptSource {
    async fn acknowledge(&self, prompt: Prompt) -> Result<(), AckError> {
        match self {
            PromptSource::Console(console) => console.acknowledge(prompt).await,
            PromptSource::Auto(auto) => auto.acknowledge(prompt).await,
        }
    }
}

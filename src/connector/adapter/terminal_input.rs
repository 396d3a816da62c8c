use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader, Lines};
use tokio::sync::Mutex;

use crate::domain::DomainError;

type LineSource = Lines<BufReader<Box<dyn AsyncRead + Send + Unpin>>>;

/// Line-oriented prompt reader shared by the interactive session and the
/// credential selector, so both consume the same buffered stdin.
#[derive(Clone)]
pub struct TerminalInput {
    lines: Arc<Mutex<LineSource>>,
}

impl TerminalInput {
    pub fn stdin() -> Self {
        Self::from_reader(tokio::io::stdin())
    }

    pub fn from_reader(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        let boxed: Box<dyn AsyncRead + Send + Unpin> = Box::new(reader);
        Self {
            lines: Arc::new(Mutex::new(BufReader::new(boxed).lines())),
        }
    }

    /// Writes `prompt` to stderr and reads one line. `None` means end of input.
    pub async fn read_line(&self, prompt: &str) -> Result<Option<String>, DomainError> {
        if !prompt.is_empty() {
            let mut stderr = tokio::io::stderr();
            stderr.write_all(prompt.as_bytes()).await?;
            stderr.flush().await?;
        }

        let mut lines = self.lines.lock().await;
        Ok(lines.next_line().await?)
    }
}

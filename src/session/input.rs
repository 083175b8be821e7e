use anyhow::Result;
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    sync::mpsc,
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cli::command::Command;

/// Reads command lines for the session. Generic over the reader so tests
/// can script input instead of attaching a terminal.
pub struct InputModule<R> {
    reader: R,
    next: mpsc::Sender<Command>,
    shutdown: CancellationToken,
}

impl<R: AsyncRead + Unpin> InputModule<R> {
    pub fn new(reader: R, next: mpsc::Sender<Command>, shutdown: CancellationToken) -> Self {
        Self {
            reader,
            next,
            shutdown,
        }
    }

    pub async fn run(self) -> Result<()> {
        let mut lines = BufReader::new(self.reader).lines();
        loop {
            let line = tokio::select! {
                _ = self.shutdown.cancelled() => return Ok(()),
                line = lines.next_line() => line?,
            };
            let Some(line) = line else {
                // EOF ends the session just like an explicit quit.
                self.shutdown.cancel();
                return Ok(());
            };
            if line.trim().is_empty() {
                continue;
            }
            match Command::parse(&line) {
                Ok(command) => {
                    debug!("Parsed command {:?}", command);
                    if self.next.send(command).await.is_err() {
                        // Session loop is gone, nothing left to feed.
                        return Ok(());
                    }
                }
                Err(e) => println!("{e:#}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::command::FocusAction;

    #[tokio::test]
    async fn scripted_lines_become_commands_and_eof_cancels() {
        let script = b"add write tests\nnot-a-command\nfocus start\n" as &[u8];
        let shutdown = CancellationToken::new();
        let (sender, mut receiver) = mpsc::channel(8);
        let input = InputModule::new(script, sender, shutdown.clone());

        input.run().await.unwrap();

        assert_eq!(
            receiver.recv().await,
            Some(Command::AddActivity {
                text: "write tests".into()
            })
        );
        // The malformed line is reported, not forwarded.
        assert_eq!(
            receiver.recv().await,
            Some(Command::Focus(FocusAction::Start))
        );
        assert_eq!(receiver.recv().await, None);
        assert!(shutdown.is_cancelled());
    }
}

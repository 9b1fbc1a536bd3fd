//! JSON-lines Bridge
//!
//! Reads one [`CommandRequest`] per input line and writes one
//! [`CommandReply`] per output line. Requests run concurrently; replies
//! are written in completion order and carry the request `id`.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, warn};

use super::dispatch::{dispatch, CommandReply, CommandRequest};
use crate::state::AppState;

/// Serve requests from `input` until it reaches EOF, then wait for the
/// requests still running and flush their replies.
pub async fn serve<R, W>(state: Arc<AppState>, input: R, output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let writer = tokio::spawn(async move {
        let mut output = output;
        while let Some(line) = rx.recv().await {
            output.write_all(line.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
        }
        Ok::<_, std::io::Error>(())
    });

    let mut lines = input.lines();
    let mut in_flight = InFlight::default();

    while let Some(line) = lines.next_line().await? {
        in_flight.reap();
        if line.trim().is_empty() {
            continue;
        }
        in_flight.spawn(handle_line(Arc::clone(&state), line, tx.clone()));
    }

    in_flight.drain().await;
    drop(tx);
    writer.await.map_err(std::io::Error::other)??;
    debug!("Input closed, all replies written");
    Ok(())
}

async fn handle_line(state: Arc<AppState>, line: String, tx: mpsc::UnboundedSender<String>) {
    let reply = match serde_json::from_str::<CommandRequest>(&line) {
        Ok(request) => dispatch(&state, request).await,
        Err(e) => {
            warn!("Malformed request: {}", e);
            CommandReply::malformed(None)
        }
    };
    match serde_json::to_string(&reply) {
        Ok(out) => {
            if tx.send(out).is_err() {
                error!("Reply writer closed");
            }
        }
        Err(e) => error!("Failed to encode reply: {}", e),
    }
}

/// Request tasks still owned by the bridge.
///
/// Finished tasks stay in the set until joined, so they are reaped on every
/// new input line rather than only at shutdown.
#[derive(Default)]
struct InFlight {
    tasks: JoinSet<()>,
}

impl InFlight {
    fn spawn<F>(&mut self, task: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        self.tasks.spawn(task);
    }

    /// Join every task that has already finished, without waiting
    fn reap(&mut self) -> usize {
        let mut reaped = 0;
        while let Some(joined) = self.tasks.try_join_next() {
            log_join(joined);
            reaped += 1;
        }
        reaped
    }

    /// Wait for every remaining task
    async fn drain(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            log_join(joined);
        }
    }

    fn len(&self) -> usize {
        self.tasks.len()
    }

    fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

fn log_join(joined: Result<(), JoinError>) {
    if let Err(e) = joined {
        error!("Request task failed: {}", e);
    }
}

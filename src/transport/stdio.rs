// Newline-delimited JSON-RPC over stdin/stdout

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{error, info};

use super::{INTERNAL_ERROR, JsonRpcResponse, handle_message, parse_message, request_id};
use crate::dispatcher::Dispatcher;

pub async fn serve_stdio(dispatcher: Arc<Dispatcher>) -> anyhow::Result<()> {
    serve(dispatcher, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Serve until `reader` reaches EOF. Each request runs in its own task; a single writer
/// task owns `writer`, so responses are whole lines in completion order.
pub async fn serve<R, W>(dispatcher: Arc<Dispatcher>, reader: R, writer: W) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();
    let writer_task = tokio::spawn(async move {
        let mut writer = writer;
        while let Some(response) = rx.recv().await {
            let mut line = serde_json::to_string(&response)?;
            line.push('\n');
            writer.write_all(line.as_bytes()).await?;
            writer.flush().await?;
        }
        anyhow::Ok(())
    });

    info!("serving MCP on stdio");
    let mut lines = BufReader::new(reader).lines();
    let mut in_flight = JoinSet::new();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let message = match parse_message(&line) {
            Ok(message) => message,
            Err(response) => {
                let _ = tx.send(response);
                continue;
            }
        };
        let id = request_id(&message);
        let dispatcher = dispatcher.clone();
        let tx = tx.clone();
        in_flight.spawn(async move {
            let handler = tokio::spawn(async move { handle_message(&dispatcher, message).await });
            let response = match handler.await {
                Ok(response) => response,
                Err(e) => {
                    error!(error = %e, "request handler aborted");
                    id.map(|id| JsonRpcResponse::failure(id, INTERNAL_ERROR, "internal error"))
                }
            };
            if let Some(response) = response {
                let _ = tx.send(response);
            }
        });
        while in_flight.try_join_next().is_some() {}
    }

    info!("stdin closed, finishing in-flight requests");
    while in_flight.join_next().await.is_some() {}
    drop(tx);
    writer_task.await??;
    Ok(())
}

//! TCP listener and per-connection handling: one read task per client plus
//! one writer task draining its outbound queue, so a slow or dead peer
//! never stalls a broadcast to the rest.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, LinesCodec};
use tracing::{debug, warn};

use crate::game::GameServer;
use crate::protocol::ClientMsg;

const MAX_LINE_BYTES: usize = 64 * 1024;

pub async fn run(server: Arc<GameServer>, listener: TcpListener) -> std::io::Result<()> {
    loop {
        let (stream, addr) = listener.accept().await?;
        let server = server.clone();
        tokio::spawn(async move {
            handle_connection(server, stream, addr).await;
        });
    }
}

async fn handle_connection(server: Arc<GameServer>, stream: TcpStream, addr: SocketAddr) {
    let (read_half, mut write_half) = stream.into_split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let writer = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if write_half.write_all(line.as_bytes()).await.is_err() {
                break;
            }
        }
    });

    let player = server.handle_connect(tx);
    debug!(player, %addr, "[CONN] accepted");

    let mut frames = FramedRead::new(read_half, LinesCodec::new_with_max_length(MAX_LINE_BYTES));
    while let Some(item) = frames.next().await {
        let line = match item {
            Ok(line) => line,
            Err(err) => {
                warn!(player, error = %err, "[CONN] stream error");
                break;
            }
        };
        // Undecodable lines are protocol noise; the connection stays open.
        let Ok(msg) = serde_json::from_str::<ClientMsg>(&line) else {
            debug!(player, "[CONN] dropping undecodable message");
            continue;
        };
        server.handle_message(player, msg);
    }

    server.handle_disconnect(player);
    // The registry held the last sender clone; removal closes the queue and
    // lets the writer flush whatever is still pending before exiting.
    let _ = writer.await;
}

/*
[INPUT]:  Test server behaviors
[OUTPUT]: In-process WebSocket servers backing the probe tests
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test server behaviors
*/

//! Common test utilities for ws-probe-adapter tests

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;
use ws_probe_adapter::Endpoint;

/// Endpoint pointing at a local test server
pub fn local_endpoint(addr: SocketAddr) -> Endpoint {
    Endpoint::new("Local", format!("ws://{addr}"))
}

/// Bind a local port, then free it again so connections get refused
pub async fn refused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    addr
}

/// Accept one WebSocket connection and close it immediately
pub async fn spawn_close_server() -> SocketAddr {
    spawn_server(|mut ws| async move {
        let _ = ws.close(None).await;
    })
    .await
}

/// Accept one WebSocket connection and send the given text frames, then close
pub async fn spawn_text_server(frames: Vec<String>) -> SocketAddr {
    spawn_server(move |mut ws| async move {
        for frame in frames {
            ws.send(Message::Text(frame.into())).await.expect("send frame");
        }
        let _ = ws.close(None).await;
    })
    .await
}

/// Accept the handshake, then leave the connection unserviced so pings go unanswered
pub async fn spawn_stalled_server(hold: Duration) -> SocketAddr {
    spawn_server(move |ws| async move {
        tokio::time::sleep(hold).await;
        drop(ws);
    })
    .await
}

/// Accept one WebSocket connection and service it until the peer closes
pub async fn spawn_idle_server() -> SocketAddr {
    spawn_server(|mut ws| async move {
        while let Some(Ok(message)) = ws.next().await {
            if let Message::Close(_) = message {
                break;
            }
        }
    })
    .await
}

async fn spawn_server<F, Fut>(behavior: F) -> SocketAddr
where
    F: FnOnce(WebSocketStream<TcpStream>) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        if let Ok((socket, _)) = listener.accept().await {
            let ws = accept_async(socket).await.expect("websocket accept");
            behavior(ws).await;
        }
    });
    addr
}

/*
[INPUT]:  Probe configuration (heartbeat interval)
[OUTPUT]: Shared connection factory ready for probing
[POS]:    Probe layer - session and handshake
[UPDATE]: When adding connection options or changing handshake behavior
*/

use std::time::Duration;

use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::debug;
use url::Url;

use crate::probe::error::ProbeError;

/// Keep-alive cadence used when nothing overrides it.
pub const DEFAULT_HEARTBEAT: Duration = Duration::from_secs(10);

/// An established stream, TLS or plain.
pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Probe session configuration.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Ping cadence; a connection with no inbound frames between two ticks is closed as idle
    pub heartbeat: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            heartbeat: DEFAULT_HEARTBEAT,
        }
    }
}

/// Shared connection factory for the whole fleet.
///
/// Read-only once built; probes only use it to originate connections, so it
/// needs no coordination discipline.
#[derive(Debug, Clone)]
pub struct ProbeClient {
    config: ProbeConfig,
}

impl ProbeClient {
    /// Create a client with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ProbeConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: ProbeConfig) -> Self {
        Self { config }
    }

    pub fn heartbeat(&self) -> Duration {
        self.config.heartbeat
    }

    /// Open a WebSocket connection to `url`.
    pub(crate) async fn connect(&self, url: &str) -> Result<WsStream, ProbeError> {
        let url = Url::parse(url)?;
        let (stream, response) = connect_async(url.as_str())
            .await
            .map_err(ProbeError::Handshake)?;
        debug!(url = %url, status = %response.status(), "websocket handshake accepted");
        Ok(stream)
    }
}

impl Default for ProbeClient {
    fn default() -> Self {
        Self::new()
    }
}

/*
[INPUT]:  Error sources (URL parsing, handshake, transport, heartbeat)
[OUTPUT]: Structured error types with stable kind names for log events
[POS]:    Error handling layer - unified error type for the probe crate
[UPDATE]: When adding new error sources or improving error messages
*/

use std::time::Duration;

use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Main error type for probe operations
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Endpoint address failed to parse
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),

    /// WebSocket handshake failed (resolution, refusal, TLS, upgrade)
    #[error("handshake failed: {0}")]
    Handshake(#[source] tungstenite::Error),

    /// Transport error surfaced mid-stream
    #[error("transport error: {0}")]
    Transport(#[source] tungstenite::Error),

    /// No inbound frame between two heartbeat ticks
    #[error("heartbeat timed out after {interval:?} without inbound frames")]
    HeartbeatTimeout { interval: Duration },
}

impl ProbeError {
    /// Stable short name carried in "error" log events.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::Url(_) => "Url",
            ProbeError::Handshake(_) => "Handshake",
            ProbeError::Transport(_) => "Transport",
            ProbeError::HeartbeatTimeout { .. } => "HeartbeatTimeout",
        }
    }

    /// True when the connection never reached the open state.
    pub fn is_connect_failure(&self) -> bool {
        matches!(self, ProbeError::Url(_) | ProbeError::Handshake(_))
    }
}

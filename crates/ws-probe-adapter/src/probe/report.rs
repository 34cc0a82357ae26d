/*
[INPUT]:  Probe lifecycle observations (open time, frames, terminal error)
[OUTPUT]: Per-endpoint probe report with close reason and elapsed time
[POS]:    Probe layer - outcome reporting
[UPDATE]: When changing report fields or the close taxonomy
*/

use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Why a probe reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Remote sent a close frame or ended the stream
    RemoteClose,
    /// Handshake never completed
    HandshakeFailed,
    /// Transport raised mid-stream
    TransportError,
    /// No inbound frames between two heartbeat ticks
    HeartbeatTimeout,
    /// Operator interrupt cancelled the probe
    Cancelled,
}

/// Final record for one probe. Always produced; probe failures are data,
/// not errors.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub probe_id: Uuid,
    pub exchange: String,
    pub url: String,
    /// Wall-clock handshake completion; absent when the connection never opened
    pub opened_at: Option<DateTime<Utc>>,
    /// Connected duration; present iff the connection opened
    pub elapsed: Option<Duration>,
    /// Data frames received (control frames excluded)
    pub messages: u64,
    pub close_reason: CloseReason,
    /// Terminal error text, if the probe ended on one
    pub error: Option<String>,
}

impl ProbeReport {
    /// True when the handshake completed.
    pub fn opened(&self) -> bool {
        self.opened_at.is_some()
    }

    /// Elapsed seconds in close-event format, when the connection opened.
    pub fn elapsed_display(&self) -> Option<String> {
        self.elapsed.map(format_elapsed)
    }
}

/// Seconds with exactly three decimals, the close-event timing format.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.3}", elapsed.as_secs_f64())
}

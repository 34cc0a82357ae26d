/*
[INPUT]:  Endpoint target, shared ProbeClient, CancellationToken
[OUTPUT]: Lifecycle events via tracing and a terminal ProbeReport
[POS]:    Probe layer - connection lifecycle loop
[UPDATE]: When changing receive-loop, heartbeat, or close semantics
*/

use std::time::{Duration, Instant};

use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use tokio::time::MissedTickBehavior;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::catalog::Endpoint;
use crate::probe::client::ProbeClient;
use crate::probe::error::ProbeError;
use crate::probe::report::{format_elapsed, CloseReason, ProbeReport};

const PAYLOAD_PREVIEW_MAX_BYTES: usize = 1024;

impl ProbeClient {
    /// Probe one endpoint: connect, log every frame, report the connected
    /// duration once the socket closes.
    ///
    /// Never returns an error and never retries; a failed probe is itself
    /// the diagnostic result. Cancellation closes the socket cooperatively.
    pub async fn probe(&self, endpoint: &Endpoint, shutdown: CancellationToken) -> ProbeReport {
        let probe_id = Uuid::new_v4();

        let connected = tokio::select! {
            res = self.connect(&endpoint.url) => res,
            _ = shutdown.cancelled() => {
                log_close(probe_id, endpoint, None);
                return unopened_report(probe_id, endpoint, CloseReason::Cancelled, None);
            }
        };

        let stream = match connected {
            Ok(stream) => stream,
            Err(err) => {
                log_error(probe_id, endpoint, &err);
                log_close(probe_id, endpoint, None);
                return unopened_report(
                    probe_id,
                    endpoint,
                    CloseReason::HandshakeFailed,
                    Some(err.to_string()),
                );
            }
        };

        let opened = Instant::now();
        let opened_at = Utc::now();
        info!(
            event = "open",
            probe_id = %probe_id,
            exchange = %endpoint.exchange,
            url = %endpoint.url,
            "probe open"
        );

        let (mut write, mut read) = stream.split();
        let mut heartbeat = heartbeat_interval(self.heartbeat());
        // set after each outbound ping, cleared by any inbound frame
        let mut awaiting_liveness = false;
        let mut messages: u64 = 0;
        let mut terminal_error: Option<String> = None;

        let close_reason = loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    let _ = write.send(WsMessage::Close(None)).await;
                    break CloseReason::Cancelled;
                }
                _ = heartbeat.tick() => {
                    if awaiting_liveness {
                        let err = ProbeError::HeartbeatTimeout { interval: self.heartbeat() };
                        log_error(probe_id, endpoint, &err);
                        terminal_error = Some(err.to_string());
                        let _ = write.send(WsMessage::Close(None)).await;
                        break CloseReason::HeartbeatTimeout;
                    }
                    if let Err(err) = write.send(WsMessage::Ping(vec![].into())).await {
                        let err = ProbeError::Transport(err);
                        log_error(probe_id, endpoint, &err);
                        terminal_error = Some(err.to_string());
                        break CloseReason::TransportError;
                    }
                    awaiting_liveness = true;
                }
                incoming = read.next() => match incoming {
                    Some(Ok(WsMessage::Pong(_))) => {
                        awaiting_liveness = false;
                        debug!(probe_id = %probe_id, url = %endpoint.url, "pong received");
                    }
                    Some(Ok(WsMessage::Ping(_))) => {
                        // the transport answers pings itself; liveness signal only
                        awaiting_liveness = false;
                        debug!(probe_id = %probe_id, url = %endpoint.url, "ping received");
                    }
                    Some(Ok(WsMessage::Close(frame))) => {
                        if let Some(frame) = frame {
                            debug!(
                                probe_id = %probe_id,
                                url = %endpoint.url,
                                code = %frame.code,
                                reason = %frame.reason,
                                "remote close frame"
                            );
                        }
                        break CloseReason::RemoteClose;
                    }
                    Some(Ok(message @ (WsMessage::Text(_) | WsMessage::Binary(_)))) => {
                        awaiting_liveness = false;
                        messages += 1;
                        log_message(probe_id, endpoint, &message);
                    }
                    Some(Ok(WsMessage::Frame(_))) => {}
                    Some(Err(err)) => {
                        let err = ProbeError::Transport(err);
                        log_error(probe_id, endpoint, &err);
                        terminal_error = Some(err.to_string());
                        break CloseReason::TransportError;
                    }
                    None => break CloseReason::RemoteClose,
                }
            }
        };

        let elapsed = opened.elapsed();
        log_close(probe_id, endpoint, Some(elapsed));

        ProbeReport {
            probe_id,
            exchange: endpoint.exchange.clone(),
            url: endpoint.url.clone(),
            opened_at: Some(opened_at),
            elapsed: Some(elapsed),
            messages,
            close_reason,
            error: terminal_error,
        }
    }
}

// First tick lands one full period after open, not immediately.
fn heartbeat_interval(period: Duration) -> tokio::time::Interval {
    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

fn unopened_report(
    probe_id: Uuid,
    endpoint: &Endpoint,
    close_reason: CloseReason,
    error: Option<String>,
) -> ProbeReport {
    ProbeReport {
        probe_id,
        exchange: endpoint.exchange.clone(),
        url: endpoint.url.clone(),
        opened_at: None,
        elapsed: None,
        messages: 0,
        close_reason,
        error,
    }
}

fn log_message(probe_id: Uuid, endpoint: &Endpoint, message: &WsMessage) {
    match message {
        WsMessage::Text(text) => {
            info!(
                event = "message",
                probe_id = %probe_id,
                url = %endpoint.url,
                data = %truncate_for_log(text.as_str(), PAYLOAD_PREVIEW_MAX_BYTES),
                "probe message"
            );
        }
        WsMessage::Binary(bytes) => {
            info!(
                event = "message",
                probe_id = %probe_id,
                url = %endpoint.url,
                bytes = bytes.len(),
                "probe message (binary)"
            );
        }
        _ => {}
    }
}

fn log_error(probe_id: Uuid, endpoint: &Endpoint, err: &ProbeError) {
    error!(
        event = "error",
        probe_id = %probe_id,
        url = %endpoint.url,
        kind = err.kind(),
        error = %err,
        "probe error"
    );
}

fn log_close(probe_id: Uuid, endpoint: &Endpoint, elapsed: Option<Duration>) {
    match elapsed {
        Some(elapsed) => {
            info!(
                event = "close",
                probe_id = %probe_id,
                url = %endpoint.url,
                time = %format_elapsed(elapsed),
                "probe close"
            );
        }
        None => {
            info!(
                event = "close",
                probe_id = %probe_id,
                url = %endpoint.url,
                "probe close"
            );
        }
    }
}

fn truncate_for_log(value: &str, max_len: usize) -> String {
    if value.len() <= max_len {
        return value.to_string();
    }
    let mut cut = max_len;
    while !value.is_char_boundary(cut) {
        cut -= 1;
    }
    let mut out = String::with_capacity(cut + 3);
    out.push_str(&value[..cut]);
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_passthrough() {
        assert_eq!(truncate_for_log("tick", 1024), "tick");
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        let value = "ab\u{3042}\u{3044}";
        let truncated = truncate_for_log(value, 3);
        assert_eq!(truncated, "ab...");
    }
}

/*
[INPUT]:  Probe configuration and endpoint targets
[OUTPUT]: Connection lifecycle events and probe reports
[POS]:    Probe layer - WebSocket connection probing
[UPDATE]: When changing connection or heartbeat logic
*/

pub mod client;
pub mod connection;
pub mod error;
pub mod report;

pub use client::{ProbeClient, ProbeConfig, DEFAULT_HEARTBEAT};
pub use error::ProbeError;
pub use report::{format_elapsed, CloseReason, ProbeReport};

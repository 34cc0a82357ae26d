/*
[INPUT]:  Endpoint catalog, shared ProbeClient, CancellationToken
[OUTPUT]: One tokio task per endpoint, joined into probe reports
[POS]:    Orchestration layer - launch-all / await-all probe fan-out
[UPDATE]: When changing spawn, cancellation, or shutdown guarantees
*/

use std::sync::{Arc, Once};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use ws_probe_adapter::{CloseReason, Endpoint, ProbeClient, ProbeReport};

// Bound applied only after cancellation has been requested.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

static PANIC_HOOK_ONCE: Once = Once::new();

fn ensure_panic_hook_installed() {
    PANIC_HOOK_ONCE.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!("panic in probe task: {info}");
            previous(info);
        }));
    });
}

/// Aggregate counters over all finished probes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FleetSummary {
    pub probes: usize,
    pub opened: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub messages: u64,
}

impl FleetSummary {
    pub fn from_reports(reports: &[ProbeReport]) -> Self {
        let mut summary = Self {
            probes: reports.len(),
            ..Self::default()
        };
        for report in reports {
            if report.opened() {
                summary.opened += 1;
            }
            match report.close_reason {
                CloseReason::HandshakeFailed
                | CloseReason::TransportError
                | CloseReason::HeartbeatTimeout => summary.failed += 1,
                CloseReason::Cancelled => summary.cancelled += 1,
                CloseReason::RemoteClose => {}
            }
            summary.messages += report.messages;
        }
        summary
    }
}

struct ManagedProbe {
    url: String,
    handle: JoinHandle<ProbeReport>,
}

/// Launches one probe task per endpoint and awaits them as a single unit.
///
/// Probe failures never escalate: every task resolves to a report, and the
/// fleet outcome is the collection of those reports.
pub struct ProbeFleet {
    probes: Vec<ManagedProbe>,
    shutdown: CancellationToken,
}

impl ProbeFleet {
    pub fn new() -> Self {
        Self {
            probes: Vec::new(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Token cancelling every probe in the fleet.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    /// Spawn one probe task per endpoint; probes start immediately.
    pub fn spawn_probes(&mut self, client: Arc<ProbeClient>, endpoints: Vec<Endpoint>) {
        ensure_panic_hook_installed();

        for endpoint in endpoints {
            let client = client.clone();
            let shutdown = self.shutdown.child_token();
            let url = endpoint.url.clone();
            let handle = tokio::spawn(async move { client.probe(&endpoint, shutdown).await });
            self.probes.push(ManagedProbe { url, handle });
        }
    }

    /// Wait for every probe to reach its terminal state.
    ///
    /// Probes exit on remote close, error, or cancellation; once the shutdown
    /// token fires, stragglers get a bounded grace period and are aborted.
    pub async fn wait(&mut self) -> Vec<ProbeReport> {
        let probes = std::mem::take(&mut self.probes);
        let mut reports = Vec::with_capacity(probes.len());
        let mut deadline: Option<Instant> = None;

        for ManagedProbe { url, mut handle } in probes {
            let joined = tokio::select! {
                res = &mut handle => res,
                _ = self.shutdown.cancelled() => {
                    let at = *deadline.get_or_insert_with(|| Instant::now() + SHUTDOWN_GRACE);
                    tokio::select! {
                        res = &mut handle => res,
                        _ = tokio::time::sleep_until(at) => {
                            handle.abort();
                            warn!(url = %url, "probe did not stop within shutdown grace; aborted");
                            continue;
                        }
                    }
                }
            };

            match joined {
                Ok(report) => reports.push(report),
                Err(join_err) if join_err.is_panic() => {
                    warn!(url = %url, "probe task panicked: {join_err}");
                }
                Err(join_err) => {
                    warn!(url = %url, "probe task join error: {join_err}");
                }
            }
        }

        reports
    }

    /// Cancel every probe and wait for the fleet to drain.
    pub async fn shutdown_and_wait(&mut self) -> Vec<ProbeReport> {
        self.shutdown.cancel();
        self.wait().await
    }
}

impl Default for ProbeFleet {
    fn default() -> Self {
        Self::new()
    }
}

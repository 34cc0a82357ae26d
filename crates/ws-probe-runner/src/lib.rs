/*
[INPUT]:  Public API exports for ws-probe-runner crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod fleet;

// Re-export main types for convenience
pub use config::EndpointsFile;
pub use fleet::{FleetSummary, ProbeFleet};

/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public ws-probe adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod catalog;
pub mod probe;

// Re-export commonly used types from catalog
pub use catalog::{
    builtin_endpoints,
    enabled_endpoints,
    Endpoint,
};

// Re-export commonly used types from probe
pub use probe::{
    format_elapsed,
    CloseReason,
    ProbeClient,
    ProbeConfig,
    ProbeError,
    ProbeReport,
    DEFAULT_HEARTBEAT,
};

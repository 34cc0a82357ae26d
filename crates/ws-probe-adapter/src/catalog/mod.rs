/*
[INPUT]:  Exchange gateway definitions
[OUTPUT]: Ordered endpoint catalog for the probe fleet
[POS]:    Catalog layer - probe target inventory
[UPDATE]: When adding or retiring exchange gateways
*/

pub mod endpoints;

pub use endpoints::{builtin_endpoints, enabled_endpoints, Endpoint};

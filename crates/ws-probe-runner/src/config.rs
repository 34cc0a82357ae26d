/*
[INPUT]:  YAML endpoints file
[OUTPUT]: Parsed endpoint catalog override
[POS]:    Configuration layer - probe target setup
[UPDATE]: When adding new configuration options
*/

use serde::{Deserialize, Serialize};
use ws_probe_adapter::Endpoint;

/// Endpoint catalog override replacing the builtin table
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointsFile {
    /// Probe targets, in probe order
    pub endpoints: Vec<Endpoint>,
}

impl EndpointsFile {
    /// Load an endpoint catalog from a YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Entries the fleet actually probes
    pub fn enabled(&self) -> Vec<Endpoint> {
        self.endpoints
            .iter()
            .filter(|endpoint| endpoint.enabled)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_endpoints_yaml() {
        let yaml = r#"
endpoints:
  - exchange: Bybit
    url: wss://stream.bybit.com/realtime
  - exchange: Echo
    url: ws://echo.websocket.events
    enabled: false
"#;
        let parsed: EndpointsFile = serde_yaml::from_str(yaml).expect("valid endpoints yaml");
        assert_eq!(parsed.endpoints.len(), 2);
        assert!(parsed.endpoints[0].enabled, "enabled defaults to true");

        let enabled = parsed.enabled();
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].exchange, "Bybit");
    }

    #[test]
    fn test_reject_garbage_yaml() {
        let parsed: Result<EndpointsFile, _> = serde_yaml::from_str("endpoints: 12");
        assert!(parsed.is_err());
    }
}

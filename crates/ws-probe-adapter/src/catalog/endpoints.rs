/*
[INPUT]:  Hard-coded exchange gateway table
[OUTPUT]: Endpoint records for the probe fleet
[POS]:    Catalog layer - builtin target list
[UPDATE]: When an exchange moves or retires a stream gateway
*/

use serde::{Deserialize, Serialize};

/// One probe target: a single exchange stream gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Endpoint {
    /// Exchange display name used in logs
    pub exchange: String,
    /// WebSocket gateway address (ws:// or wss://)
    pub url: String,
    /// Disabled entries stay in the catalog but are never probed
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Endpoint {
    /// Create an enabled endpoint.
    pub fn new(exchange: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            exchange: exchange.into(),
            url: url.into(),
            enabled: true,
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// (exchange, url, enabled) rows, in probe order.
///
/// Disabled rows are gateways that require credentials at handshake time or
/// demo servers kept around for local smoke checks.
const BUILTIN: &[(&str, &str, bool)] = &[
    // echo demo servers
    ("Echo", "ws://echo.websocket.events", false),
    ("Echo", "ws://echo.websocket.org", false),
    // Bybit
    ("Bybit", "wss://stream.bybit.com/realtime", true),
    ("Bybit", "wss://stream.bybit.com/realtime_public", true),
    ("Bybit", "wss://stream.bybit.com/realtime_private", true),
    ("Bybit", "wss://stream.bybit.com/spot/quote/ws/v1", true),
    ("Bybit", "wss://stream.bybit.com/spot/quote/ws/v2", true),
    ("Bybit", "wss://stream.bybit.com/spot/ws", true),
    ("Bybit", "wss://stream.bybit.com/perpetual/ws/v1/realtime_public", true),
    ("Bybit", "wss://stream.bybit.com/trade/option/usdc/private/v1", true),
    // Binance
    ("Binance", "wss://stream.binance.com:9443/stream", true),
    ("Binance", "wss://nbstream.binance.com/lvt-p/stream", true),
    ("Binance", "wss://fstream.binance.com/stream", true),
    ("Binance", "wss://fstream-auth.binance.com/stream", false),
    ("Binance", "wss://dstream.binance.com/stream", true),
    ("Binance", "wss://vstream.binance.com/stream", true),
    // OKX
    ("OKX", "wss://ws.okx.com:8443/ws/v5/public", true),
    ("OKX", "wss://ws.okx.com:8443/ws/v5/private", true),
    // Phemex
    ("Phemex", "wss://phemex.com/ws", true),
    // Bitget
    ("Bitget", "wss://ws.bitget.com/spot/v1/stream", true),
    ("Bitget", "wss://ws.bitget.com/mix/v1/stream", true),
    // MEXC
    ("MEXC", "wss://contract.mexc.com/ws", true),
    // FTX
    ("FTX", "wss://ftx.com/ws/", true),
    // BitMEX
    ("BitMEX", "wss://ws.bitmex.com/realtime", true),
    // bitFlyer
    ("bitFlyer", "wss://io.lightstream.bitflyer.com/socket.io/?EIO=3&transport=websocket", true),
    ("bitFlyer", "wss://ws.lightstream.bitflyer.com/json-rpc", true),
    // GMO Coin
    ("GMO Coin", "wss://api.coin.z.com/ws/public/v1", true),
    ("GMO Coin", "wss://api.coin.z.com/ws/private/v1", false),
    // Liquid
    ("Liquid", "wss://tap.liquid.com/app/LiquidTapClient", true),
    // bitbank
    ("bitbank", "wss://stream.bitbank.cc/socket.io/?EIO=3&transport=websocket", true),
    // Coincheck
    ("Coincheck", "wss://ws-api.coincheck.com/", true),
];

/// Full ordered catalog, disabled entries included.
pub fn builtin_endpoints() -> Vec<Endpoint> {
    BUILTIN
        .iter()
        .map(|(exchange, url, enabled)| Endpoint {
            exchange: (*exchange).to_string(),
            url: (*url).to_string(),
            enabled: *enabled,
        })
        .collect()
}

/// The subset the fleet actually probes.
pub fn enabled_endpoints() -> Vec<Endpoint> {
    builtin_endpoints()
        .into_iter()
        .filter(|endpoint| endpoint.enabled)
        .collect()
}

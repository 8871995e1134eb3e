use serde::Deserialize;
use std::collections::HashMap;

/// Configuration for a single named client.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Connection string for the error-tracking service. Absent means the
    /// client is constructed in its library-default, inert state.
    pub dsn: Option<String>,
    /// Client options passed through to the wrapped constructor untouched.
    pub options: serde_json::Map<String, serde_json::Value>,
}

/// Top-level configuration surface of the shim.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Named client table. The `"default"` key is the well-known fallback
    /// and is permitted to be absent.
    pub clients: HashMap<String, ClientConfig>,
    /// Whether the lifecycle hooks are registered at all.
    pub capture_errors: bool,
    /// Size of the scratch block reserved per request so one final report
    /// can still be formatted under memory exhaustion.
    pub reserve_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clients: HashMap::new(),
            capture_errors: true,
            reserve_bytes: 10 * 1024,
        }
    }
}

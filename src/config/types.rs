use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracing filter directive (e.g. "info", "outmux=debug").
    pub log_filter: String,
    pub terminal: TerminalSettings,
    pub transport: TransportConfig,
}

/// Terminal surface behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalSettings {
    /// Raise a terminal without stealing input focus when it is shown.
    pub preserve_focus: bool,
}

/// Transport-layer behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Abort on the first undecodable request instead of skipping it.
    pub strict_decode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            terminal: TerminalSettings::default(),
            transport: TransportConfig::default(),
        }
    }
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            preserve_focus: true,
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            strict_decode: false,
        }
    }
}

//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Root configuration for bhishaj
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Chat screen behaviour
    #[serde(default)]
    pub chat: ChatConfig,
    /// X-ray screen behaviour
    #[serde(default)]
    pub xray: XrayConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Directory for log files
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// Module-specific overrides
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            dir: default_log_dir(),
            overrides: HashMap::new(),
        }
    }
}

/// Chat session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Gap between consecutive attachment messages of one send
    #[serde(default = "default_attachment_stagger_ms")]
    pub attachment_stagger_ms: u64,
    /// Extra wait after the last attachment before the bot replies
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
    /// Characters of the first input kept in a session title
    #[serde(default = "default_title_max_chars")]
    pub title_max_chars: usize,
    /// Start with example sessions in the history list
    #[serde(default)]
    pub seed_examples: bool,
}

fn default_attachment_stagger_ms() -> u64 {
    500
}

fn default_reply_delay_ms() -> u64 {
    1000
}

fn default_title_max_chars() -> usize {
    30
}

impl ChatConfig {
    pub fn attachment_stagger(&self) -> Duration {
        Duration::from_millis(self.attachment_stagger_ms)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            attachment_stagger_ms: default_attachment_stagger_ms(),
            reply_delay_ms: default_reply_delay_ms(),
            title_max_chars: default_title_max_chars(),
            seed_examples: false,
        }
    }
}

/// X-ray analysis settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XrayConfig {
    /// Simulated analysis time
    #[serde(default = "default_analysis_delay_ms")]
    pub analysis_delay_ms: u64,
}

fn default_analysis_delay_ms() -> u64 {
    3000
}

impl XrayConfig {
    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }
}

impl Default for XrayConfig {
    fn default() -> Self {
        Self {
            analysis_delay_ms: default_analysis_delay_ms(),
        }
    }
}

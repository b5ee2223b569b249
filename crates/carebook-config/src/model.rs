//! Configuration schema for Carebook.

use serde::{Deserialize, Serialize};

/// Root config for the Carebook service.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CarebookConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl CarebookConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> CarebookConfigBuilder {
        CarebookConfigBuilder::new()
    }
}

/// Builder for assembling a `CarebookConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct CarebookConfigBuilder {
    config: CarebookConfig,
}

impl CarebookConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: CarebookConfig::default(),
        }
    }

    /// Replace the assistant configuration.
    pub fn assistant(mut self, assistant: AssistantConfig) -> Self {
        self.config.assistant = assistant;
        self
    }

    /// Replace the notifier configuration.
    pub fn notifier(mut self, notifier: NotifierConfig) -> Self {
        self.config.notifier = notifier;
        self
    }

    /// Replace the server configuration.
    pub fn server(mut self, server: ServerConfig) -> Self {
        self.config.server = server;
        self
    }

    /// Finalize and return the built `CarebookConfig`.
    pub fn build(self) -> CarebookConfig {
        self.config
    }
}

/// Configuration for the conversational dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssistantConfig {
    /// Per-turn ceiling on interpreter tool requests.
    #[serde(default = "default_max_tool_steps")]
    pub max_tool_steps: usize,
    /// Keywords that gate natural-date detection.
    #[serde(default = "default_scheduling_keywords")]
    pub scheduling_keywords: Vec<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            max_tool_steps: default_max_tool_steps(),
            scheduling_keywords: default_scheduling_keywords(),
        }
    }
}

/// Configuration for email notifications.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotifierConfig {
    /// Whether notifications are dispatched at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Sender address placed on outgoing messages.
    #[serde(default)]
    pub sender: Option<String>,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sender: None,
        }
    }
}

/// Configuration for the HTTP listener.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_max_tool_steps() -> usize {
    8
}

fn default_scheduling_keywords() -> Vec<String> {
    vec![
        "appointment".to_string(),
        "schedule".to_string(),
        "book".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

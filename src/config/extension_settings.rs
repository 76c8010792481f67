use crate::core::traits::ConfigStore;
use async_trait::async_trait;
use std::collections::HashMap;

/// In-memory extension settings, keyed by gateway name and setting key.
///
/// Gateway names are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ExtensionSettings {
    values: HashMap<(String, String), String>,
}

impl ExtensionSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, gateway: &str, key: &str, value: impl Into<String>) {
        self.values
            .insert((gateway.to_ascii_lowercase(), key.to_string()), value.into());
    }

    /// Builder form of [`ExtensionSettings::set`]
    pub fn with(mut self, gateway: &str, key: &str, value: impl Into<String>) -> Self {
        self.set(gateway, key, value);
        self
    }

    pub fn lookup(&self, gateway: &str, key: &str) -> Option<&str> {
        self.values
            .get(&(gateway.to_ascii_lowercase(), key.to_string()))
            .map(String::as_str)
    }
}

#[async_trait]
impl ConfigStore for ExtensionSettings {
    async fn get(&self, gateway: &str, key: &str) -> Option<String> {
        self.lookup(gateway, key).map(str::to_string)
    }
}

use async_trait::async_trait;

/// Source of per-gateway extension settings (merchant code, keys, callback URL).
///
/// Gateways read their credentials through this trait on every call so that
/// settings changed by an operator are picked up without a restart.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Look up a setting by gateway name and key.
    ///
    /// Returns `None` when the setting is not configured.
    async fn get(&self, gateway: &str, key: &str) -> Option<String>;
}

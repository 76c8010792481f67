use serde::{Deserialize, Serialize};

/// Display and identity information for a gateway extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayMetadata {
    pub display_name: String,
    pub version: String,
    pub author: String,
    pub website: String,
}

/// A credential or setting the gateway needs before it can be used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigField {
    pub name: String,
    pub friendly_name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
}

impl ConfigField {
    /// Required free-text setting
    pub fn text(name: &str, friendly_name: &str) -> Self {
        Self {
            name: name.to_string(),
            friendly_name: friendly_name.to_string(),
            field_type: FieldType::Text,
            required: true,
        }
    }
}

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Content type sent to Lookout for Vision and stamped on stored uploads.
pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// JSON document posted by the web client.
#[derive(Debug, Deserialize)]
pub struct ImageUpload {
    /// Data URI (`data:image/jpeg;base64,...`) or bare base64 payload.
    pub image: String,
}

/// Where Lookout for Vision says the analysed image came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
}

/// Classification result returned to the web client verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnomalyResult {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source: Option<ImageSource>,
    pub is_anomalous: bool,
    pub confidence: f64,
}

impl AnomalyResult {
    #[must_use]
    pub fn new(is_anomalous: bool, confidence: f64) -> Self {
        Self {
            source: None,
            is_anomalous,
            confidence,
        }
    }

    /// Confidence as a whole percentage, truncated rather than rounded.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn confidence_percent(&self) -> i64 {
        (self.confidence * 100.0).trunc() as i64
    }
}

/// Contact attributes handed to the Connect contact flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallAttributes {
    #[serde(rename = "Confidence")]
    pub confidence: String,
}

impl CallAttributes {
    #[must_use]
    pub fn from_result(result: &AnomalyResult) -> Self {
        Self {
            confidence: result.confidence_percent().to_string(),
        }
    }

    #[must_use]
    pub fn into_map(self) -> HashMap<String, String> {
        HashMap::from([("Confidence".to_string(), self.confidence)])
    }
}

/// Everything Amazon Connect needs to place the alert call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundCall {
    pub destination_number: String,
    pub contact_flow_id: String,
    pub instance_id: String,
    pub source_number: String,
    pub attributes: CallAttributes,
}

/// Metadata S3 hands back after a successful write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredObject {
    pub e_tag: Option<String>,
}

//! Lookout for Vision anomaly detection

use async_trait::async_trait;
use aws_sdk_lookoutvision::Client as LookoutClient;
use aws_sdk_lookoutvision::error::DisplayErrorContext;
use aws_sdk_lookoutvision::primitives::ByteStream;
use aws_sdk_lookoutvision::types::DetectAnomalyResult;

use super::AnomalyDetector;
use crate::core::models::{AnomalyResult, ImageSource};
use crate::errors::AlertError;

pub struct LookoutDetector {
    client: LookoutClient,
}

impl LookoutDetector {
    pub fn new(client: LookoutClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AnomalyDetector for LookoutDetector {
    async fn detect(
        &self,
        project: &str,
        model_version: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<AnomalyResult, AlertError> {
        let output = self
            .client
            .detect_anomalies()
            .project_name(project)
            .model_version(model_version)
            .content_type(content_type)
            .body(ByteStream::from(bytes.to_vec()))
            .send()
            .await
            .map_err(|e| {
                AlertError::ClassificationError(format!(
                    "detect_anomalies {project} v{model_version}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let result = output.detect_anomaly_result().ok_or_else(|| {
            AlertError::ClassificationError("response has no DetectAnomalyResult".to_string())
        })?;

        to_anomaly_result(result)
    }
}

/// Converts the SDK shape, rejecting results without an anomaly flag or
/// confidence score.
pub fn to_anomaly_result(result: &DetectAnomalyResult) -> Result<AnomalyResult, AlertError> {
    let is_anomalous = result.is_anomalous().ok_or_else(|| {
        AlertError::ClassificationError("DetectAnomalyResult has no IsAnomalous".to_string())
    })?;
    let confidence = result.confidence().ok_or_else(|| {
        AlertError::ClassificationError("DetectAnomalyResult has no Confidence".to_string())
    })?;

    Ok(AnomalyResult {
        source: result.source().map(|s| ImageSource {
            source_type: s.r#type().map(ToString::to_string),
        }),
        is_anomalous,
        confidence: widen_confidence(confidence),
    })
}

/// Widens through the shortest decimal form so `0.95f32` stays `0.95`
/// instead of `0.949999988...`, which would truncate to 94 percent.
fn widen_confidence(confidence: f32) -> f64 {
    confidence
        .to_string()
        .parse::<f64>()
        .unwrap_or_else(|_| f64::from(confidence))
}

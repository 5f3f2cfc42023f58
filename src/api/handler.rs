//! API Lambda handler: decode the upload, store it, classify it and call
//! someone when it is anomalous.
//!
//! Failure policy per step:
//! - decode, storage and classification failures end the request with a
//!   structured JSON error (CORS headers included)
//! - a failed outbound call is logged and the classification result is still
//!   returned

use chrono::Utc;
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, warn};

use super::{helpers, parsing};
use crate::clients::Services;
use crate::core::models::{AnomalyResult, CallAttributes, IMAGE_CONTENT_TYPE, OutboundCall};
use crate::errors::AlertError;
use crate::utils::keys;

pub use self::function_handler as handler;

/// Lambda handler for the API entrypoint.
///
/// Always answers with an API Gateway proxy response; request-level failures
/// become 4xx/5xx responses rather than invocation errors.
#[tracing::instrument(level = "info", skip_all, fields(request_id = %event.context.request_id))]
pub async fn function_handler(
    services: &Services,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    let payload = event.payload;
    let origin = parsing::request_origin(&payload);

    if parsing::is_preflight(&payload) {
        info!("Answering CORS preflight");
        return Ok(helpers::preflight(origin));
    }

    // ========================================================================
    // Decode
    // ========================================================================

    let Some(origin) = origin else {
        error!("Request missing origin header");
        return Ok(helpers::from_error(
            &AlertError::DecodingError("missing origin header".to_string()),
            None,
        ));
    };

    let image = match parsing::extract_image(&payload) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to decode upload: {}", e);
            return Ok(helpers::from_error(&e, Some(origin)));
        }
    };

    info!(origin = %origin, size = image.len(), "Decoded image upload");

    // ========================================================================
    // Store, classify, notify
    // ========================================================================

    match process_image(services, &image).await {
        Ok(result) => Ok(helpers::ok_result(origin, &result)),
        Err(e) => {
            error!("Request failed: {}", e);
            Ok(helpers::from_error(&e, Some(origin)))
        }
    }
}

/// Runs the store, classify and notify steps for one decoded image.
pub async fn process_image(services: &Services, image: &[u8]) -> Result<AnomalyResult, AlertError> {
    let config = &services.config;
    let key = keys::key_for(Utc::now(), config.unique_upload_keys);

    let stored = services.store.put(&config.s3_bucket, &key, image).await?;
    info!(
        bucket = %config.s3_bucket,
        key = %key,
        size = image.len(),
        e_tag = stored.e_tag.as_deref().unwrap_or(""),
        "Upload written"
    );

    let result = services
        .detector
        .detect(
            &config.project_name,
            &config.model_version,
            image,
            IMAGE_CONTENT_TYPE,
        )
        .await?;
    info!(
        is_anomalous = result.is_anomalous,
        confidence = result.confidence,
        "Image classified"
    );

    if result.is_anomalous {
        notify(services, &result).await;
    }

    Ok(result)
}

/// Places the alert call; failures are logged, never returned.
async fn notify(services: &Services, result: &AnomalyResult) {
    let config = &services.config;
    let call = OutboundCall {
        destination_number: config.dest_number.clone(),
        contact_flow_id: config.flow_id.clone(),
        instance_id: config.instance_id.clone(),
        source_number: config.source_number.clone(),
        attributes: CallAttributes::from_result(result),
    };

    match services.caller.start_outbound_call(&call).await {
        Ok(Some(contact_id)) => {
            info!(contact_id = %contact_id, confidence = %call.attributes.confidence, "Outbound call started");
        }
        Ok(None) => warn!("Outbound call accepted without a contact id"),
        Err(e) => error!("Failed to start outbound call: {}", e),
    }
}

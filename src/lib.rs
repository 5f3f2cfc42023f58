//! Lookout Alert - an API Lambda that screens uploaded images for anomalies
//! and phones an operator when one is found.
//!
//! One request runs these steps in order:
//! 1. Decode the base64 image posted by the web front end
//! 2. Store it in S3 under `uploads/`
//! 3. Classify it with an Amazon Lookout for Vision model
//! 4. If it is anomalous, start an Amazon Connect outbound call that carries
//!    the confidence as a contact attribute
//! 5. Return the classification result with CORS headers
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda for serverless execution
//! - S3, Lookout for Vision and Connect through the AWS SDK
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use lookout_alert::clients::Services;
//! use lookout_alert::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lambda_runtime::Error> {
//!     lookout_alert::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
//!     let services = Services::from_sdk_config(config, &sdk_config);
//!
//!     lambda_runtime::run(lambda_runtime::service_fn(|event| {
//!         lookout_alert::api::handler(&services, event)
//!     }))
//!     .await
//! }
//! ```

pub mod api;
pub mod clients;
pub mod core;
pub mod errors;
pub mod utils;

pub use errors::AlertError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. It should be called once, before the runtime
/// starts polling for events. Calling it again is a no-op.
///
/// # Example
///
/// ```
/// lookout_alert::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

//! Client modules for external AWS service interactions
//!
//! Each service sits behind a one-method capability trait so the handler can
//! run against in-memory fakes in tests.

pub mod connect_client;
pub mod lookout_client;
pub mod s3_client;

use async_trait::async_trait;

use crate::core::config::AppConfig;
use crate::core::models::{AnomalyResult, OutboundCall, StoredObject};
use crate::errors::AlertError;

pub use connect_client::ConnectCallPlacer;
pub use lookout_client::LookoutDetector;
pub use s3_client::S3ImageStore;

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn put(&self, bucket: &str, key: &str, bytes: &[u8]) -> Result<StoredObject, AlertError>;
}

#[async_trait]
pub trait AnomalyDetector: Send + Sync {
    async fn detect(
        &self,
        project: &str,
        model_version: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<AnomalyResult, AlertError>;
}

#[async_trait]
pub trait CallPlacer: Send + Sync {
    /// Starts the call and returns the Connect contact id, if one was issued.
    async fn start_outbound_call(&self, call: &OutboundCall) -> Result<Option<String>, AlertError>;
}

/// Configuration plus the three service clients, built once per cold start.
pub struct Services {
    pub config: AppConfig,
    pub store: Box<dyn ImageStore>,
    pub detector: Box<dyn AnomalyDetector>,
    pub caller: Box<dyn CallPlacer>,
}

impl Services {
    #[must_use]
    pub fn new(
        config: AppConfig,
        store: Box<dyn ImageStore>,
        detector: Box<dyn AnomalyDetector>,
        caller: Box<dyn CallPlacer>,
    ) -> Self {
        Self {
            config,
            store,
            detector,
            caller,
        }
    }

    /// Wires up the real S3, Lookout for Vision and Connect clients.
    #[must_use]
    pub fn from_sdk_config(config: AppConfig, sdk_config: &aws_config::SdkConfig) -> Self {
        Self::new(
            config,
            Box::new(S3ImageStore::new(aws_sdk_s3::Client::new(sdk_config))),
            Box::new(LookoutDetector::new(aws_sdk_lookoutvision::Client::new(
                sdk_config,
            ))),
            Box::new(ConnectCallPlacer::new(aws_sdk_connect::Client::new(
                sdk_config,
            ))),
        )
    }
}

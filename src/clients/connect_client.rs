//! Amazon Connect outbound calls

use async_trait::async_trait;
use aws_sdk_connect::Client as ConnectClient;
use aws_sdk_connect::error::DisplayErrorContext;

use super::CallPlacer;
use crate::core::models::OutboundCall;
use crate::errors::AlertError;

pub struct ConnectCallPlacer {
    client: ConnectClient,
}

impl ConnectCallPlacer {
    pub fn new(client: ConnectClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CallPlacer for ConnectCallPlacer {
    async fn start_outbound_call(&self, call: &OutboundCall) -> Result<Option<String>, AlertError> {
        // Returns once Connect accepts the contact; the call itself is not awaited.
        let output = self
            .client
            .start_outbound_voice_contact()
            .destination_phone_number(&call.destination_number)
            .contact_flow_id(&call.contact_flow_id)
            .instance_id(&call.instance_id)
            .source_phone_number(&call.source_number)
            .set_attributes(Some(call.attributes.clone().into_map()))
            .send()
            .await
            .map_err(|e| {
                AlertError::TelephonyError(format!(
                    "start_outbound_voice_contact: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(output.contact_id().map(ToString::to_string))
    }
}

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use lambda_runtime::{Context, LambdaEvent};
use lookout_alert::api::handler;
use lookout_alert::clients::{AnomalyDetector, CallPlacer, ImageStore, Services};
use lookout_alert::core::config::AppConfig;
use lookout_alert::core::models::{AnomalyResult, OutboundCall, StoredObject};
use lookout_alert::errors::AlertError;
use serde_json::{Value, json};

const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0xFF, 0xD9];

// ============================================================================
// Recording fakes
// ============================================================================

#[derive(Default)]
struct Calls {
    puts: Vec<(String, String, Vec<u8>)>,
    detects: Vec<(String, String, Vec<u8>, String)>,
    outbound: Vec<OutboundCall>,
}

struct FakeStore {
    calls: Arc<Mutex<Calls>>,
    fail: bool,
}

#[async_trait]
impl ImageStore for FakeStore {
    async fn put(&self, bucket: &str, key: &str, bytes: &[u8]) -> Result<StoredObject, AlertError> {
        self.calls
            .lock()
            .unwrap()
            .puts
            .push((bucket.to_string(), key.to_string(), bytes.to_vec()));
        if self.fail {
            return Err(AlertError::StorageError("AccessDenied".to_string()));
        }
        Ok(StoredObject {
            e_tag: Some("\"etag\"".to_string()),
        })
    }
}

struct FakeDetector {
    calls: Arc<Mutex<Calls>>,
    result: Result<AnomalyResult, String>,
}

#[async_trait]
impl AnomalyDetector for FakeDetector {
    async fn detect(
        &self,
        project: &str,
        model_version: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<AnomalyResult, AlertError> {
        self.calls.lock().unwrap().detects.push((
            project.to_string(),
            model_version.to_string(),
            bytes.to_vec(),
            content_type.to_string(),
        ));
        self.result
            .clone()
            .map_err(AlertError::ClassificationError)
    }
}

struct FakeCaller {
    calls: Arc<Mutex<Calls>>,
    fail: bool,
}

#[async_trait]
impl CallPlacer for FakeCaller {
    async fn start_outbound_call(&self, call: &OutboundCall) -> Result<Option<String>, AlertError> {
        self.calls.lock().unwrap().outbound.push(call.clone());
        if self.fail {
            return Err(AlertError::TelephonyError("throttled".to_string()));
        }
        Ok(Some("contact-1".to_string()))
    }
}

struct Harness {
    services: Services,
    calls: Arc<Mutex<Calls>>,
}

#[derive(Default)]
struct Faults {
    store: bool,
    caller: bool,
}

fn test_config() -> AppConfig {
    AppConfig {
        project_name: "circuit-boards".to_string(),
        model_version: "1".to_string(),
        s3_bucket: "lookout-uploads".to_string(),
        instance_id: "instance-1".to_string(),
        flow_id: "flow-1".to_string(),
        source_number: "+18005550100".to_string(),
        dest_number: "+4915112345678".to_string(),
        unique_upload_keys: false,
    }
}

fn harness(result: Result<AnomalyResult, String>, faults: Faults) -> Harness {
    let calls = Arc::new(Mutex::new(Calls::default()));
    let services = Services::new(
        test_config(),
        Box::new(FakeStore {
            calls: calls.clone(),
            fail: faults.store,
        }),
        Box::new(FakeDetector {
            calls: calls.clone(),
            result,
        }),
        Box::new(FakeCaller {
            calls: calls.clone(),
            fail: faults.caller,
        }),
    );
    Harness { services, calls }
}

fn upload_event(origin: &str, bytes: &[u8]) -> LambdaEvent<Value> {
    let body = json!({ "image": format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes)) });
    LambdaEvent::new(
        json!({
            "httpMethod": "POST",
            "headers": { "origin": origin, "content-type": "application/json" },
            "body": STANDARD.encode(body.to_string()),
            "isBase64Encoded": true,
        }),
        Context::default(),
    )
}

fn body_json(response: &Value) -> Value {
    serde_json::from_str(response["body"].as_str().unwrap()).unwrap()
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[tokio::test]
async fn test_non_anomalous_image() {
    let h = harness(Ok(AnomalyResult::new(false, 0.87)), Faults::default());

    let response = handler(&h.services, upload_event("https://example.com", JPEG))
        .await
        .unwrap();

    assert_eq!(response["statusCode"], 200);
    assert_eq!(
        response["headers"]["Access-Control-Allow-Origin"],
        "https://example.com"
    );
    assert_eq!(response["headers"]["Access-Control-Allow-Headers"], "Content-Type");
    assert_eq!(
        response["headers"]["Access-Control-Allow-Methods"],
        "OPTIONS,POST,GET"
    );
    assert_eq!(
        body_json(&response),
        json!({ "IsAnomalous": false, "Confidence": 0.87 })
    );

    let calls = h.calls.lock().unwrap();
    assert_eq!(calls.puts.len(), 1);
    assert_eq!(calls.detects.len(), 1);
    assert!(calls.outbound.is_empty(), "no call for a normal image");
}

#[tokio::test]
async fn test_anomalous_image_places_call() {
    let h = harness(Ok(AnomalyResult::new(true, 0.95)), Faults::default());

    let response = handler(&h.services, upload_event("https://example.com", JPEG))
        .await
        .unwrap();

    assert_eq!(response["statusCode"], 200);
    assert_eq!(body_json(&response)["IsAnomalous"], true);

    let calls = h.calls.lock().unwrap();
    assert_eq!(calls.outbound.len(), 1);
    let call = &calls.outbound[0];
    assert_eq!(call.attributes.confidence, "95");
    assert_eq!(call.destination_number, "+4915112345678");
    assert_eq!(call.source_number, "+18005550100");
    assert_eq!(call.contact_flow_id, "flow-1");
    assert_eq!(call.instance_id, "instance-1");
}

#[tokio::test]
async fn test_services_receive_decoded_bytes() {
    let h = harness(Ok(AnomalyResult::new(false, 0.5)), Faults::default());

    handler(&h.services, upload_event("https://example.com", JPEG))
        .await
        .unwrap();

    let calls = h.calls.lock().unwrap();
    let (bucket, key, stored) = &calls.puts[0];
    assert_eq!(bucket, "lookout-uploads");
    assert!(key.starts_with("uploads/upload-"));
    assert!(key.ends_with(".jpg"));
    assert_eq!(stored.as_slice(), JPEG);

    let (project, version, classified, content_type) = &calls.detects[0];
    assert_eq!(project, "circuit-boards");
    assert_eq!(version, "1");
    assert_eq!(classified.as_slice(), JPEG);
    assert_eq!(content_type, "image/jpeg");
}

#[tokio::test]
async fn test_origin_echoed_verbatim() {
    for origin in [
        "http://localhost:3000",
        "https://images.factory.example.com",
        "https://example.com:8443",
    ] {
        let h = harness(Ok(AnomalyResult::new(false, 0.2)), Faults::default());
        let response = handler(&h.services, upload_event(origin, JPEG)).await.unwrap();
        assert_eq!(
            response["headers"]["Access-Control-Allow-Origin"].as_str(),
            Some(origin)
        );
    }
}

// ============================================================================
// Failure policy
// ============================================================================

#[tokio::test]
async fn test_telephony_failure_still_returns_result() {
    let h = harness(
        Ok(AnomalyResult::new(true, 0.99)),
        Faults {
            caller: true,
            ..Faults::default()
        },
    );

    let response = handler(&h.services, upload_event("https://example.com", JPEG))
        .await
        .unwrap();

    assert_eq!(response["statusCode"], 200);
    assert_eq!(
        body_json(&response),
        json!({ "IsAnomalous": true, "Confidence": 0.99 })
    );
    assert_eq!(h.calls.lock().unwrap().outbound.len(), 1);
}

#[tokio::test]
async fn test_storage_failure_skips_classification() {
    let h = harness(
        Ok(AnomalyResult::new(true, 0.99)),
        Faults {
            store: true,
            ..Faults::default()
        },
    );

    let response = handler(&h.services, upload_event("https://example.com", JPEG))
        .await
        .unwrap();

    assert_eq!(response["statusCode"], 502);
    assert_eq!(
        response["headers"]["Access-Control-Allow-Origin"],
        "https://example.com"
    );
    assert!(
        body_json(&response)["error"]
            .as_str()
            .unwrap()
            .contains("AccessDenied")
    );

    let calls = h.calls.lock().unwrap();
    assert!(calls.detects.is_empty());
    assert!(calls.outbound.is_empty());
}

#[tokio::test]
async fn test_classification_failure_returns_502() {
    let h = harness(Err("ModelNotHosted".to_string()), Faults::default());

    let response = handler(&h.services, upload_event("https://example.com", JPEG))
        .await
        .unwrap();

    assert_eq!(response["statusCode"], 502);
    let calls = h.calls.lock().unwrap();
    assert_eq!(calls.puts.len(), 1, "image was stored before classification");
    assert!(calls.outbound.is_empty());
}

#[tokio::test]
async fn test_malformed_body_returns_400() {
    let h = harness(Ok(AnomalyResult::new(true, 0.99)), Faults::default());
    let event = LambdaEvent::new(
        json!({
            "headers": { "origin": "https://example.com" },
            "body": STANDARD.encode(r#"{"picture": "abc"}"#),
        }),
        Context::default(),
    );

    let response = handler(&h.services, event).await.unwrap();

    assert_eq!(response["statusCode"], 400);
    assert_eq!(
        response["headers"]["Access-Control-Allow-Origin"],
        "https://example.com"
    );
    let calls = h.calls.lock().unwrap();
    assert!(calls.puts.is_empty());
    assert!(calls.detects.is_empty());
}

#[tokio::test]
async fn test_missing_origin_returns_400() {
    let h = harness(Ok(AnomalyResult::new(false, 0.1)), Faults::default());
    let body = json!({ "image": STANDARD.encode(JPEG) });
    let event = LambdaEvent::new(
        json!({ "headers": {}, "body": STANDARD.encode(body.to_string()) }),
        Context::default(),
    );

    let response = handler(&h.services, event).await.unwrap();

    assert_eq!(response["statusCode"], 400);
    assert!(h.calls.lock().unwrap().puts.is_empty());
}

#[tokio::test]
async fn test_preflight_touches_no_service() {
    let h = harness(Ok(AnomalyResult::new(true, 0.99)), Faults::default());
    let event = LambdaEvent::new(
        json!({
            "requestContext": { "http": { "method": "OPTIONS" } },
            "headers": { "origin": "https://example.com" },
        }),
        Context::default(),
    );

    let response = handler(&h.services, event).await.unwrap();

    assert_eq!(response["statusCode"], 200);
    assert_eq!(response["body"], "");
    assert_eq!(
        response["headers"]["Access-Control-Allow-Origin"],
        "https://example.com"
    );
    let calls = h.calls.lock().unwrap();
    assert!(calls.puts.is_empty());
    assert!(calls.detects.is_empty());
    assert!(calls.outbound.is_empty());
}

use std::env;

const DEFAULT_MODEL_VERSION: &str = "1";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Lookout for Vision project to invoke.
    pub project_name: String,
    pub model_version: String,
    /// Bucket the raw uploads are written to.
    pub s3_bucket: String,
    /// Amazon Connect instance id.
    pub instance_id: String,
    /// Contact flow that plays the alert.
    pub flow_id: String,
    /// Claimed Connect number the call originates from.
    pub source_number: String,
    /// Number that gets called when an anomaly is found.
    pub dest_number: String,
    /// Append a random suffix to upload keys so same-second uploads never collide.
    pub unique_upload_keys: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> Result<String, String> {
            match lookup(name) {
                Some(v) if !v.trim().is_empty() => Ok(v),
                Some(_) => Err(format!("{name}: environment variable is empty")),
                None => Err(format!("{name}: environment variable not found")),
            }
        };

        Ok(Self {
            project_name: required("PROJECT_NAME")?,
            model_version: lookup("MODEL_VERSION")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL_VERSION.to_string()),
            s3_bucket: required("S3_BUCKET")?,
            instance_id: required("INSTANCE_ID")?,
            flow_id: required("FLOW_ID")?,
            source_number: required("SOURCE_NUMBER")?,
            dest_number: required("DEST_NUMBER")?,
            unique_upload_keys: lookup("UNIQUE_UPLOAD_KEYS")
                .is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")),
        })
    }
}

use lambda_runtime::{Error, run, service_fn};
use lookout_alert::AlertError;
use lookout_alert::api::handler;
use lookout_alert::clients::Services;
use lookout_alert::core::config::AppConfig;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    lookout_alert::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        let e = AlertError::ConfigError(e);
        error!("{}", e);
        Error::from(e)
    })?;
    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let services = Services::from_sdk_config(config, &sdk_config);

    run(service_fn(|event| handler(&services, event))).await
}

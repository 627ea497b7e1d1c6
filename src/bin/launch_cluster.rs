use chrono::Utc;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

use news_headlines::adapters::aws::{load_sdk_config, EmrLauncher};
use news_headlines::config::ClusterConfig;
use news_headlines::handlers::cluster::handle_cluster_launch;
use news_headlines::models::HandlerResponse;
use news_headlines::telemetry;

async fn handle_request(
    _event: LambdaEvent<Value>,
    launcher: &EmrLauncher,
    config: &ClusterConfig,
) -> Result<HandlerResponse, Error> {
    handle_cluster_launch(launcher, config, Utc::now())
        .await
        .map_err(Error::from)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();

    let config = ClusterConfig::from_env()?;
    let launcher = EmrLauncher::new(&load_sdk_config().await);
    info!(release = %config.release_label, script = %config.spark_script, "launch_cluster ready");

    let (launcher, config) = (&launcher, &config);
    lambda_runtime::run(service_fn(move |event| async move {
        handle_request(event, launcher, config).await
    }))
    .await
}

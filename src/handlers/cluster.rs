//! Analytics cluster launcher.
//!
//! Launches a transient EMR cluster that runs the Spark script once and then
//! terminates itself: no keep-alive, no termination protection, and the
//! cluster is torn down if the step fails.

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{error, info, instrument};

use crate::adapters::{ClusterLauncher, ClusterRequest, InstanceGroup, InstanceRole, SparkStep};
use crate::config::ClusterConfig;
use crate::error::{PipelineError, Result};
use crate::models::HandlerResponse;

const STEP_NAME: &str = "Run Spark Application";
const COMMAND_RUNNER_JAR: &str = "command-runner.jar";

/// Describe the cluster to launch from configuration.
pub fn cluster_request(config: &ClusterConfig, now: DateTime<Utc>) -> ClusterRequest {
    ClusterRequest {
        name: format!("EMR-Spark-Job-{}", now.format("%Y%m%d-%H%M%S")),
        log_uri: config.log_uri(),
        release_label: config.release_label.clone(),
        instance_groups: vec![
            InstanceGroup {
                name: "Master nodes".to_string(),
                role: InstanceRole::Master,
                instance_type: config.master_instance_type.clone(),
                instance_count: 1,
            },
            InstanceGroup {
                name: "Core nodes".to_string(),
                role: InstanceRole::Core,
                instance_type: config.core_instance_type.clone(),
                instance_count: config.core_instance_count,
            },
        ],
        ec2_key_name: config.ec2_key_name.clone().filter(|k| !k.is_empty()),
        ec2_subnet_id: config.subnet_id.clone(),
        keep_alive_when_no_steps: false,
        termination_protected: false,
        steps: vec![SparkStep {
            name: STEP_NAME.to_string(),
            jar: COMMAND_RUNNER_JAR.to_string(),
            args: vec!["spark-submit".to_string(), config.spark_script.clone()],
        }],
        applications: vec!["Spark".to_string()],
        job_flow_role: config.job_flow_role.clone(),
        service_role: config.service_role.clone(),
        visible_to_all_users: true,
        idle_timeout_secs: config.idle_timeout_secs,
    }
}

/// Launch the cluster.
///
/// An unconfigured subnet fails the invocation before anything is called. A
/// launch failure is reported as a 500 response rather than an error.
#[instrument(level = "info", skip_all)]
pub async fn handle_cluster_launch<L>(
    launcher: &L,
    config: &ClusterConfig,
    now: DateTime<Utc>,
) -> Result<HandlerResponse>
where
    L: ClusterLauncher,
{
    if !config.subnet_configured() {
        error!(subnet = %config.subnet_id, "EC2_SUBNET_ID is not configured");
        return Err(PipelineError::Config("EC2_SUBNET_ID is not configured".to_string()));
    }

    let request = cluster_request(config, now);
    info!(
        name = %request.name,
        script = %config.spark_script,
        subnet = %request.ec2_subnet_id,
        "Launching EMR cluster"
    );

    let response = match launcher.launch(&request).await {
        Ok(job_flow_id) => {
            info!(%job_flow_id, "EMR cluster launched");
            HandlerResponse::ok(
                json!({
                    "message": "EMR cluster launched successfully",
                    "jobFlowId": job_flow_id,
                })
                .to_string(),
            )
        }
        Err(e) => {
            error!(error = %e, "Failed to launch EMR cluster");
            HandlerResponse::status(
                500,
                json!({
                    "message": "Failed to launch EMR cluster",
                    "error": e.to_string(),
                })
                .to_string(),
            )
        }
    };
    Ok(response)
}

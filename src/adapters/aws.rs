//! AWS SDK implementations of the service ports.

use aws_config::SdkConfig;
use aws_sdk_emr::types::{
    ActionOnFailure, Application, AutoTerminationPolicy, HadoopJarStepConfig,
    InstanceGroupConfig, InstanceRoleType, JobFlowInstancesConfig, MarketType, StepConfig,
};
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use tracing::{debug, info, instrument};

use super::{
    ClusterLauncher, ClusterRequest, CrawlStart, CrawlerStarter, FunctionInvoker, InstanceRole,
    ObjectStore,
};
use crate::error::{PipelineError, Result};

/// Load region and credentials the standard way (env, profile, IMDS).
pub async fn load_sdk_config() -> SdkConfig {
    aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await
}

#[derive(Debug, Clone)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_s3::Client::new(config),
        }
    }
}

impl ObjectStore for S3Store {
    #[instrument(level = "info", skip(self))]
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| PipelineError::service("s3:GetObject", DisplayErrorContext(&e)))?;
        let body = output
            .body
            .collect()
            .await
            .map_err(|e| PipelineError::service("s3:GetObject", e))?
            .into_bytes()
            .to_vec();
        debug!(bytes = body.len(), "Downloaded object");
        Ok(body)
    }

    #[instrument(level = "info", skip(self, body), fields(bytes = body.len()))]
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map(|_| ())
            .map_err(|e| PipelineError::service("s3:PutObject", DisplayErrorContext(&e)))
    }
}

#[derive(Debug, Clone)]
pub struct LambdaInvoker {
    client: aws_sdk_lambda::Client,
}

impl LambdaInvoker {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_lambda::Client::new(config),
        }
    }
}

impl FunctionInvoker for LambdaInvoker {
    #[instrument(level = "info", skip(self, payload))]
    async fn invoke_async(&self, function_name: &str, payload: &[u8]) -> Result<()> {
        let output = self
            .client
            .invoke()
            .function_name(function_name)
            .invocation_type(InvocationType::Event)
            .payload(Blob::new(payload.to_vec()))
            .send()
            .await
            .map_err(|e| PipelineError::service("lambda:Invoke", DisplayErrorContext(&e)))?;
        info!(status = output.status_code(), "Invocation accepted");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct GlueCrawler {
    client: aws_sdk_glue::Client,
}

impl GlueCrawler {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_glue::Client::new(config),
        }
    }
}

impl CrawlerStarter for GlueCrawler {
    #[instrument(level = "info", skip(self))]
    async fn start_crawler(&self, name: &str) -> Result<CrawlStart> {
        match self.client.start_crawler().name(name).send().await {
            Ok(_) => Ok(CrawlStart::Started),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_crawler_running_exception()) =>
            {
                Ok(CrawlStart::AlreadyRunning)
            }
            Err(err) => Err(PipelineError::service(
                "glue:StartCrawler",
                DisplayErrorContext(&err),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmrLauncher {
    client: aws_sdk_emr::Client,
}

impl EmrLauncher {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_emr::Client::new(config),
        }
    }
}

fn build_error(e: impl std::fmt::Display) -> PipelineError {
    PipelineError::service("emr:RunJobFlow", e)
}

impl ClusterLauncher for EmrLauncher {
    #[instrument(level = "info", skip_all, fields(name = %request.name))]
    async fn launch(&self, request: &ClusterRequest) -> Result<String> {
        let mut groups = Vec::with_capacity(request.instance_groups.len());
        for group in &request.instance_groups {
            let role = match group.role {
                InstanceRole::Master => InstanceRoleType::Master,
                InstanceRole::Core => InstanceRoleType::Core,
            };
            groups.push(
                InstanceGroupConfig::builder()
                    .name(&group.name)
                    .market(MarketType::OnDemand)
                    .instance_role(role)
                    .instance_type(&group.instance_type)
                    .instance_count(group.instance_count)
                    .build(),
            );
        }

        let instances = JobFlowInstancesConfig::builder()
            .set_instance_groups(Some(groups))
            .set_ec2_key_name(request.ec2_key_name.clone())
            .keep_job_flow_alive_when_no_steps(request.keep_alive_when_no_steps)
            .termination_protected(request.termination_protected)
            .ec2_subnet_id(&request.ec2_subnet_id)
            .build();

        let mut steps = Vec::with_capacity(request.steps.len());
        for step in &request.steps {
            let jar_step = HadoopJarStepConfig::builder()
                .jar(&step.jar)
                .set_args(Some(step.args.clone()))
                .build();
            steps.push(
                StepConfig::builder()
                    .name(&step.name)
                    .action_on_failure(ActionOnFailure::TerminateCluster)
                    .hadoop_jar_step(jar_step)
                    .build(),
            );
        }

        let applications = request
            .applications
            .iter()
            .map(|name| Application::builder().name(name).build())
            .collect::<Vec<_>>();

        let output = self
            .client
            .run_job_flow()
            .name(&request.name)
            .set_log_uri(request.log_uri.clone())
            .release_label(&request.release_label)
            .instances(instances)
            .set_steps(Some(steps))
            .set_applications(Some(applications))
            .job_flow_role(&request.job_flow_role)
            .service_role(&request.service_role)
            .visible_to_all_users(request.visible_to_all_users)
            .auto_termination_policy(
                AutoTerminationPolicy::builder()
                    .idle_timeout(request.idle_timeout_secs)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| PipelineError::service("emr:RunJobFlow", DisplayErrorContext(&e)))?;

        output
            .job_flow_id()
            .map(str::to_string)
            .ok_or_else(|| build_error("response did not include a job flow id"))
    }
}

//! Ports to the external services the handlers call.
//!
//! Each handler is generic over these traits so it can run against the AWS
//! SDK in Lambda, against the local file system from the CLI, or against
//! in-memory fakes in tests.
//!
//! | Port | AWS implementation | Other |
//! |------|--------------------|-------|
//! | [`ObjectStore`] | [`aws::S3Store`] | [`local::LocalStore`] |
//! | [`PageFetcher`] | – | [`crate::scrapers::HttpFetcher`] |
//! | [`FunctionInvoker`] | [`aws::LambdaInvoker`] | |
//! | [`CrawlerStarter`] | [`aws::GlueCrawler`] | |
//! | [`ClusterLauncher`] | [`aws::EmrLauncher`] | |

pub mod aws;
pub mod local;

use crate::error::Result;

/// Blob storage addressed by bucket and key.
pub trait ObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;
}

/// A fetched HTTP response, status left uninterpreted.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: Vec<u8>,
}

pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

/// Fire-and-forget invocation of another function.
pub trait FunctionInvoker {
    async fn invoke_async(&self, function_name: &str, payload: &[u8]) -> Result<()>;
}

/// Outcome of asking the catalog crawler to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlStart {
    Started,
    AlreadyRunning,
}

pub trait CrawlerStarter {
    async fn start_crawler(&self, name: &str) -> Result<CrawlStart>;
}

/// Everything needed to launch the auto-terminating analytics cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterRequest {
    pub name: String,
    pub log_uri: Option<String>,
    pub release_label: String,
    pub instance_groups: Vec<InstanceGroup>,
    pub ec2_key_name: Option<String>,
    pub ec2_subnet_id: String,
    pub keep_alive_when_no_steps: bool,
    pub termination_protected: bool,
    pub steps: Vec<SparkStep>,
    pub applications: Vec<String>,
    pub job_flow_role: String,
    pub service_role: String,
    pub visible_to_all_users: bool,
    pub idle_timeout_secs: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceRole {
    Master,
    Core,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceGroup {
    pub name: String,
    pub role: InstanceRole,
    pub instance_type: String,
    pub instance_count: i32,
}

/// A `command-runner.jar` step; the cluster is terminated if it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparkStep {
    pub name: String,
    pub jar: String,
    pub args: Vec<String>,
}

pub trait ClusterLauncher {
    /// Launch the cluster and return its job-flow id.
    async fn launch(&self, request: &ClusterRequest) -> Result<String>;
}

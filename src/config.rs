//! Per-function configuration.
//!
//! Every option can be set with a flag or an environment variable; Lambda
//! functions read them from the environment only via `from_env()`.

use clap::Parser;
use std::time::Duration;

use crate::error::{PipelineError, Result};

/// Subnet id left in place when `EC2_SUBNET_ID` has not been configured.
pub const SUBNET_PLACEHOLDER: &str = "subnet-xxxxxxxxxxxxxxxxx";

fn parse_env_only<T: Parser>() -> Result<T> {
    T::try_parse_from([env!("CARGO_PKG_NAME")]).map_err(|e| PipelineError::Config(e.to_string()))
}

/// Homepage snapshot settings.
#[derive(Parser, Debug, Clone)]
pub struct FetchConfig {
    /// Bucket raw homepages are written to
    #[arg(long, env = "RAW_BUCKET", default_value = "pacialcorte3-2025")]
    pub bucket: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub http_timeout_secs: u64,
}

impl FetchConfig {
    pub fn from_env() -> Result<Self> {
        parse_env_only()
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Headline extraction settings.
#[derive(Parser, Debug, Clone)]
pub struct ExtractConfig {
    /// Function invoked once the headline table has been written
    #[arg(long, env = "NEXT_FUNCTION_NAME", default_value = "lambda-333-dev3")]
    pub next_function_name: String,

    /// Seconds to wait between writing the table and invoking the next function
    #[arg(long, env = "INVOKE_DELAY_SECS", default_value_t = 20)]
    pub invoke_delay_secs: u64,
}

impl ExtractConfig {
    pub fn from_env() -> Result<Self> {
        parse_env_only()
    }

    pub fn invoke_delay(&self) -> Duration {
        Duration::from_secs(self.invoke_delay_secs)
    }
}

/// Catalog crawler settings.
#[derive(Parser, Debug, Clone)]
pub struct CrawlerConfig {
    #[arg(long, env = "CRAWLER_NAME", default_value = "noticias-crawler")]
    pub crawler_name: String,
}

impl CrawlerConfig {
    pub fn from_env() -> Result<Self> {
        parse_env_only()
    }
}

/// Analytics cluster settings.
#[derive(Parser, Debug, Clone)]
pub struct ClusterConfig {
    #[arg(long, env = "EMR_RELEASE_LABEL", default_value = "emr-6.15.0")]
    pub release_label: String,

    #[arg(long, env = "EMR_MASTER_INSTANCE_TYPE", default_value = "m5.xlarge")]
    pub master_instance_type: String,

    #[arg(long, env = "EMR_CORE_INSTANCE_TYPE", default_value = "m5.xlarge")]
    pub core_instance_type: String,

    /// Spark needs at least one core node
    #[arg(long, env = "EMR_CORE_INSTANCE_COUNT", default_value_t = 1,
          value_parser = clap::value_parser!(i32).range(1..))]
    pub core_instance_count: i32,

    /// Subnet the cluster is launched in; must reach S3
    #[arg(long, env = "EC2_SUBNET_ID", default_value = SUBNET_PLACEHOLDER)]
    pub subnet_id: String,

    #[arg(long, env = "EMR_EC2_DEFAULT_ROLE", default_value = "EMR_EC2_DefaultRole")]
    pub job_flow_role: String,

    #[arg(long, env = "EMR_DEFAULT_ROLE", default_value = "EMR_DefaultRole")]
    pub service_role: String,

    #[arg(long, env = "SPARK_SCRIPT_S3_PATH", default_value = "s3://parcialfinal2025/app/script.py")]
    pub spark_script: String,

    /// Bucket for cluster logs; logging is off when unset
    #[arg(long, env = "EMR_LOG_BUCKET")]
    pub log_bucket: Option<String>,

    /// Key pair for SSH access to the nodes
    #[arg(long, env = "EC2_KEY_NAME")]
    pub ec2_key_name: Option<String>,

    #[arg(long, env = "EMR_IDLE_TIMEOUT_SECONDS", default_value_t = 3600)]
    pub idle_timeout_secs: i64,
}

impl ClusterConfig {
    pub fn from_env() -> Result<Self> {
        parse_env_only()
    }

    /// `s3://{log_bucket}/elasticmapreduce/`, or `None` (cluster logging off)
    /// when no log bucket is configured.
    pub fn log_uri(&self) -> Option<String> {
        self.log_bucket
            .as_deref()
            .filter(|b| !b.is_empty())
            .map(|b| format!("s3://{b}/elasticmapreduce/"))
    }

    pub fn subnet_configured(&self) -> bool {
        !self.subnet_id.trim().is_empty() && self.subnet_id != SUBNET_PLACEHOLDER
    }
}

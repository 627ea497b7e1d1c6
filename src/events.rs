//! Minimal model of the S3 event notification payload.
//!
//! Only the fields the handlers read are modelled. The bucket is optional
//! because direct test invocations often omit it.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::utils::decode_object_key;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3EventRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Entity {
    #[serde(default)]
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3Bucket {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Object {
    pub key: String,
}

impl S3EventRecord {
    pub fn bucket(&self) -> &str {
        &self.s3.bucket.name
    }

    /// The object key with S3's form encoding undone.
    pub fn decoded_key(&self) -> Result<String> {
        decode_object_key(&self.s3.object.key)
    }
}

#[cfg(test)]
impl S3Event {
    pub fn single(bucket: &str, key: &str) -> Self {
        Self {
            records: vec![S3EventRecord {
                s3: S3Entity {
                    bucket: S3Bucket {
                        name: bucket.to_string(),
                    },
                    object: S3Object {
                        key: key.to_string(),
                    },
                },
            }],
        }
    }
}

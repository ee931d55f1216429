//! Serialization and upload of the record set to the object store.

pub mod keys;

use anyhow::{Context, Result};
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::primitives::ByteStream;
use tracing::error;

use crate::extract::Record;

/// Destination for the published artifact. Writes are atomic whole-object
/// puts; a failed put leaves nothing to clean up.
#[allow(async_fn_in_trait)]
pub trait ObjectStore {
    async fn put(&self, key: &str, body: Vec<u8>) -> Result<()>;
}

/// S3-backed store for one bucket, region taken from the resolved settings.
pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Store {
    pub async fn new(bucket: &str, region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        S3Store {
            client: aws_sdk_s3::Client::new(&config),
            bucket: bucket.to_string(),
        }
    }
}

impl ObjectStore for S3Store {
    async fn put(&self, key: &str, body: Vec<u8>) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map(|_| ())
            .context("failed to write object to S3")
    }
}

/// Serialize the record set to a JSON array and write it under `key`.
/// Single attempt; any failure is logged and reported through the flag.
pub async fn publish_records<S: ObjectStore>(store: &S, key: &str, records: &[Record]) -> bool {
    match try_publish(store, key, records).await {
        Ok(()) => true,
        Err(err) => {
            error!("error occurred during upload to object store: {err:#}");
            false
        }
    }
}

async fn try_publish<S: ObjectStore>(store: &S, key: &str, records: &[Record]) -> Result<()> {
    let payload = serde_json::to_vec(records).context("failed to serialize record set")?;
    store.put(key, payload).await
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// In-memory stand-in for S3, shared by the pipeline tests.
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub(crate) objects: Mutex<Vec<(String, Vec<u8>)>>,
    }

    impl ObjectStore for MemoryStore {
        async fn put(&self, key: &str, body: Vec<u8>) -> Result<()> {
            self.objects.lock().unwrap().push((key.to_string(), body));
            Ok(())
        }
    }

    pub(crate) struct FailingStore;

    impl ObjectStore for FailingStore {
        async fn put(&self, _key: &str, _body: Vec<u8>) -> Result<()> {
            anyhow::bail!("access denied")
        }
    }

    fn sample_records() -> Vec<Record> {
        let rows = [
            json!({"R1C1": "Val11", "R1C2": "Val12"}),
            json!({"R2C1": "Val21", "R2C2": "Val22"}),
        ];
        rows.iter()
            .map(|row| row.as_object().unwrap().clone())
            .collect()
    }

    #[tokio::test]
    async fn publish_writes_a_json_array_under_the_key() {
        let store = MemoryStore::default();
        let records = sample_records();

        assert!(publish_records(&store, "test_success_upload.json", &records).await);

        let objects = store.objects.lock().unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].0, "test_success_upload.json");
        let body: Value = serde_json::from_slice(&objects[0].1).unwrap();
        assert_eq!(body, json!(records));
    }

    #[tokio::test]
    async fn publish_failure_is_reported_as_a_flag() {
        let records = sample_records();
        assert!(!publish_records(&FailingStore, "test_error_upload.json", &records).await);
    }
}

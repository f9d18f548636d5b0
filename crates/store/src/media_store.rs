use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::StoreError;

/// Object storage for item images, keyed by bucket path
/// (`shops/<shop_id>/<file>`).
///
/// Stands in for the external bucket. Deletion of a missing object is not
/// an error (the bucket semantics the original backend exposes).
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn put_object(&self, path: &str, bytes: Vec<u8>) -> Result<(), StoreError>;

    async fn delete_object(&self, path: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> MediaStore for Arc<S>
where
    S: MediaStore + ?Sized,
{
    async fn put_object(&self, path: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        (**self).put_object(path, bytes).await
    }

    async fn delete_object(&self, path: &str) -> Result<(), StoreError> {
        (**self).delete_object(path).await
    }
}

/// In-memory media store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryMediaStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.objects
            .read()
            .map(|m| m.contains_key(path))
            .unwrap_or(false)
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn put_object(&self, path: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        let mut objects = self
            .objects
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        objects.insert(path.to_string(), bytes);
        Ok(())
    }

    async fn delete_object(&self, path: &str) -> Result<(), StoreError> {
        let mut objects = self
            .objects
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        objects.remove(path);
        Ok(())
    }
}

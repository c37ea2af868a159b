//! Redis-backed store

use super::{KeyValueStore, StoreError};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::info;

pub struct RedisStore {
    connection: ConnectionManager,
    namespace: String,
}

impl RedisStore {
    pub async fn connect(url: &str, namespace: impl Into<String>) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let connection = client.get_connection_manager().await?;
        let namespace = namespace.into();
        info!(namespace = %namespace, "Connected to Redis");
        Ok(Self {
            connection,
            namespace,
        })
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }
}

/// Escape glob metacharacters so `raw` only matches itself in SCAN patterns.
fn escape_glob(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(self.namespaced(key)).await?;
        Ok(value)
    }

    async fn list(&self, prefix: &str) -> Result<Vec<(String, String)>, StoreError> {
        let mut conn = self.connection.clone();
        let pattern = format!("{}*", escape_glob(&self.namespaced(prefix)));
        let mut keys = Vec::new();
        {
            let mut iter: redis::AsyncIter<String> = conn.scan_match(pattern).await?;
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
        }
        // SCAN may report a key more than once.
        keys.sort();
        keys.dedup();

        let strip = self.namespace.len() + 1;
        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            // Keys may vanish between KEYS and GET.
            let value: Option<String> = conn.get(&key).await?;
            if let Some(value) = value {
                entries.push((key[strip..].to_string(), value));
            }
        }
        Ok(entries)
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        let _: () = conn.set(self.namespaced(key), value).await?;
        Ok(())
    }

    async fn put_if_absent(&self, key: &str, value: String) -> Result<bool, StoreError> {
        let mut conn = self.connection.clone();
        let inserted: bool = conn.set_nx(self.namespaced(key), value).await?;
        Ok(inserted)
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let mut conn = self.connection.clone();
        let removed: i64 = conn.del(self.namespaced(key)).await?;
        Ok(removed > 0)
    }
}

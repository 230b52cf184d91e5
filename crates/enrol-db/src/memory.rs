use crate::store::UserStore;
use anyhow::{bail, Result};
use async_trait::async_trait;
use enrol_common::models::user::UserRecord;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local user store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, record: &UserRecord) -> Result<()> {
        if record.id.is_empty() {
            bail!("Refusing to store a user without an id");
        }
        let mut users = self.users.write().await;
        if users.insert(record.id.clone(), record.clone()).is_some() {
            tracing::debug!("Overwrote existing user {}", record.id);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>> {
        let mut users: Vec<UserRecord> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(users)
    }
}

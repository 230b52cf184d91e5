use crate::repos::user::UserRepo;
use crate::store::UserStore;
use anyhow::{bail, Result};
use async_trait::async_trait;
use enrol_common::models::user::UserRecord;
use sqlx::PgPool;

/// User store backed by the `"user"` table.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, record: &UserRecord) -> Result<()> {
        if record.id.is_empty() {
            bail!("Refusing to store a user without an id");
        }
        UserRepo::upsert(
            &self.pool,
            &record.id,
            &record.first_name,
            &record.last_name,
            record.email.as_deref(),
            record.marketing_consent,
        )
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>> {
        Ok(UserRepo::get_by_id(&self.pool, id).await?.map(UserRecord::from))
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>> {
        Ok(UserRepo::list(&self.pool)
            .await?
            .into_iter()
            .map(UserRecord::from)
            .collect())
    }
}

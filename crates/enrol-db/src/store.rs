use anyhow::Result;
use async_trait::async_trait;
use enrol_common::models::user::UserRecord;

/// Key-value persistence for user records, keyed by the derived user id.
///
/// Implementations must be safe for concurrent use. `insert` is last-write-wins
/// on an existing id; no other uniqueness is enforced.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert or overwrite the record stored under `record.id`.
    async fn insert(&self, record: &UserRecord) -> Result<()>;

    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>>;

    /// All stored records, ordered by id.
    async fn list_all(&self) -> Result<Vec<UserRecord>>;
}

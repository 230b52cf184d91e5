use crate::error::FlowError;
use enrol_common::models::user::{apply_consent, UserRecord};
use enrol_db::UserStore;

/// Fetch one user with the consent filter applied.
///
/// Callers must have verified the bearer token already.
pub async fn get_user(store: &dyn UserStore, id: &str) -> Result<UserRecord, FlowError> {
    match store.find_by_id(id).await? {
        Some(record) => Ok(apply_consent(record)),
        None => Err(FlowError::NotFound),
    }
}

/// Every stored user, unfiltered.
pub async fn list_users(store: &dyn UserStore) -> Result<Vec<UserRecord>, FlowError> {
    Ok(store.list_all().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use enrol_db::MemoryUserStore;

    fn record(id: &str, consent: bool) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: Some(format!("{}@example.com", id)),
            marketing_consent: consent,
        }
    }

    #[tokio::test]
    async fn test_get_user_redacts_email_without_consent() {
        let store = MemoryUserStore::new();
        store.insert(&record("no", false)).await.unwrap();

        let user = get_user(&store, "no").await.unwrap();
        assert!(user.email.is_none());

        // stored copy keeps the email
        let stored = store.find_by_id("no").await.unwrap().unwrap();
        assert_eq!(stored.email.as_deref(), Some("no@example.com"));
    }

    #[tokio::test]
    async fn test_get_user_keeps_email_with_consent() {
        let store = MemoryUserStore::new();
        store.insert(&record("yes", true)).await.unwrap();

        let user = get_user(&store, "yes").await.unwrap();
        assert_eq!(user.email.as_deref(), Some("yes@example.com"));
    }

    #[tokio::test]
    async fn test_get_user_missing_is_not_found() {
        let store = MemoryUserStore::new();
        assert!(matches!(
            get_user(&store, "missing").await,
            Err(FlowError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_users_unfiltered() {
        let store = MemoryUserStore::new();
        store.insert(&record("a", false)).await.unwrap();
        store.insert(&record("b", true)).await.unwrap();

        let users = list_users(&store).await.unwrap();
        assert_eq!(users.len(), 2);
        assert!(users.iter().all(|u| u.email.is_some()));
    }
}

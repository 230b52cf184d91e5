use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use enrol_common::models::user::UserRecord;
use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub marketing_consent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            id: row.user_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            marketing_consent: row.marketing_consent,
        }
    }
}

pub struct UserRepo;

impl UserRepo {
    /// Insert a user, overwriting profile fields if the id already exists.
    /// `created_at` is preserved across overwrites.
    pub async fn upsert(
        pool: &PgPool,
        user_id: &str,
        first_name: &str,
        last_name: &str,
        email: Option<&str>,
        marketing_consent: bool,
    ) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO "user" (user_id, first_name, last_name, email, marketing_consent)
               VALUES ($1, $2, $3, $4, $5)
               ON CONFLICT (user_id) DO UPDATE SET
                   first_name = EXCLUDED.first_name,
                   last_name = EXCLUDED.last_name,
                   email = EXCLUDED.email,
                   marketing_consent = EXCLUDED.marketing_consent,
                   updated_at = NOW()"#,
        )
        .bind(user_id)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(marketing_consent)
        .execute(pool)
        .await
        .context("Failed to upsert user")?;
        Ok(())
    }

    pub async fn get_by_id(pool: &PgPool, user_id: &str) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"SELECT user_id, first_name, last_name, email, marketing_consent, created_at, updated_at FROM "user" WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get user by id")?;
        Ok(row)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<UserRow>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"SELECT user_id, first_name, last_name, email, marketing_consent, created_at, updated_at FROM "user" ORDER BY user_id"#,
        )
        .fetch_all(pool)
        .await
        .context("Failed to list users")?;
        Ok(rows)
    }
}

use sqlx::PgPool;

use crate::users::repo_types::{NewUser, User};

impl User {
    /// Find a user by external uid.
    pub async fn find_by_uid(db: &PgPool, uid: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT uid, name, email, storage_gb, created_at, updated_at
            FROM users
            WHERE uid = $1
            "#,
        )
        .bind(uid)
        .fetch_optional(db)
        .await
    }

    /// Insert a user unless the uid is already taken; `None` means it was.
    /// An email collision still fails with a unique violation.
    pub async fn insert_if_absent(db: &PgPool, new: &NewUser) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (uid, name, email)
            VALUES ($1, $2, $3)
            ON CONFLICT (uid) DO NOTHING
            RETURNING uid, name, email, storage_gb, created_at, updated_at
            "#,
        )
        .bind(&new.uid)
        .bind(&new.name)
        .bind(&new.email)
        .fetch_optional(db)
        .await
    }

    /// Add `delta` to the stored quota in one statement.
    pub async fn increment_storage(
        db: &PgPool,
        uid: &str,
        delta: f64,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET storage_gb = storage_gb + $2, updated_at = now()
            WHERE uid = $1
            RETURNING uid, name, email, storage_gb, created_at, updated_at
            "#,
        )
        .bind(uid)
        .bind(delta)
        .fetch_optional(db)
        .await
    }
}

use sqlx::PgPool;
use uuid::Uuid;

use crate::users::repo_types::User;

impl User {
    /// Fetch every user. No ORDER BY: ordering is whatever the engine returns.
    pub async fn list_all(db: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, created_at, updated_at
            FROM users
            "#,
        )
        .fetch_all(db)
        .await
    }

    /// Find a user by primary key.
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Insert a new user. The id is generated fresh for every call.
    pub async fn insert(
        db: &PgPool,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(password)
        .fetch_one(db)
        .await
    }

    /// Persist new name/email for an existing row and refresh updated_at.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        name: &str,
        email: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, email = $3, updated_at = now()
            WHERE id = $1
            RETURNING id, name, email, password, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .fetch_one(db)
        .await
    }

    /// Delete by primary key; returns the number of rows removed.
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}

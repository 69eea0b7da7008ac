use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::repo_types::{Inserted, NewUser, User};

/// Credential store. Lookups return every match so callers can tell "none"
/// from "ambiguous".
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: NewUser) -> anyhow::Result<Inserted>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Vec<User>>;
    /// Replace the hash on every record with this email; returns rows touched.
    async fn update_password(&self, email: &str, password_hash: &str) -> anyhow::Result<u64>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> anyhow::Result<Inserted> {
        let res = sqlx::query(
            r#"
            INSERT INTO users (name, username, email, password_hash)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&user.name)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .execute(&self.db)
        .await;

        match res {
            Ok(_) => Ok(Inserted::Created),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(Inserted::EmailTaken),
            Err(e) => Err(e).context("insert user"),
        }
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, username, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_all(&self.db)
        .await
        .context("find users by email")?;
        Ok(users)
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE users
               SET password_hash = $2
             WHERE email = $1
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .execute(&self.db)
        .await
        .context("update password")?;
        Ok(res.rows_affected())
    }
}

use async_trait::async_trait;
use bcrypt::DEFAULT_COST;
use sqlx::PgPool;
use tracing::instrument;

use tokengate_core::hash_password_with_cost;
use tokengate_models::{SignUp, UserQuery, UserRecord};

use super::service::{UserStore, UserStoreError};

/// [`UserStore`] backed by the `users` table.
#[derive(Clone, Debug)]
pub struct PgUserStore {
    db: PgPool,
    cost: u32,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            cost: DEFAULT_COST,
        }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self, sign_up), fields(email = %sign_up.email))]
    async fn create(&self, sign_up: SignUp) -> Result<UserRecord, UserStoreError> {
        let password_hash = hash_password_with_cost(&sign_up.password, self.cost)?;

        let record = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (email, name, password_hash)
             VALUES ($1, $2, $3)
             RETURNING id, email, name, password_hash, created_at, updated_at",
        )
        .bind(&sign_up.email)
        .bind(&sign_up.name)
        .bind(&password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                UserStoreError::EmailTaken
            }
            _ => UserStoreError::Database(err),
        })?;

        Ok(record)
    }

    #[instrument(skip(self))]
    async fn find_one(&self, query: UserQuery) -> Result<UserRecord, UserStoreError> {
        let record = match query {
            UserQuery::Id(id) => {
                sqlx::query_as::<_, UserRecord>(
                    "SELECT id, email, name, password_hash, created_at, updated_at
                     FROM users WHERE id = $1",
                )
                .bind(id)
                .fetch_optional(&self.db)
                .await?
            }
            UserQuery::Email(email) => {
                sqlx::query_as::<_, UserRecord>(
                    "SELECT id, email, name, password_hash, created_at, updated_at
                     FROM users WHERE email = $1",
                )
                .bind(email)
                .fetch_optional(&self.db)
                .await?
            }
        };

        record.ok_or(UserStoreError::NotFound)
    }
}

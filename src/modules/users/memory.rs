use std::collections::HashMap;

use async_trait::async_trait;
use bcrypt::DEFAULT_COST;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

use tokengate_core::hash_password_with_cost;
use tokengate_models::{SignUp, UserQuery, UserRecord};

use super::service::{UserStore, UserStoreError};

/// In-process [`UserStore`]. Data is lost on restart.
#[derive(Debug)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, UserRecord>>,
    cost: u32,
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::with_cost(DEFAULT_COST)
    }

    /// Uses the given bcrypt cost; tests pass [`MIN_HASH_COST`](tokengate_core::MIN_HASH_COST).
    pub fn with_cost(cost: u32) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            cost,
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    #[instrument(skip(self, sign_up), fields(email = %sign_up.email))]
    async fn create(&self, sign_up: SignUp) -> Result<UserRecord, UserStoreError> {
        let password_hash = hash_password_with_cost(&sign_up.password, self.cost)?;

        // Write lock held across the uniqueness check and the insert
        let mut users = self.users.write().await;
        if users.values().any(|user| user.email == sign_up.email) {
            return Err(UserStoreError::EmailTaken);
        }

        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            email: sign_up.email,
            name: sign_up.name,
            password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(record.id, record.clone());

        Ok(record)
    }

    #[instrument(skip(self))]
    async fn find_one(&self, query: UserQuery) -> Result<UserRecord, UserStoreError> {
        let users = self.users.read().await;
        let found = match query {
            UserQuery::Id(id) => users.get(&id),
            UserQuery::Email(email) => users.values().find(|user| user.email == email),
        };

        found.cloned().ok_or(UserStoreError::NotFound)
    }
}

//! User storage behind the [`UserStore`] contract.
//!
//! - [`postgres`]: `sqlx` store used in production
//! - [`memory`]: in-process store for tests and local development

pub mod memory;
pub mod postgres;
pub mod service;

pub use memory::InMemoryUserStore;
pub use postgres::PgUserStore;
pub use service::{UserStore, UserStoreError};

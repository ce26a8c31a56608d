use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::payments::repo_types::{NewPayment, Payment, PaymentStatus};
use crate::users::repo_types::{NewUser, User};

mod memory;
mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key value violates unique constraint \"{0}\"")]
    UniqueViolation(String),

    #[error("value out of range: overflow")]
    OutOfRange,

    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                let constraint = db.constraint().unwrap_or("unknown").to_string();
                return StoreError::UniqueViolation(constraint);
            }
        }
        StoreError::Database(e)
    }
}

/// Persistence operations behind both services.
///
/// Every method is a single store round trip; callers never hold a lock or a
/// transaction across two calls.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user(&self, uid: &str) -> Result<Option<User>, StoreError>;

    /// `Ok(None)` when a user with the same uid already exists.
    async fn insert_user(&self, new: NewUser) -> Result<Option<User>, StoreError>;

    /// `Ok(None)` when no user matches; nothing is created in that case.
    async fn increment_storage(&self, uid: &str, delta: f64) -> Result<Option<User>, StoreError>;

    async fn insert_payment(&self, new: NewPayment) -> Result<Payment, StoreError>;

    async fn list_payments(&self) -> Result<Vec<Payment>, StoreError>;

    async fn set_payment_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
    ) -> Result<Option<Payment>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    async fn close(&self);
}

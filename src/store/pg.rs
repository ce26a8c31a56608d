use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::payments::repo_types::{NewPayment, Payment, PaymentStatus};
use crate::users::repo_types::{NewUser, User};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user(&self, uid: &str) -> Result<Option<User>, StoreError> {
        Ok(User::find_by_uid(&self.pool, uid).await?)
    }

    async fn insert_user(&self, new: NewUser) -> Result<Option<User>, StoreError> {
        Ok(User::insert_if_absent(&self.pool, &new).await?)
    }

    async fn increment_storage(&self, uid: &str, delta: f64) -> Result<Option<User>, StoreError> {
        Ok(User::increment_storage(&self.pool, uid, delta).await?)
    }

    async fn insert_payment(&self, new: NewPayment) -> Result<Payment, StoreError> {
        Ok(Payment::insert(&self.pool, &new).await?)
    }

    async fn list_payments(&self) -> Result<Vec<Payment>, StoreError> {
        Ok(Payment::list_all(&self.pool).await?)
    }

    async fn set_payment_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
    ) -> Result<Option<Payment>, StoreError> {
        Ok(Payment::set_status(&self.pool, id, &status).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }
}

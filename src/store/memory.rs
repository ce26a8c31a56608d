use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::payments::repo_types::{NewPayment, Payment, PaymentStatus};
use crate::users::repo_types::{NewUser, User};

#[derive(Default)]
struct Tables {
    users: HashMap<String, User>,
    payments: Vec<Payment>,
}

/// Process-local store with the same uniqueness rules as the database schema.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user(&self, uid: &str) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(uid).cloned())
    }

    async fn insert_user(&self, new: NewUser) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&new.uid) {
            return Ok(None);
        }
        if tables.users.values().any(|u| u.email == new.email) {
            return Err(StoreError::UniqueViolation("users_email_key".into()));
        }
        let now = OffsetDateTime::now_utc();
        let user = User {
            uid: new.uid,
            name: new.name,
            email: new.email,
            storage_gb: 0.0,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.uid.clone(), user.clone());
        Ok(Some(user))
    }

    async fn increment_storage(&self, uid: &str, delta: f64) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(user) = tables.users.get_mut(uid) else {
            return Ok(None);
        };
        // double precision columns reject infinities the same way
        let total = user.storage_gb + delta;
        if !total.is_finite() {
            return Err(StoreError::OutOfRange);
        }
        user.storage_gb = total;
        user.updated_at = OffsetDateTime::now_utc();
        Ok(Some(user.clone()))
    }

    async fn insert_payment(&self, new: NewPayment) -> Result<Payment, StoreError> {
        let payment = Payment {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            gb: new.gb,
            total_price: new.total_price,
            upi_link: new.upi_link,
            status: PaymentStatus::Pending,
            created_at: OffsetDateTime::now_utc(),
        };
        self.tables.write().await.payments.push(payment.clone());
        Ok(payment)
    }

    async fn list_payments(&self) -> Result<Vec<Payment>, StoreError> {
        Ok(self.tables.read().await.payments.clone())
    }

    async fn set_payment_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
    ) -> Result<Option<Payment>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.payments.iter_mut().find(|p| p.id == id).map(|p| {
            p.status = status;
            p.clone()
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(uid: &str, email: &str) -> NewUser {
        NewUser {
            uid: uid.into(),
            name: None,
            email: email.into(),
        }
    }

    #[tokio::test]
    async fn insert_user_skips_taken_uid() {
        let store = MemoryStore::new();
        assert!(store.insert_user(new_user("a", "a@x.io")).await.unwrap().is_some());
        assert!(store.insert_user(new_user("a", "other@x.io")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_user_rejects_duplicate_email() {
        let store = MemoryStore::new();
        store.insert_user(new_user("a", "same@x.io")).await.unwrap();
        let err = store.insert_user(new_user("b", "same@x.io")).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(ref c) if c == "users_email_key"));
        assert!(store.find_user("b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn increment_overflow_is_rejected_and_leaves_value() {
        let store = MemoryStore::new();
        store.insert_user(new_user("a", "a@x.io")).await.unwrap();
        store.increment_storage("a", 1.7e308).await.unwrap();

        let err = store.increment_storage("a", 1.7e308).await.unwrap_err();
        assert!(matches!(err, StoreError::OutOfRange));

        let user = store.find_user("a").await.unwrap().unwrap();
        assert_eq!(user.storage_gb, 1.7e308);
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = MemoryStore::new();
        for user_id in ["u1", "u2", "u3"] {
            store
                .insert_payment(NewPayment {
                    user_id: user_id.into(),
                    gb: 1.0,
                    total_price: 10.0,
                    upi_link: "upi://pay".into(),
                })
                .await
                .unwrap();
        }
        let ids: Vec<String> = store
            .list_payments()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.user_id)
            .collect();
        assert_eq!(ids, ["u1", "u2", "u3"]);
    }
}

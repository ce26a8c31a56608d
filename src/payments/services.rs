use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::{ApiError, Result},
    payments::{
        dto::{CreatePaymentRequest, UpdateStatusRequest},
        repo_types::{NewPayment, Payment, PaymentStatus},
    },
    store::Store,
};

// A zero amount counts as missing, same as an absent field.
fn filled_text(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

fn filled_number(v: Option<f64>) -> Option<f64> {
    v.filter(|n| *n != 0.0 && !n.is_nan())
}

pub async fn create(store: &dyn Store, req: CreatePaymentRequest) -> Result<Payment> {
    let new = match (
        filled_text(req.user_id),
        filled_number(req.gb),
        filled_number(req.total_price),
        filled_text(req.upi_link),
    ) {
        (Some(user_id), Some(gb), Some(total_price), Some(upi_link)) => NewPayment {
            user_id,
            gb,
            total_price,
            upi_link,
        },
        _ => return Err(ApiError::Validation("All fields are required".into())),
    };

    let payment = store.insert_payment(new).await?;
    info!(payment_id = %payment.id, user_id = %payment.user_id, gb = payment.gb, "payment created");
    Ok(payment)
}

pub async fn list(store: &dyn Store) -> Result<Vec<Payment>> {
    Ok(store.list_payments().await?)
}

/// Sets the status unconditionally; unknown values are stored as sent.
pub async fn update_status(
    store: &dyn Store,
    id: &str,
    req: UpdateStatusRequest,
) -> Result<Payment> {
    let status = req
        .status
        .map(PaymentStatus::from)
        .ok_or_else(|| ApiError::Validation("status is required".into()))?;

    // Nothing can be stored under an id that is not a UUID.
    let id = Uuid::parse_str(id).map_err(|_| ApiError::NotFound("Payment not found".into()))?;

    if !status.is_recognized() {
        warn!(payment_id = %id, %status, "storing unrecognized payment status");
    }

    let payment = store
        .set_payment_status(id, status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Payment not found".into()))?;

    info!(payment_id = %payment.id, status = %payment.status, "payment status updated");
    Ok(payment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn req(user_id: &str, gb: f64, total_price: f64, upi_link: &str) -> CreatePaymentRequest {
        CreatePaymentRequest {
            user_id: Some(user_id.into()),
            gb: Some(gb),
            total_price: Some(total_price),
            upi_link: Some(upi_link.into()),
        }
    }

    fn status(s: &str) -> UpdateStatusRequest {
        UpdateStatusRequest {
            status: Some(s.into()),
        }
    }

    #[tokio::test]
    async fn create_starts_pending_with_generated_id() {
        let store = MemoryStore::new();
        let payment = create(&store, req("u1", 5.0, 100.0, "upi://x")).await.unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.user_id, "u1");
        assert_eq!(payment.gb, 5.0);
        assert_eq!(payment.total_price, 100.0);
        assert!(!payment.id.is_nil());
    }

    #[tokio::test]
    async fn zero_amounts_count_as_missing() {
        let store = MemoryStore::new();
        for bad in [
            req("u1", 0.0, 100.0, "upi://x"),
            req("u1", 5.0, 0.0, "upi://x"),
            req("", 5.0, 100.0, "upi://x"),
            req("u1", 5.0, 100.0, ""),
            req("u1", f64::NAN, 100.0, "upi://x"),
        ] {
            let err = create(&store, bad).await.unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)));
        }
        let missing = CreatePaymentRequest {
            user_id: Some("u1".into()),
            gb: Some(5.0),
            total_price: None,
            upi_link: Some("upi://x".into()),
        };
        assert!(create(&store, missing).await.is_err());
        assert!(list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn negative_amounts_pass_the_presence_check() {
        let store = MemoryStore::new();
        let payment = create(&store, req("u1", -1.0, -10.0, "upi://x")).await.unwrap();
        assert_eq!(payment.gb, -1.0);
    }

    #[tokio::test]
    async fn list_is_empty_without_payments() {
        let store = MemoryStore::new();
        assert!(list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn arbitrary_status_is_stored_and_listed() {
        let store = MemoryStore::new();
        let payment = create(&store, req("u1", 5.0, 100.0, "upi://x")).await.unwrap();

        let updated = update_status(&store, &payment.id.to_string(), status("REFUNDED"))
            .await
            .unwrap();
        assert_eq!(updated.status.as_str(), "REFUNDED");

        let listed = list(&store).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].status, PaymentStatus::Unrecognized("REFUNDED".into()));
    }

    #[tokio::test]
    async fn any_status_can_follow_any_other() {
        let store = MemoryStore::new();
        let payment = create(&store, req("u1", 5.0, 100.0, "upi://x")).await.unwrap();
        let id = payment.id.to_string();

        for next in ["SUCCESS", "FAILED", "PENDING"] {
            let updated = update_status(&store, &id, status(next)).await.unwrap();
            assert_eq!(updated.status.as_str(), next);
            assert!(updated.status.is_recognized());
        }
    }

    #[tokio::test]
    async fn unknown_or_malformed_id_is_not_found() {
        let store = MemoryStore::new();
        for id in [Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
            let err = update_status(&store, &id, status("SUCCESS")).await.unwrap_err();
            assert!(matches!(err, ApiError::NotFound(_)));
        }
    }

    #[tokio::test]
    async fn missing_status_is_rejected() {
        let store = MemoryStore::new();
        let payment = create(&store, req("u1", 5.0, 100.0, "upi://x")).await.unwrap();
        let err = update_status(
            &store,
            &payment.id.to_string(),
            UpdateStatusRequest { status: None },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}

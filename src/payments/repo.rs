use sqlx::PgPool;
use uuid::Uuid;

use crate::payments::repo_types::{NewPayment, Payment, PaymentRow, PaymentStatus};

impl Payment {
    pub async fn insert(db: &PgPool, new: &NewPayment) -> Result<Payment, sqlx::Error> {
        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            INSERT INTO payments (id, user_id, gb, total_price, upi_link, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, gb, total_price, upi_link, status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.user_id)
        .bind(new.gb)
        .bind(new.total_price)
        .bind(&new.upi_link)
        .bind(PaymentStatus::Pending.as_str())
        .fetch_one(db)
        .await?;
        Ok(row.into())
    }

    /// All payments in insertion order.
    pub async fn list_all(db: &PgPool) -> Result<Vec<Payment>, sqlx::Error> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT id, user_id, gb, total_price, upi_link, status, created_at
            FROM payments
            ORDER BY seq
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows.into_iter().map(Payment::from).collect())
    }

    pub async fn set_status(
        db: &PgPool,
        id: Uuid,
        status: &PaymentStatus,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            UPDATE payments
            SET status = $2
            WHERE id = $1
            RETURNING id, user_id, gb, total_price, upi_link, status, created_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(db)
        .await?;
        Ok(row.map(Payment::from))
    }
}

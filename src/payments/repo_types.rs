use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Payment lifecycle state.
///
/// No transition rules apply. Values outside the three known states are kept
/// verbatim in `Unrecognized` so an update never loses what the caller sent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Success,
    Failed,
    Unrecognized(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Success => "SUCCESS",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Unrecognized(s) => s.as_str(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, PaymentStatus::Unrecognized(_))
    }
}

impl From<String> for PaymentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PENDING" => PaymentStatus::Pending,
            "SUCCESS" => PaymentStatus::Success,
            "FAILED" => PaymentStatus::Failed,
            _ => PaymentStatus::Unrecognized(s),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Unrecognized(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, FromRow)]
pub struct PaymentRow {
    pub id: Uuid,
    pub user_id: String,
    pub gb: f64,
    pub total_price: f64,
    pub upi_link: String,
    pub status: String,
    pub created_at: OffsetDateTime,
}

/// Storage purchase record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub user_id: String, // informal reference to User.uid
    pub gb: f64,
    pub total_price: f64,
    pub upi_link: String,
    pub status: PaymentStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<PaymentRow> for Payment {
    fn from(r: PaymentRow) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            gb: r.gb,
            total_price: r.total_price,
            upi_link: r.upi_link,
            status: PaymentStatus::from(r.status),
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub user_id: String,
    pub gb: f64,
    pub total_price: f64,
    pub upi_link: String,
}

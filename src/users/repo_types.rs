use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,           // external identity key
    pub name: Option<String>,
    pub email: String,
    #[serde(rename = "storageGB")]
    pub storage_gb: f64,       // additive quota counter, may go negative
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Fields needed to insert a user; everything else takes its column default.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub uid: String,
    pub name: Option<String>,
    pub email: String,
}

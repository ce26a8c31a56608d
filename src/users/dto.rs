use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::users::repo_types::User;

/// Request body for create-or-fetch. Required fields are optional here so a
/// missing one is reported with our own message instead of a decode error.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub uid: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Request body for storage adjustment. Kept as raw JSON so that a string
/// like `"5"` is rejected as non-numeric rather than coerced.
#[derive(Debug, Deserialize)]
pub struct UpdateStorageRequest {
    #[serde(rename = "storageGB")]
    pub storage_gb: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub message: &'static str,
    pub user: User,
}

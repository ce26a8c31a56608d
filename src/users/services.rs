use serde_json::Value;
use tracing::{debug, info};

use crate::{
    error::{ApiError, Result},
    store::Store,
    users::{
        dto::{CreateUserRequest, UpdateStorageRequest},
        repo_types::{NewUser, User},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    Existing,
}

impl CreateOutcome {
    pub fn message(self) -> &'static str {
        match self {
            CreateOutcome::Created => "User created",
            CreateOutcome::Existing => "User already exists",
        }
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

/// Returns the user for `uid`, creating it on first contact.
pub async fn create_or_fetch(
    store: &dyn Store,
    req: CreateUserRequest,
) -> Result<(User, CreateOutcome)> {
    let (Some(uid), Some(email)) = (non_empty(req.uid), non_empty(req.email)) else {
        return Err(ApiError::Validation("uid and email are required".into()));
    };

    if let Some(existing) = store.find_user(&uid).await? {
        debug!(%uid, "user already exists");
        return Ok((existing, CreateOutcome::Existing));
    }

    let new = NewUser {
        uid: uid.clone(),
        name: req.name,
        email,
    };
    match store.insert_user(new).await? {
        Some(user) => {
            info!(uid = %user.uid, email = %user.email, "user created");
            Ok((user, CreateOutcome::Created))
        }
        // Lost a race with a concurrent first login for the same uid.
        None => {
            let user = store
                .find_user(&uid)
                .await?
                .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
            Ok((user, CreateOutcome::Existing))
        }
    }
}

pub async fn fetch(store: &dyn Store, uid: &str) -> Result<User> {
    store
        .find_user(uid)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))
}

/// Adds the requested delta to the user's quota. No bounds are applied.
pub async fn adjust_storage(
    store: &dyn Store,
    uid: &str,
    req: UpdateStorageRequest,
) -> Result<User> {
    let delta = match req.storage_gb {
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    }
    .ok_or_else(|| ApiError::Validation("storageGB must be a number".into()))?;

    let user = store
        .increment_storage(uid, delta)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    info!(%uid, delta, storage_gb = user.storage_gb, "storage adjusted");
    Ok(user)
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration input. Validated before hashing and insertion.
#[derive(Debug, Clone, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email address is not valid"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

/// Persisted user document. Only the credential hash is stored, never the
/// raw secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A user as read back from the directory, without credential material.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn from_record(id: String, record: &UserRecord) -> Self {
        UserProfile {
            id,
            name: record.name.clone(),
            email: record.email.clone(),
            created_at: record.created_at,
        }
    }
}

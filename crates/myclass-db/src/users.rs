//! User directory repository.

use std::sync::Arc;

use myclass_core::constants::USERS_COLLECTION;
use myclass_core::models::{UserProfile, UserRecord};
use myclass_core::AppError;
use serde_json::Value;

use crate::traits::{DocumentStore, StoredDocument};

/// Domain-typed access to the `users` collection.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        UserRepository { store }
    }

    /// Insert one user record. The store has no unique constraint, so email
    /// uniqueness is checked here before the write.
    pub async fn create(&self, record: UserRecord) -> Result<UserProfile, AppError> {
        if self.find_by_email(&record.email).await?.is_some() {
            return Err(AppError::Validation(
                "email is already registered".to_string(),
            ));
        }

        let document = serde_json::to_value(&record)?;
        let id = self
            .store
            .insert(USERS_COLLECTION, document)
            .await
            .map_err(|e| AppError::persist("Failed to save the user record", e))?;

        tracing::info!(user_id = %id, email = %record.email, "User registered");

        Ok(UserProfile::from_record(id, &record))
    }

    /// Look up one user by email. Returns the id alongside the record so the
    /// caller can verify credentials and build a profile.
    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<(String, UserRecord)>, AppError> {
        let documents = self
            .store
            .find_eq(
                USERS_COLLECTION,
                "email",
                &Value::String(email.to_string()),
            )
            .await
            .map_err(|e| AppError::InternalWithSource {
                message: "Failed to query the user directory".to_string(),
                source: anyhow::Error::new(e),
            })?;

        Ok(documents.into_iter().find_map(decode_user))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<UserProfile>, AppError> {
        let document = self
            .store
            .get(USERS_COLLECTION, id)
            .await
            .map_err(|e| AppError::InternalWithSource {
                message: "Failed to query the user directory".to_string(),
                source: anyhow::Error::new(e),
            })?;

        Ok(document
            .and_then(decode_user)
            .map(|(id, record)| UserProfile::from_record(id, &record)))
    }
}

fn decode_user(doc: StoredDocument) -> Option<(String, UserRecord)> {
    match serde_json::from_value::<UserRecord>(doc.data) {
        Ok(record) => Some((doc.id, record)),
        Err(e) => {
            tracing::warn!(document_id = %doc.id, error = %e, "Skipping malformed user document");
            None
        }
    }
}

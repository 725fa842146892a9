//! Account service: registration, credential checks, profile lookup.

use chrono::Utc;
use myclass_core::models::{NewUser, UserProfile, UserRecord};
use myclass_core::AppError;
use myclass_db::UserRepository;
use validator::Validate;

/// Registration and login over the user directory. Single reads and writes;
/// no sessions or tokens.
#[derive(Clone)]
pub struct AccountService {
    users: UserRepository,
}

impl AccountService {
    pub fn new(users: UserRepository) -> Self {
        AccountService { users }
    }

    /// Validate and store one user. The credential is stored as an argon2
    /// hash, never the raw secret.
    pub async fn register(&self, new_user: NewUser) -> Result<UserProfile, AppError> {
        new_user.validate()?;

        let record = UserRecord {
            name: new_user.name,
            email: new_user.email,
            password_hash: hash_password(&new_user.password)?,
            created_at: Utc::now(),
        };

        self.users.create(record).await
    }

    /// Check credentials and return the matching profile.
    ///
    /// Unknown email and wrong password produce the same error so the
    /// response doesn't reveal which part was wrong.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<UserProfile, AppError> {
        let Some((id, record)) = self.users.find_by_email(email).await? else {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        };

        if !verify_password(password, &record.password_hash)? {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        tracing::debug!(user_id = %id, "Login successful");

        Ok(UserProfile::from_record(id, &record))
    }

    pub async fn profile(&self, id: &str) -> Result<UserProfile, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {}", id)))
    }
}

/// Hash a password for storage
fn hash_password(password: &str) -> Result<String, AppError> {
    use argon2::{
        password_hash::{PasswordHasher, SaltString},
        Argon2,
    };

    use rand_core::OsRng;
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    use argon2::{
        password_hash::{PasswordHash, PasswordVerifier},
        Argon2,
    };

    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Invalid hash format: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("hunter22").unwrap();
        assert_ne!(hash, "hunter22");
        assert!(verify_password("hunter22", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(verify_password("x", "not-a-hash").is_err());
    }
}

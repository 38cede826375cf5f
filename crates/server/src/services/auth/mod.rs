//! Authentication service.
//!
//! Registration and password login over the user repository. Passwords are
//! stored as argon2id PHC strings and verified against the stored hash; the
//! raw password never reaches the database.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;

use bookstall_core::{Email, UserId};

use crate::db::users::UserRepository;
use crate::models::UserProfile;

/// Authentication service.
///
/// Handles user registration and email/password login.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user and return the generated id.
    ///
    /// No duplicate-email pre-check is performed; a duplicate surfaces as
    /// `AuthError::Repository(RepositoryError::Conflict)` from the store's
    /// UNIQUE constraint.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::Repository` if the insert fails.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        mobile: &str,
        nationality: &str,
    ) -> Result<UserId, AuthError> {
        let email = Email::parse(email)?;
        let password_hash = hash_password(password)?;

        let id = self
            .users
            .create(name, &email, &password_hash, mobile, nationality)
            .await?;

        Ok(id)
    }

    /// Login with email and password.
    ///
    /// Returns the restricted user projection on success. A structurally
    /// invalid email cannot match any stored user, so it reports the same
    /// `InvalidCredentials` as a wrong password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .users
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        Ok(user.into_profile())
    }
}

/// Hash a password with argon2id and a random salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::PasswordHash)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string.
fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| AuthError::PasswordHash)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

//! User repository for database operations.
//!
//! One method per query shape; all statements are parameterized with values
//! bound out-of-band from the SQL text.

use sqlx::SqlitePool;

use bookstall_core::{Email, UserId};

use super::RepositoryError;
use crate::models::{User, UserProfile};

/// Raw `users` row before email validation.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    mobile: String,
    nationality: String,
}

impl UserRow {
    fn into_user(self) -> Result<User, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(User {
            id: UserId::new(self.id),
            name: self.name,
            email,
            password_hash: self.password_hash,
            mobile: self.mobile,
            nationality: self.nationality,
        })
    }
}

/// Raw restricted-projection row (no password hash selected).
#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: i64,
    name: String,
    email: String,
    mobile: String,
    nationality: String,
}

impl ProfileRow {
    fn into_profile(self) -> Result<UserProfile, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(UserProfile {
            id: UserId::new(self.id),
            name: self.name,
            email,
            mobile: self.mobile,
            nationality: self.nationality,
        })
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user and return the generated id.
    ///
    /// No duplicate-email pre-check is performed; the UNIQUE constraint on
    /// `email` is the only guard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
        mobile: &str,
        nationality: &str,
    ) -> Result<UserId, RepositoryError> {
        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO users (name, email, password_hash, mobile, nationality)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            ",
        )
        .bind(name)
        .bind(email.as_str())
        .bind(password_hash)
        .bind(mobile)
        .bind(nationality)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(UserId::new(id))
    }

    /// Get a user by their email address, including the password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the email in the database
    /// is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            r"
            SELECT id, name, email, password_hash, mobile, nationality
            FROM users
            WHERE email = ?
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Get the restricted user projection by id.
    ///
    /// The password hash is excluded from the projection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the email in the database
    /// is invalid.
    pub async fn get_profile(&self, id: UserId) -> Result<Option<UserProfile>, RepositoryError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r"
            SELECT id, name, email, mobile, nationality
            FROM users
            WHERE id = ?
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(ProfileRow::into_profile).transpose()
    }
}

//! User models.

use serde::Serialize;

use bookstall_core::{Email, UserId};

/// A registered user, including the stored password hash.
///
/// Only the repository and auth service ever see this type; handlers work
/// with [`UserProfile`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    pub mobile: String,
    pub nationality: String,
}

impl User {
    /// The restricted projection of this user returned to clients.
    #[must_use]
    pub fn into_profile(self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name,
            email: self.email,
            mobile: self.mobile,
            nationality: self.nationality,
        }
    }
}

/// The restricted user projection returned to clients.
///
/// JSON keys keep the column-style names the original API exposed, so the
/// existing frontend remains a drop-in consumer. The password hash is never
/// part of this projection.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    #[serde(rename = "ID")]
    pub id: UserId,
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "EMAIL")]
    pub email: Email,
    #[serde(rename = "MOBILE")]
    pub mobile: String,
    #[serde(rename = "NATIONALITY")]
    pub nationality: String,
}

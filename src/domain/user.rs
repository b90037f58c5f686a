//! Server user accounts.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::UserId;
use super::password::PasswordHash;

/// A registered user. Never carries password material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub admin: bool,
}

/// A user that has not been stored yet, with its password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    name: String,
    email: String,
    password: PasswordHash,
    admin: bool,
}

impl NewUser {
    /// Validate the account fields and hash `password` under a fresh salt.
    ///
    /// The email is trimmed; it must not be empty, and neither may the
    /// password.
    pub fn try_new(
        name: impl Into<String>,
        email: &str,
        password: &str,
        admin: bool,
    ) -> Result<Self, DomainError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(DomainError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(DomainError::EmptyPassword);
        }
        Ok(Self {
            name: name.into(),
            email: email.to_string(),
            password: PasswordHash::generate(password),
            admin,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &PasswordHash {
        &self.password
    }

    pub fn admin(&self) -> bool {
        self.admin
    }

    /// The stored user this draft becomes once `id` is assigned.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            admin: self.admin,
        }
    }
}

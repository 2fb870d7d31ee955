//! Local session provider
//!
//! Accounts live in users.json with Argon2id PHC password hashes; the
//! signed-in account is recorded in session.json. Every sign-in failure,
//! whatever its cause, surfaces as the same generic message.

use std::fs;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};

use crate::config::paths::BudgetPaths;
use crate::error::{BudgetError, BudgetResult};
use crate::storage::{read_collection, write_collection_atomic};

/// Shortest password accepted at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// The signed-in account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserRecord {
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

/// Authentication gate in front of the budget
pub trait SessionProvider {
    /// Create an account; does not sign in
    fn register(&self, email: &str, password: &str) -> BudgetResult<()>;

    fn sign_in(&self, email: &str, password: &str) -> BudgetResult<Session>;

    fn sign_out(&self) -> BudgetResult<()>;

    fn current(&self) -> BudgetResult<Option<Session>>;

    fn is_authenticated(&self) -> bool {
        matches!(self.current(), Ok(Some(_)))
    }
}

/// Session provider backed by files under the data directory
pub struct LocalSessionProvider {
    paths: BudgetPaths,
}

impl LocalSessionProvider {
    pub fn new(paths: BudgetPaths) -> Self {
        Self { paths }
    }

    fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    fn load_users(&self) -> BudgetResult<Vec<UserRecord>> {
        read_collection(self.paths.users_file())
    }

    fn hash_password(password: &str) -> BudgetResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| BudgetError::Auth(format!("Failed to hash password: {}", e)))
    }

    fn verify(user: &UserRecord, password: &str) -> bool {
        PasswordHash::new(&user.password_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

impl SessionProvider for LocalSessionProvider {
    fn register(&self, email: &str, password: &str) -> BudgetResult<()> {
        let email = Self::normalize_email(email);
        if email.is_empty() || !email.contains('@') {
            return Err(BudgetError::Validation("A valid email is required".into()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(BudgetError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let mut users = self.load_users()?;
        if users.iter().any(|u| u.email == email) {
            return Err(BudgetError::Validation(format!(
                "An account already exists for {}",
                email
            )));
        }

        users.push(UserRecord {
            email: email.clone(),
            password_hash: Self::hash_password(password)?,
            created_at: Utc::now(),
        });
        write_collection_atomic(self.paths.users_file(), &users)?;

        log::info!("Registered account {}", email);
        Ok(())
    }

    fn sign_in(&self, email: &str, password: &str) -> BudgetResult<Session> {
        let email = Self::normalize_email(email);
        let users = self.load_users().map_err(|e| {
            log::warn!("Could not read accounts: {}", e);
            BudgetError::login_failed()
        })?;

        let verified = users
            .iter()
            .find(|u| u.email == email)
            .is_some_and(|user| Self::verify(user, password));
        if !verified {
            log::debug!("Sign-in rejected for {}", email);
            return Err(BudgetError::login_failed());
        }

        let session = Session {
            email,
            signed_in_at: Utc::now(),
        };
        let contents = serde_json::to_string_pretty(&session)?;
        fs::write(self.paths.session_file(), contents).map_err(|e| {
            log::error!("Failed to record session: {}", e);
            BudgetError::login_failed()
        })?;

        log::info!("Signed in as {}", session.email);
        Ok(session)
    }

    fn sign_out(&self) -> BudgetResult<()> {
        let path = self.paths.session_file();
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(&path).map_err(|e| {
            log::error!("Failed to sign out: {}", e);
            BudgetError::Io(format!("Failed to remove session: {}", e))
        })?;

        log::info!("Signed out");
        Ok(())
    }

    fn current(&self) -> BudgetResult<Option<Session>> {
        let path = self.paths.session_file();
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }
}

//! Admin authentication service.
//!
//! There is a single admin account whose email and password come from
//! configuration. The password is hashed with Argon2id once at startup and
//! the plaintext is not kept in application state.

mod error;

pub use error::AdminAuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};

use proscience_core::Email;

use crate::models::CurrentAdmin;

/// Admin authentication service.
#[derive(Clone)]
pub struct AdminAuthService {
    email: Email,
    password_hash: String,
}

impl std::fmt::Debug for AdminAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAuthService")
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

impl AdminAuthService {
    /// Hash the configured password and build the service.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::PasswordHash` if Argon2 fails.
    pub fn new(email: Email, password: &SecretString) -> Result<Self, AdminAuthError> {
        let password_hash = hash_password(password.expose_secret())?;
        Ok(Self {
            email,
            password_hash,
        })
    }

    /// The configured admin email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Check a login attempt.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::InvalidEmail` for a malformed email and
    /// `AdminAuthError::InvalidCredentials` for any mismatch.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<CurrentAdmin, AdminAuthError> {
        // Verify before looking at the email so every attempt costs one Argon2 run.
        let password_ok = verify_password(password, &self.password_hash).is_ok();
        let email = Email::parse(email)?;
        if !password_ok || !self.email.matches(email.as_str()) {
            return Err(AdminAuthError::InvalidCredentials);
        }

        Ok(CurrentAdmin {
            name: display_name(&self.email),
            email: self.email.clone(),
            signed_in_at: Utc::now(),
        })
    }
}

/// Name shown in the header: the capitalized local part of the email.
fn display_name(email: &Email) -> String {
    let local = email.as_str().split('@').next().unwrap_or_default();
    let mut chars = local.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AdminAuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AdminAuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AdminAuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AdminAuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AdminAuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PASSWORD: &str = "aB3$xY9!mK2@nL5#";

    fn service() -> AdminAuthService {
        AdminAuthService::new(
            Email::parse("ops@proscience.com").unwrap(),
            &SecretString::from(PASSWORD),
        )
        .unwrap()
    }

    #[test]
    fn test_hash_is_argon2id() {
        let hash = hash_password(PASSWORD).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(PASSWORD, &hash).is_ok());
        assert!(verify_password("wrong", &hash).is_err());
    }

    #[test]
    fn test_authenticate_success() {
        let admin = service().authenticate(" OPS@proscience.com", PASSWORD).unwrap();
        assert_eq!(admin.email.as_str(), "ops@proscience.com");
        assert_eq!(admin.name, "Ops");
    }

    #[test]
    fn test_authenticate_failures() {
        let service = service();
        assert!(matches!(
            service.authenticate("ops@proscience.com", "nope"),
            Err(AdminAuthError::InvalidCredentials)
        ));
        assert!(matches!(
            service.authenticate("someone@proscience.com", PASSWORD),
            Err(AdminAuthError::InvalidCredentials)
        ));
        assert!(matches!(
            service.authenticate("not-an-email", PASSWORD),
            Err(AdminAuthError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_malformed_email_still_pays_for_verification() {
        let service = service();

        let started = std::time::Instant::now();
        let _ = service.authenticate("ops@proscience.com", "nope");
        let mismatch = started.elapsed();

        let started = std::time::Instant::now();
        let result = service.authenticate("not-an-email", "nope");
        let malformed = started.elapsed();

        assert!(matches!(result, Err(AdminAuthError::InvalidEmail(_))));
        // Parsing alone is microseconds; an Argon2 run is milliseconds.
        assert!(malformed * 4 >= mismatch, "{malformed:?} vs {mismatch:?}");
    }

    #[test]
    fn test_debug_redacts_hash() {
        let debug = format!("{:?}", service());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("argon2"));
    }
}

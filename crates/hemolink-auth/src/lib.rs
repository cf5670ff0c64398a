//! # hemolink-auth
//!
//! Authentication over the Hemolink record store: donor and admin login,
//! donor registration, and password reset.
//!
//! Passwords are compared as one-way digests only (see
//! [`hemolink_store::digest`]); this is an equality check, not a hardened
//! credential scheme. Registration enforces the email-uniqueness invariant
//! the store itself leaves to its callers.

use std::sync::Arc;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Deserialize;

use hemolink_store::digest::digest;
use hemolink_store::{BloodGroup, Database, NewPerson, Person, PersonUpdate, Role};

mod error;

pub use error::AuthError;
use error::Result;

/// Length of a generated reset password.
const RESET_PASSWORD_LEN: usize = 8;

/// Login credentials as submitted by a client.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// Donor registration payload. Role, verification and visibility flags are
/// not client-controlled; [`AuthService::register`] assigns them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    pub phone: String,
    pub city: String,
    pub country: String,
    pub blood_group: BloodGroup,
}

/// Authentication service over a shared [`Database`] handle.
pub struct AuthService {
    db: Arc<Database>,
}

impl AuthService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Authenticate a donor.
    ///
    /// Admin accounts are rejected with [`AuthError::AdminLoginRequired`]
    /// even on a correct password; unapproved donors fail with
    /// [`AuthError::PendingApproval`].
    pub fn login_donor(&self, credentials: &Credentials) -> Result<Person> {
        let person = self
            .db
            .get_person_by_email(&credentials.email)?
            .ok_or(AuthError::UnknownAccount)?;

        self.check_password(&person, credentials)?;

        if person.role == Role::Admin {
            return Err(AuthError::AdminLoginRequired);
        }
        if !person.is_verified {
            return Err(AuthError::PendingApproval);
        }

        tracing::info!(id = %person.id, "donor logged in");
        Ok(person)
    }

    /// Authenticate an admin. Donor accounts are treated as unknown.
    pub fn login_admin(&self, credentials: &Credentials) -> Result<Person> {
        let person = self
            .db
            .get_person_by_email(&credentials.email)?
            .filter(|p| p.role == Role::Admin)
            .ok_or(AuthError::UnknownAccount)?;

        self.check_password(&person, credentials)?;

        tracing::info!(id = %person.id, "admin logged in");
        Ok(person)
    }

    /// Register a new donor account.
    ///
    /// Fails with [`AuthError::DuplicateEmail`] if any account (donor or
    /// admin) already uses the email. New donors start unverified and must
    /// be approved by an admin before they can log in; phone verification is
    /// assumed complete (registration follows the OTP check in the original
    /// flow).
    pub fn register(&self, data: RegisterData) -> Result<Person> {
        if self.db.get_person_by_email(&data.email)?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let person = self.db.create_person(NewPerson {
            name: data.name,
            email: data.email,
            password: data.password,
            role: Role::Donor,
            phone: data.phone,
            city: data.city,
            country: data.country,
            blood_group: data.blood_group,
            last_donation_date: None,
            is_verified: false,
            contact_visible: true,
            is_phone_verified: true,
        })?;

        tracing::info!(id = %person.id, "registered donor");
        Ok(person)
    }

    /// Reset the password of the account with `email`.
    ///
    /// Generates a random password, stores its digest through the normal
    /// update path, and returns the plaintext so the caller can hand it to
    /// the user (the original surfaced it in the UI in place of an email).
    pub fn reset_password(&self, email: &str) -> Result<String> {
        let person = self
            .db
            .get_person_by_email(email)?
            .ok_or(AuthError::UnknownAccount)?;

        let new_password: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(RESET_PASSWORD_LEN)
            .map(char::from)
            .collect();

        self.db.update_person(
            &person.id,
            PersonUpdate {
                password: Some(new_password.clone()),
                ..Default::default()
            },
        )?;

        tracing::info!(id = %person.id, "password reset");
        Ok(new_password)
    }

    fn check_password(&self, person: &Person, credentials: &Credentials) -> Result<()> {
        let supplied = credentials.password.as_deref().unwrap_or("");
        if person.password != digest(supplied) {
            return Err(AuthError::InvalidPassword);
        }
        Ok(())
    }
}

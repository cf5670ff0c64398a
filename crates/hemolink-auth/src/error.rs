use thiserror::Error;

/// Errors produced by the authentication layer.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No account matches the supplied email.
    #[error("No account found with that email address")]
    UnknownAccount,

    /// The supplied password's digest does not match the stored one.
    #[error("Invalid password")]
    InvalidPassword,

    /// A donor login was attempted against an admin account.
    #[error("Please use the admin login for admin accounts")]
    AdminLoginRequired,

    /// The account exists but has not been approved by an admin yet.
    #[error("Your account is pending admin approval")]
    PendingApproval,

    /// Registration with an email that is already taken.
    #[error("An account with this email already exists")]
    DuplicateEmail,

    /// Underlying store failure.
    #[error("Store error: {0}")]
    Store(#[from] hemolink_store::StoreError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AuthError>;

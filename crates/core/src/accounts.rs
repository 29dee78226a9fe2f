//! Account validation for registration, login and profile updates.

use validator::ValidateEmail;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Client-facing account failures. `Display` is the literal API message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    #[error("email is empty")]
    EmailIsEmpty,

    #[error("email is invalid")]
    EmailIsInvalid,

    #[error("password is empty")]
    PasswordIsEmpty,

    #[error("password is less than 8 characters")]
    PasswordInvalidLength,

    /// Registration with an address that already has an account.
    #[error("user with email exists")]
    EmailExists,

    /// Profile update to an address owned by another account.
    #[error("user with this email exists")]
    UserWithEmailExists,

    #[error("invalid credentials")]
    InvalidCredentials,
}

pub fn validate_registration(email: &str, password: &str) -> Result<(), AccountError> {
    if email.is_empty() {
        return Err(AccountError::EmailIsEmpty);
    }
    if password.is_empty() {
        return Err(AccountError::PasswordIsEmpty);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AccountError::PasswordInvalidLength);
    }
    check_email_format(email)
}

/// Login only checks presence; credential checks happen against the store.
pub fn validate_login(email: &str, password: &str) -> Result<(), AccountError> {
    if email.is_empty() {
        return Err(AccountError::EmailIsEmpty);
    }
    if password.is_empty() {
        return Err(AccountError::PasswordIsEmpty);
    }
    Ok(())
}

pub fn validate_profile_update(email: &str) -> Result<(), AccountError> {
    if email.is_empty() {
        return Err(AccountError::EmailIsEmpty);
    }
    check_email_format(email)
}

fn check_email_format(email: &str) -> Result<(), AccountError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(AccountError::EmailIsInvalid)
    }
}

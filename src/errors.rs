//! Unified error type for the CB Plumbing ledger.
//!
//! Every fallible operation in the crate returns [`Result`]. Domain rule violations get
//! their own variants so the chat layer can turn them into a notice instead of a failure.

use crate::entities::status::JobStatus;
use thiserror::Error;

/// All errors produced by the ledger, its configuration and the chat surface.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Invalid input: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unknown {kind}: '{value}'")]
    InvalidChoice { kind: &'static str, value: String },

    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: f64 },

    #[error("Customer {id} not found")]
    CustomerNotFound { id: i64 },

    #[error("Customer {id} is inactive")]
    CustomerInactive { id: i64 },

    #[error("Job {id} not found")]
    JobNotFound { id: i64 },

    #[error("Job {job_id} is {status} and its line items can no longer be changed")]
    JobLocked { job_id: i64, status: JobStatus },

    #[error("Job item {id} not found")]
    JobItemNotFound { id: i64 },

    #[error("Invoice {id} not found")]
    InvoiceNotFound { id: i64 },

    #[error("Job {job_id} already has an invoice")]
    DuplicateInvoice { job_id: i64 },

    #[error("Cannot move status from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Username '{username}' is already taken")]
    DuplicateUsername { username: String },

    #[error("Email '{email}' is already registered")]
    DuplicateEmail { email: String },

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User {id} not found")]
    UserNotFound { id: i64 },

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Background task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

impl Error {
    /// Whether this error is a rule the office user broke rather than a system failure.
    ///
    /// Notices are shown to the user as-is; everything else is logged and reported generically.
    #[must_use]
    pub const fn is_notice(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidChoice { .. }
                | Self::InvalidAmount { .. }
                | Self::CustomerNotFound { .. }
                | Self::CustomerInactive { .. }
                | Self::JobNotFound { .. }
                | Self::JobLocked { .. }
                | Self::JobItemNotFound { .. }
                | Self::InvoiceNotFound { .. }
                | Self::DuplicateInvoice { .. }
                | Self::InvalidStatusTransition { .. }
                | Self::DuplicateUsername { .. }
                | Self::DuplicateEmail { .. }
                | Self::InvalidCredentials
        )
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_are_notices() {
        assert!(Error::DuplicateInvoice { job_id: 1 }.is_notice());
        assert!(Error::CustomerNotFound { id: 7 }.is_notice());
        assert!(Error::InvalidCredentials.is_notice());
        assert!(
            !Error::Config {
                message: "broken".to_string()
            }
            .is_notice()
        );
        assert!(!Error::Database(sea_orm::DbErr::Custom("boom".to_string())).is_notice());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::DuplicateInvoice { job_id: 3 }.to_string(),
            "Job 3 already has an invoice"
        );
        assert_eq!(
            Error::JobLocked {
                job_id: 2,
                status: JobStatus::Complete
            }
            .to_string(),
            "Job 2 is Complete and its line items can no longer be changed"
        );
    }
}

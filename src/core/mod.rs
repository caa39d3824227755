//! Core business logic - framework-agnostic customer, job, costing and invoice operations.
//!
//! Everything in here takes a database connection and plain inputs and returns models or
//! errors. Nothing knows about Discord; the bot layer only formats what these functions return.

pub mod costing;
pub mod customer;
pub mod forms;
pub mod invoice;
pub mod job;
pub mod job_item;
pub mod report;
pub mod user;

use chrono::NaiveDate;

/// Today's date for the ledger. Dates are stamped in UTC, like every timestamp.
#[must_use]
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// What default listings of jobs and invoices include.
///
/// Inactive customers are always excluded from the active listing; cancelled jobs and
/// invoices are excluded unless `include_cancelled` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListPolicy {
    /// Show cancelled jobs and cancelled invoices
    pub include_cancelled: bool,
}

impl ListPolicy {
    /// Policy that shows everything, cancelled records included.
    #[must_use]
    pub const fn everything() -> Self {
        Self {
            include_cancelled: true,
        }
    }
}

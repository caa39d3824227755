//! Status vocabularies shared by jobs and invoices.
//!
//! Each enum is stored verbatim as its label (e.g. `"In Progress"`), so the database
//! contents stay readable and match what the office sees in chat.

use crate::errors::{Error, Result};
use sea_orm::{ActiveEnum, Iterable, entity::prelude::*};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Where a job is in its lifecycle.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum JobStatus {
    /// Booked, not started
    #[sea_orm(string_value = "Open")]
    Open,
    /// Work underway
    #[sea_orm(string_value = "In Progress")]
    InProgress,
    /// Work signed off
    #[sea_orm(string_value = "Complete")]
    Complete,
    /// Called off; terminal
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

impl JobStatus {
    /// Whether the workflow allows moving from `self` to `next`.
    ///
    /// Work only moves forward (Open → In Progress → Complete, skipping In Progress is fine).
    /// Any job that is not already cancelled may be cancelled, and Cancelled is terminal.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Open, Self::InProgress | Self::Complete | Self::Cancelled)
                | (Self::InProgress, Self::Complete | Self::Cancelled)
                | (Self::Complete, Self::Cancelled)
        )
    }

    /// Line items may only change while work is still underway.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Open | Self::InProgress)
    }
}

/// Billing state of a job, mirrored from its invoice once one exists.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum InvoiceStatus {
    /// No invoice has been issued yet.
    #[sea_orm(string_value = "None")]
    NotIssued,
    /// Sent to the customer, awaiting payment
    #[sea_orm(string_value = "Issued")]
    Issued,
    /// Payment received
    #[sea_orm(string_value = "Paid")]
    Paid,
    /// Withdrawn
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

impl InvoiceStatus {
    /// An existing invoice can be Issued, Paid or Cancelled, never "None".
    #[must_use]
    pub const fn applies_to_invoice(self) -> bool {
        !matches!(self, Self::NotIssued)
    }
}

/// Kind of work a job represents.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum JobType {
    /// Routine servicing
    #[sea_orm(string_value = "Service")]
    Service,
    /// Return visit under warranty
    #[sea_orm(string_value = "Warranty")]
    Warranty,
    /// New installation
    #[sea_orm(string_value = "Install")]
    Install,
    /// Fault repair
    #[sea_orm(string_value = "Repair")]
    Repair,
    /// Anything else
    #[sea_orm(string_value = "Other")]
    Other,
}

/// Scheduling priority of a job.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum JobPriority {
    /// Whenever convenient
    #[sea_orm(string_value = "Low")]
    Low,
    /// Normal scheduling
    #[default]
    #[sea_orm(string_value = "Medium")]
    Medium,
    /// Urgent
    #[sea_orm(string_value = "High")]
    High,
}

/// Matches a user-typed label against a vocabulary, ignoring case and surrounding whitespace.
fn parse_label<T>(kind: &'static str, input: &str) -> Result<T>
where
    T: ActiveEnum<Value = String> + Iterable,
{
    let wanted = input.trim();
    <T as Iterable>::iter()
        .find(|variant| variant.to_value().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| Error::InvalidChoice {
            kind,
            value: wanted.to_string(),
        })
}

/// Every label of a vocabulary, in declaration order.
#[must_use]
pub fn labels<T>() -> Vec<String>
where
    T: ActiveEnum<Value = String> + Iterable,
{
    <T as Iterable>::iter()
        .map(|variant| variant.to_value())
        .collect()
}

impl FromStr for JobStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_label("job status", s)
    }
}

impl FromStr for InvoiceStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_label("invoice status", s)
    }
}

impl FromStr for JobType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_label("job type", s)
    }
}

impl FromStr for JobPriority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_label("job priority", s)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_value())
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_value())
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_value())
    }
}

impl fmt::Display for JobPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_value())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_vocabularies_match_stored_labels() {
        assert_eq!(
            labels::<JobStatus>(),
            vec!["Open", "In Progress", "Complete", "Cancelled"]
        );
        assert_eq!(
            labels::<InvoiceStatus>(),
            vec!["None", "Issued", "Paid", "Cancelled"]
        );
        assert_eq!(
            labels::<JobType>(),
            vec!["Service", "Warranty", "Install", "Repair", "Other"]
        );
        assert_eq!(labels::<JobPriority>(), vec!["Low", "Medium", "High"]);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "in progress".parse::<JobStatus>().unwrap(),
            JobStatus::InProgress
        );
        assert_eq!(" PAID ".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Paid);
        assert_eq!("none".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::NotIssued);
        assert_eq!("repair".parse::<JobType>().unwrap(), JobType::Repair);
    }

    #[test]
    fn test_parse_rejects_unknown_label() {
        let err = "Finished".parse::<JobStatus>().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidChoice {
                kind: "job status",
                ..
            }
        ));
    }

    #[test]
    fn test_job_status_transitions() {
        use JobStatus::{Cancelled, Complete, InProgress, Open};

        assert!(Open.can_transition_to(InProgress));
        assert!(Open.can_transition_to(Complete));
        assert!(Open.can_transition_to(Cancelled));
        assert!(InProgress.can_transition_to(Complete));
        assert!(InProgress.can_transition_to(Cancelled));

        assert!(Complete.can_transition_to(Cancelled));

        assert!(!InProgress.can_transition_to(Open));
        assert!(!Complete.can_transition_to(InProgress));
        assert!(!Complete.can_transition_to(Open));
        assert!(!Cancelled.can_transition_to(Open));
        assert!(!Cancelled.can_transition_to(InProgress));
    }

    #[test]
    fn test_editable_statuses() {
        assert!(JobStatus::Open.is_editable());
        assert!(JobStatus::InProgress.is_editable());
        assert!(!JobStatus::Complete.is_editable());
        assert!(!JobStatus::Cancelled.is_editable());
    }

    #[test]
    fn test_invoice_cannot_be_set_to_none() {
        assert!(!InvoiceStatus::NotIssued.applies_to_invoice());
        assert!(InvoiceStatus::Issued.applies_to_invoice());
        assert!(InvoiceStatus::Paid.applies_to_invoice());
        assert!(InvoiceStatus::Cancelled.applies_to_invoice());
    }

    #[test]
    fn test_default_priority_is_medium() {
        assert_eq!(JobPriority::default(), JobPriority::Medium);
    }
}

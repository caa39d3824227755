//! Input forms for the ledger, validated with `validator` derive rules.
//!
//! Forms are normalized before validation: surrounding whitespace is trimmed and blank
//! optional fields become `None`, so "   " never passes as a name.

use crate::entities::{JobPriority, JobType};
use chrono::NaiveDate;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Shortest password accepted, in bytes.
pub const PASSWORD_MIN_BYTES: usize = 8;
/// bcrypt ignores everything past the first 72 bytes.
pub const PASSWORD_MAX_BYTES: usize = 72;

fn clean(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value.map(clean).filter(|v| !v.is_empty())
}

/// Measures in bytes, not characters, so a multibyte password cannot slip past the bcrypt limit.
fn password_byte_length(password: &str) -> Result<(), ValidationError> {
    if (PASSWORD_MIN_BYTES..=PASSWORD_MAX_BYTES).contains(&password.len()) {
        return Ok(());
    }
    Err(ValidationError::new("password_length").with_message(Cow::from(format!(
        "Password must be between {PASSWORD_MIN_BYTES} and {PASSWORD_MAX_BYTES} bytes"
    ))))
}

/// New account registration.
#[derive(Debug, Clone, Validate)]
pub struct Registration {
    /// Login name
    #[validate(length(min = 1, max = 64, message = "Username is required"))]
    pub username: String,
    /// Contact email
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Plain-text password, hashed before storage
    #[validate(custom(function = "password_byte_length"))]
    pub password: String,
    /// Must repeat `password` exactly
    #[validate(must_match(other = "password", message = "Passwords must match"))]
    pub password_confirmation: String,
}

impl Registration {
    /// Trims the username and email. Passwords are kept exactly as typed.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            username: clean(self.username),
            email: clean(self.email),
            ..self
        }
    }
}

/// Customer details, used both for adding and for editing a customer.
#[derive(Debug, Clone, Default, Validate)]
pub struct CustomerForm {
    /// Given name
    #[validate(length(min = 1, max = 64, message = "First name is required"))]
    pub first_name: String,
    /// Family name
    #[validate(length(min = 1, max = 64, message = "Last name is required"))]
    pub last_name: String,
    /// Contact phone number
    #[validate(length(min = 1, max = 64, message = "Phone is required"))]
    pub phone: String,
    /// Contact email
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Street address
    #[validate(length(min = 1, max = 120, message = "First address line is required"))]
    pub first_line_address: String,
    /// Flat, unit or building name
    #[validate(length(max = 120))]
    pub second_line_address: Option<String>,
    /// Town or city
    #[validate(length(min = 1, max = 120, message = "City is required"))]
    pub city: String,
    /// County or region
    #[validate(length(min = 1, max = 120, message = "County is required"))]
    pub county: String,
    /// Postal code
    #[validate(length(min = 1, max = 120, message = "Postal code is required"))]
    pub postal_code: String,
    /// How the customer heard about us
    #[validate(length(max = 120))]
    pub referral: Option<String>,
}

impl CustomerForm {
    /// Trims every field and turns blank optional fields into `None`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            first_name: clean(self.first_name),
            last_name: clean(self.last_name),
            phone: clean(self.phone),
            email: clean(self.email),
            first_line_address: clean(self.first_line_address),
            second_line_address: clean_optional(self.second_line_address),
            city: clean(self.city),
            county: clean(self.county),
            postal_code: clean(self.postal_code),
            referral: clean_optional(self.referral),
        }
    }
}

/// A new job for an existing customer.
#[derive(Debug, Clone, Validate)]
pub struct JobForm {
    /// Customer the work is for
    pub customer_id: i64,
    /// Kind of work
    pub job_type: JobType,
    /// What needs doing
    #[validate(length(min = 1, max = 240, message = "Job description is required"))]
    pub description: String,
    /// Office or engineer notes
    #[validate(length(max = 240))]
    pub notes: Option<String>,
    /// How urgent the work is
    pub priority: JobPriority,
    /// Day the work is booked for
    pub planned_date: Option<NaiveDate>,
}

impl JobForm {
    /// Trims text fields and drops blank notes.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            description: clean(self.description),
            notes: clean_optional(self.notes),
            ..self
        }
    }
}

/// Partial edit of a job's details. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Validate)]
pub struct JobUpdate {
    /// New kind of work
    pub job_type: Option<JobType>,
    /// New description
    #[validate(length(min = 1, max = 240, message = "Job description cannot be blank"))]
    pub description: Option<String>,
    /// New notes
    #[validate(length(max = 240))]
    pub notes: Option<String>,
    /// New priority
    pub priority: Option<JobPriority>,
    /// New booking date
    pub planned_date: Option<NaiveDate>,
}

impl JobUpdate {
    /// Trims text fields. A blank description is kept so validation can reject it.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            description: self.description.map(clean),
            notes: clean_optional(self.notes),
            ..self
        }
    }

    /// Whether the update would change anything at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.job_type.is_none()
            && self.description.is_none()
            && self.notes.is_none()
            && self.priority.is_none()
            && self.planned_date.is_none()
    }
}

/// A new billable line on a job.
#[derive(Debug, Clone, Validate)]
pub struct JobItemForm {
    /// Job the line belongs to
    pub job_id: i64,
    /// Part or labour name
    #[validate(length(min = 1, max = 120, message = "Item name is required"))]
    pub name: String,
    /// Optional detail
    #[validate(length(max = 240))]
    pub description: Option<String>,
    /// Units used
    pub quantity: f64,
    /// Price per unit in dollars
    pub unit_cost: f64,
}

impl JobItemForm {
    /// Trims text fields and drops a blank description.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            name: clean(self.name),
            description: clean_optional(self.description),
            ..self
        }
    }
}

/// Partial edit of a line item. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Validate)]
pub struct JobItemUpdate {
    /// New name
    #[validate(length(min = 1, max = 120, message = "Item name cannot be blank"))]
    pub name: Option<String>,
    /// New detail
    #[validate(length(max = 240))]
    pub description: Option<String>,
    /// New quantity
    pub quantity: Option<f64>,
    /// New unit cost
    pub unit_cost: Option<f64>,
}

impl JobItemUpdate {
    /// Trims text fields. A blank name is kept so validation can reject it.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.map(clean),
            description: clean_optional(self.description),
            ..self
        }
    }
}

/// Invoice issuance for a job.
#[derive(Debug, Clone, Validate)]
pub struct InvoiceForm {
    /// Job being billed
    pub job_id: i64,
    /// Date payment is due
    pub due_date: NaiveDate,
    /// Payment instructions
    #[validate(length(max = 240))]
    pub notes: Option<String>,
}

impl InvoiceForm {
    /// Drops blank notes.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            notes: clean_optional(self.notes),
            ..self
        }
    }
}

/// Partial edit of an invoice's details. Status changes go through `set_invoice_status`.
#[derive(Debug, Clone, Default, Validate)]
pub struct InvoiceUpdate {
    /// New due date
    pub due_date: Option<NaiveDate>,
    /// New notes
    #[validate(length(max = 240))]
    pub notes: Option<String>,
}

impl InvoiceUpdate {
    /// Drops blank notes.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            notes: clean_optional(self.notes),
            ..self
        }
    }
}

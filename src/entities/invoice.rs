//! Invoice entity - The billing document for a job.
//!
//! A job has at most one invoice, enforced by the unique `job_id` column. The invoice
//! total is not stored; it is the sum of the job's line items at the time of reading.

use super::status::InvoiceStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Invoice database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    /// Unique identifier for the invoice
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the job being billed
    #[sea_orm(unique)]
    pub job_id: i64,
    /// Date payment is due
    pub due_date: Date,
    /// Issued, Paid or Cancelled; also mirrored on the job
    pub status: InvoiceStatus,
    /// Payment instructions or reminders
    pub notes: Option<String>,
    /// When the invoice was issued
    pub created_at: DateTime,
    /// When the invoice was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Invoice and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each invoice belongs to one job
    #[sea_orm(
        belongs_to = "super::job::Entity",
        from = "Column::JobId",
        to = "super::job::Column::Id"
    )]
    Job,
}

impl Related<super::job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Job.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

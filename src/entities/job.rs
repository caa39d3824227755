//! Job entity - A unit of plumbing work for a customer.
//!
//! Each job carries its own workflow status and a mirror of its invoice's status.
//! Jobs are cancelled rather than deleted so that line items and invoices keep a parent.

use super::status::{InvoiceStatus, JobPriority, JobStatus, JobType};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Job database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    /// Unique identifier for the job
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the customer the work is for
    pub customer_id: i64,
    /// Kind of work, e.g. Install or Repair
    pub job_type: JobType,
    /// What needs doing
    pub description: String,
    /// Free-form notes from the office or the engineer
    pub notes: Option<String>,
    /// How urgent the work is
    pub priority: JobPriority,
    /// Where the job is in its workflow
    pub job_status: JobStatus,
    /// Mirrors the status of the job's invoice; `None` until one is issued
    pub invoice_status: InvoiceStatus,
    /// Day the work is booked for
    pub planned_date: Option<Date>,
    /// Day the work was finished
    pub completed_date: Option<Date>,
    /// When the job was created
    pub created_at: DateTime,
    /// When the job was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Job and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each job belongs to one customer
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    /// One job has many line items
    #[sea_orm(has_many = "super::job_item::Entity")]
    JobItems,
    /// One job has at most one invoice
    #[sea_orm(has_one = "super::invoice::Entity")]
    Invoice,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::job_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobItems.def()
    }
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Job item entity - One billable line (material or labour) within a job.
//!
//! Only the inputs are stored. The line total is always derived from `quantity`
//! and `unit_cost`, so it can never disagree with them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Job item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job_items")]
pub struct Model {
    /// Unique identifier for the line item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the job this line belongs to
    pub job_id: i64,
    /// Short name of the part or labour (e.g. "15mm copper elbow", "Labour")
    pub name: String,
    /// Optional detail (size, model, hours worked)
    pub description: Option<String>,
    /// How many units were used
    pub quantity: f64,
    /// Price per unit in dollars
    pub unit_cost: f64,
}

impl Model {
    /// quantity × unit cost
    #[must_use]
    pub fn total(&self) -> f64 {
        crate::core::costing::line_total(self.quantity, self.unit_cost)
    }
}

/// Defines relationships between JobItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line item belongs to one job
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

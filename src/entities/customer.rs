//! Customer entity - Contact and address records for the people we work for.
//!
//! Customers are never physically removed. "Deleting" one clears `is_active`, which
//! hides it from default listings while its jobs and invoices stay intact.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    /// Unique identifier for the customer
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Given name
    pub first_name: String,
    /// Family name, used for sorting and search
    pub last_name: String,
    /// Contact phone number as entered
    pub phone: String,
    /// Contact email address
    pub email: String,
    /// Street address
    pub first_line_address: String,
    /// Flat, unit or building name
    pub second_line_address: Option<String>,
    /// Town or city
    pub city: String,
    /// County or region
    pub county: String,
    /// Postal code as entered
    pub postal_code: String,
    /// How the customer heard about us
    pub referral: Option<String>,
    /// Soft delete flag - inactive customers are hidden but their history is preserved
    pub is_active: bool,
    /// When the customer was created
    pub created_at: DateTime,
    /// When the customer was last modified
    pub updated_at: DateTime,
}

impl Model {
    /// "First Last", as shown in listings.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Defines relationships between Customer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One customer has many jobs
    #[sea_orm(has_many = "super::job::Entity")]
    Jobs,
}

impl Related<super::job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Jobs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

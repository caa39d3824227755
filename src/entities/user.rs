//! User entity - Office staff allowed to operate the ledger.
//!
//! Users register with a username, email and password. Only a bcrypt hash of the
//! password is stored. A user may be linked to one Discord account, which is how
//! the bot knows who is issuing a command.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, unique across all users
    #[sea_orm(unique)]
    pub username: String,
    /// Contact email, unique across all users
    #[sea_orm(unique)]
    pub email: String,
    /// bcrypt hash of the password (never the password itself)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Discord user ID bound to this login, if any
    #[sea_orm(unique)]
    pub discord_id: Option<String>,
    /// When the user registered
    pub created_at: DateTime,
}

/// Users have no relationships with business records
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod customer;
pub mod invoice;
pub mod job;
pub mod job_item;
pub mod status;
pub mod user;

// Re-export specific types to avoid conflicts
pub use customer::{Column as CustomerColumn, Entity as Customer, Model as CustomerModel};
pub use invoice::{Column as InvoiceColumn, Entity as Invoice, Model as InvoiceModel};
pub use job::{Column as JobColumn, Entity as Job, Model as JobModel};
pub use job_item::{Column as JobItemColumn, Entity as JobItem, Model as JobItemModel};
pub use status::{InvoiceStatus, JobPriority, JobStatus, JobType};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};

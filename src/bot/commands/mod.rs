//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Account commands (register, login, logout)
pub mod account;

/// Customer registry commands
pub mod customer;

/// General utility commands
pub mod general;

/// Invoice commands
pub mod invoice;

/// Job line item commands
pub mod item;

/// Job ledger commands
pub mod job;

/// Dashboard command
pub mod report;

/// Argument parsing and reply helpers
pub mod utils;

// Export commands
pub use account::*;
pub use customer::*;
pub use general::*;
pub use invoice::*;
pub use item::*;
pub use job::*;
pub use report::*;

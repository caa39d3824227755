//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete
//! and the login gate that runs before every command.

/// Autocomplete handlers for vocabularies and customers
pub mod autocomplete;
/// Login gate shared by all ledger commands
pub mod checks;

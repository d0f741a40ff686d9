//! Subcommand implementations for the PermitDesk binary.

pub mod health;
pub mod serve;

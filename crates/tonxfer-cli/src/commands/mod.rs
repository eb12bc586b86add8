//! Subcommand handlers.

pub mod address;
pub mod preview;
pub mod sign;

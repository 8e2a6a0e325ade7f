//! Subcommand implementations

pub mod mailbox;
pub mod resolve;

//! Command implementations for the Datagent CLI.

pub mod ask;
pub mod config;

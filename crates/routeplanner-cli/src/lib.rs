//! Route planner CLI library.
//!
//! Subcommand handlers and output formatting shared by the
//! `routeplanner-cli` binary.

pub mod commands;
pub mod output;

//! Moment CLI library.
//!
//! This crate provides the command-line interface for Moment.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, EventsAction, Toggle};
pub use config::Config;

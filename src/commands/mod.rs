//! CLI command implementations
//!
//! This module contains the commands supported by the CLI application,
//! built with the Command pattern.

pub mod command_traits;
pub mod extract_command;

pub use command_traits::{Command, CommandFactory};
pub use extract_command::ExtractCommand;

use clap::ArgMatches;

use crate::errors::SegResult;
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
///
/// Extraction is currently the only operation, so every invocation maps
/// to an [`ExtractCommand`].
#[derive(Debug, Default)]
pub struct SegregsCommandFactory;

impl SegregsCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        SegregsCommandFactory
    }
}

impl<'a> CommandFactory<'a> for SegregsCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> SegResult<Box<dyn Command + 'a>> {
        Ok(Box::new(ExtractCommand::new(args, logger)?))
    }
}

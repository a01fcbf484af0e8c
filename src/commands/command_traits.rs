//! Command pattern interfaces
//!
//! `main` turns clap matches into a boxed [`Command`] through a
//! [`CommandFactory`] and runs it; errors bubble up as [`SegError`]s and
//! are reported there.
//!
//! [`SegError`]: crate::errors::SegError

use clap::ArgMatches;

use crate::errors::SegResult;
use crate::utils::logger::Logger;

/// A fully resolved operation ready to run
pub trait Command {
    /// Short name used in log messages
    fn name(&self) -> &'static str;

    /// Run the operation to completion
    fn execute(&self) -> SegResult<()>;
}

/// Builds commands from parsed command-line arguments
pub trait CommandFactory<'a> {
    /// Resolve arguments (and any files they point to) into a command
    ///
    /// # Arguments
    /// * `args` - Parsed command line
    /// * `logger` - Run log the command may write to
    ///
    /// # Returns
    /// The command, or an error if the arguments or referenced
    /// configuration are invalid
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> SegResult<Box<dyn Command + 'a>>;
}

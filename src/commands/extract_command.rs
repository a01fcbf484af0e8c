//! Region extraction command
//!
//! Resolves the command line (and an optional TOML configuration file)
//! into an [`ExtractionConfig`] and runs the extraction scheduler on one
//! annotation/image pair.

use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::{debug, info};

use crate::commands::command_traits::Command;
use crate::config::{ExtractionConfig, FailurePolicy, Granularity};
use crate::coordinate::PolygonMode;
use crate::errors::{SegError, SegResult};
use crate::extractor::ExtractionScheduler;
use crate::utils::logger::Logger;

/// Command extracting every region of a page
pub struct ExtractCommand<'a> {
    /// PAGE XML annotation
    annotation_path: PathBuf,
    /// Page image
    image_path: PathBuf,
    /// Output directory (line mode) or prefix (region mode)
    out_base: PathBuf,
    /// Resolved run configuration
    config: ExtractionConfig,
    /// Run log
    logger: &'a Logger,
}

/// Fetch a required positional path argument
fn required_path(args: &ArgMatches, name: &str) -> SegResult<PathBuf> {
    args.get_one::<String>(name)
        .map(PathBuf::from)
        .ok_or_else(|| SegError::Config(format!("Missing argument {}", name)))
}

impl<'a> ExtractCommand<'a> {
    /// Create a new extract command
    ///
    /// Values from `--config` are applied on top of the defaults, and
    /// explicit command-line options on top of those.
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Run log receiving one line per written region
    ///
    /// # Returns
    /// A new ExtractCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> SegResult<Self> {
        let annotation_path = required_path(args, "xml")?;
        let image_path = required_path(args, "image")?;
        let out_base = required_path(args, "out-base")?;

        let mut config = ExtractionConfig {
            show_progress: true,
            ..ExtractionConfig::default()
        };
        if let Some(config_file) = args.get_one::<String>("config") {
            info!("Reading configuration file {}", config_file);
            config = config.merge_toml_file(Path::new(config_file))?;
        }
        Self::apply_overrides(&mut config, args);
        config.validate()?;
        debug!("Resolved configuration: {:?}", config);

        Ok(ExtractCommand {
            annotation_path,
            image_path,
            out_base,
            config,
            logger,
        })
    }

    /// Apply explicit command-line options to a configuration
    fn apply_overrides(config: &mut ExtractionConfig, args: &ArgMatches) {
        if let Some(padding) = args.get_one::<u32>("padding") {
            config.padding = *padding;
        }
        if let Some(workers) = args.get_one::<usize>("workers") {
            config.workers = *workers;
        }
        if args.get_flag("lines") {
            config.granularity = Granularity::Line;
        }
        if args.get_flag("two-point-rectangles") {
            config.polygon_mode = PolygonMode::TwoPointRectangle;
        }
        if args.get_flag("keep-going") {
            config.failure_policy = FailurePolicy::Continue;
        }
        if args.get_flag("no-progress") || args.get_flag("quiet") {
            config.show_progress = false;
        }
    }
}

impl<'a> Command for ExtractCommand<'a> {
    fn name(&self) -> &'static str {
        "extract"
    }

    fn execute(&self) -> SegResult<()> {
        info!("Extracting {} regions from {} using {}",
              self.config.granularity.element_name(),
              self.image_path.display(),
              self.annotation_path.display());

        let scheduler = ExtractionScheduler::new(&self.config, self.logger);
        let summary = scheduler.run(&self.annotation_path, &self.image_path, &self.out_base)?;

        let message = format!("{} candidate(s), {} written, {} skipped",
                              summary.candidates, summary.written.len(), summary.skipped);
        info!("{}", message);
        self.logger.log(&message)?;
        Ok(())
    }
}

//! Extraction scheduler
//!
//! Drives a run: the image is decoded once, the annotation is read once on
//! the calling thread, output names are fixed for every region, and only
//! then are the regions handed to a fixed pool of scoped worker threads
//! through a bounded channel. Workers share the decoded image and the
//! configuration read-only; each owns the crop it produces.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crossbeam_channel::{bounded, Receiver};
use image::RgbaImage;
use log::{debug, error, info, warn};

use crate::annotation::{AnnotationReader, RegionDescriptor, RegionSet};
use crate::config::{ExtractionConfig, FailurePolicy};
use crate::errors::{SegError, SegResult};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;
use crate::utils::write_utils::{self, OutputPaths};

use super::rasterizer::{decode_image, RegionRasterizer};

/// A region together with its precomputed output names
#[derive(Debug)]
struct Job {
    descriptor: RegionDescriptor,
    paths: OutputPaths,
}

/// Files written for one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionOutput {
    /// Sequence index of the region
    pub index: usize,
    /// Written files
    pub paths: OutputPaths,
}

/// Outcome of a completed run
#[derive(Debug, Clone, Default)]
pub struct ExtractionSummary {
    /// Matching elements in the annotation
    pub candidates: usize,
    /// Elements skipped for missing polygon or text
    pub skipped: usize,
    /// Written regions, ordered by sequence index
    pub written: Vec<RegionOutput>,
}

/// What one worker did
#[derive(Default)]
struct WorkerReport {
    written: Vec<RegionOutput>,
    errors: Vec<SegError>,
}

/// Orchestrates decode, annotation reading and concurrent write-out
pub struct ExtractionScheduler<'a> {
    /// Run configuration
    config: &'a ExtractionConfig,
    /// Run log
    logger: &'a Logger,
}

impl<'a> ExtractionScheduler<'a> {
    /// Create a new scheduler
    ///
    /// # Arguments
    /// * `config` - Run configuration, shared with every worker
    /// * `logger` - Run log receiving one line per written region
    pub fn new(config: &'a ExtractionConfig, logger: &'a Logger) -> Self {
        ExtractionScheduler { config, logger }
    }

    /// Run a full extraction from files
    ///
    /// # Arguments
    /// * `annotation_path` - PAGE XML file
    /// * `image_path` - Page image
    /// * `out_base` - Output directory (line mode) or prefix (region mode)
    ///
    /// # Returns
    /// A summary of the run or the first fatal error
    pub fn run(&self, annotation_path: &Path, image_path: &Path, out_base: &Path) -> SegResult<ExtractionSummary> {
        self.config.validate()?;

        let image = decode_image(image_path)?;
        let reader = AnnotationReader::new(self.config.granularity, self.config.polygon_mode);
        let regions = reader.read_file(annotation_path)?;

        self.run_regions(&image, regions, out_base)
    }

    /// Rasterize and write an already read set of regions
    ///
    /// All output names are computed before the first worker starts, so a
    /// region without an `id` in region mode fails the run before any file
    /// is written.
    ///
    /// # Arguments
    /// * `image` - The decoded page image
    /// * `regions` - Regions in document order
    /// * `out_base` - Output directory (line mode) or prefix (region mode)
    ///
    /// # Returns
    /// A summary of the run or an error according to the failure policy
    pub fn run_regions(&self, image: &RgbaImage, regions: RegionSet, out_base: &Path) -> SegResult<ExtractionSummary> {
        self.config.validate()?;

        let candidates = regions.candidates;
        let skipped = regions.skipped();
        let jobs = self.plan_jobs(regions.descriptors, out_base)?;
        let total = jobs.len();

        write_utils::prepare_output_dir(out_base, self.config.granularity)?;

        let workers = self.config.workers.min(total.max(1));
        info!("Extracting {} region(s) with {} worker(s)", total, workers);

        let progress = ProgressTracker::new(total as u64, self.config.show_progress);
        let reports = self.dispatch(image, jobs, workers, &progress);

        let mut written = Vec::with_capacity(total);
        let mut errors = Vec::new();
        for report in reports {
            written.extend(report.written);
            errors.extend(report.errors);
        }
        written.sort_by_key(|output| output.index);

        if !errors.is_empty() {
            progress.abandon(errors.len());
            return match self.config.failure_policy {
                FailurePolicy::Abort => Err(errors.swap_remove(0)),
                FailurePolicy::Continue => Err(SegError::WorkersFailed { failed: errors.len(), total }),
            };
        }
        progress.finish();

        info!("Wrote {} region(s), skipped {}", written.len(), skipped);
        Ok(ExtractionSummary { candidates, skipped, written })
    }

    /// Fix the output names of every region before dispatch
    fn plan_jobs(&self, descriptors: Vec<RegionDescriptor>, out_base: &Path) -> SegResult<Vec<Job>> {
        let mut jobs: Vec<Job> = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let paths = write_utils::plan_output(&descriptor, out_base, self.config.granularity)?;
            if let Some(previous) = jobs.iter().find(|job| job.paths.base == paths.base) {
                warn!("Regions {} and {} both write to {}",
                      previous.descriptor.label(), descriptor.label(), paths.base.display());
            }
            jobs.push(Job { descriptor, paths });
        }
        Ok(jobs)
    }

    /// Feed jobs to a pool of scoped workers and collect their reports
    fn dispatch(&self, image: &RgbaImage, jobs: Vec<Job>, workers: usize,
                progress: &ProgressTracker) -> Vec<WorkerReport> {
        let (sender, receiver) = bounded::<Job>(workers * 2);
        let abort = AtomicBool::new(false);
        let rasterizer = RegionRasterizer::new(self.config.padding);

        thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    let receiver = receiver.clone();
                    let abort = &abort;
                    scope.spawn(move || {
                        self.work(worker, image, &rasterizer, receiver, abort, progress)
                    })
                })
                .collect();
            drop(receiver);

            for job in jobs {
                if abort.load(Ordering::SeqCst) {
                    debug!("Stopping dispatch after a failed region");
                    break;
                }
                if sender.send(job).is_err() {
                    break;
                }
            }
            drop(sender);

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(report) => report,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        })
    }

    /// Worker loop: rasterize and write until the queue is closed
    fn work(&self, worker: usize, image: &RgbaImage, rasterizer: &RegionRasterizer,
            receiver: Receiver<Job>, abort: &AtomicBool, progress: &ProgressTracker) -> WorkerReport {
        let mut report = WorkerReport::default();

        for job in receiver.iter() {
            if abort.load(Ordering::SeqCst) {
                break;
            }

            debug!("Worker {} processing region {}", worker, job.descriptor.label());
            match self.process(image, rasterizer, &job) {
                Ok(()) => {
                    progress.region_done(&job.descriptor.label());
                    report.written.push(RegionOutput {
                        index: job.descriptor.index,
                        paths: job.paths,
                    });
                }
                Err(e) => {
                    error!("Region {} failed: {}", job.descriptor.label(), e);
                    report.errors.push(e);
                    if self.config.failure_policy == FailurePolicy::Abort {
                        abort.store(true, Ordering::SeqCst);
                        break;
                    }
                }
            }
        }
        report
    }

    fn process(&self, image: &RgbaImage, rasterizer: &RegionRasterizer, job: &Job) -> SegResult<()> {
        let crop = rasterizer.rasterize(image, &job.descriptor)?;
        write_utils::write_region_outputs(&crop, &job.descriptor, &job.paths)?;
        self.logger.log(&format!("{}\t{}\t{}",
                                 job.descriptor.index,
                                 job.descriptor.label(),
                                 job.paths.image.display()))?;
        Ok(())
    }
}

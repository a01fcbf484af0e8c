//! Output writing utilities
//!
//! Helper functions for naming and writing the files produced for each
//! region: the masked PNG, the ground-truth text and, in region mode, a
//! JSON metadata record.
//!
//! Names depend only on the region's sequence index (line mode) or on its
//! `id` attribute (region mode), never on the order in which workers
//! finish.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use log::debug;
use serde_json::{Map, Value};

use crate::annotation::{RegionDescriptor, ID_KEY};
use crate::config::Granularity;
use crate::errors::{SegError, SegResult};

/// Extension of the masked raster
pub const IMAGE_SUFFIX: &str = ".png";
/// Extension of the ground-truth text
pub const TEXT_SUFFIX: &str = ".gt.txt";
/// Extension of the metadata record
pub const METADATA_SUFFIX: &str = ".json";

/// Files written for one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Common stem of all files, without extension
    pub base: PathBuf,
    /// Masked raster
    pub image: PathBuf,
    /// Ground-truth text
    pub text: PathBuf,
    /// Metadata record, region mode only
    pub metadata: Option<PathBuf>,
}

/// Append a suffix to a path without touching existing dots
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = base.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Whether a value can be appended to a file name without leaving its directory
fn is_safe_file_component(value: &str) -> bool {
    !value.contains(['/', '\\', '\0'])
}

/// Compute the output file names of a region
///
/// - Line mode: `<out_base>/<index:05>.png` and `.gt.txt`
/// - Region mode: `<out_base>_<id>.png`, `.json` and `.gt.txt`
///
/// # Arguments
/// * `descriptor` - The region
/// * `out_base` - Output directory (line mode) or prefix (region mode)
/// * `granularity` - Line or region mode
///
/// # Returns
/// The paths, `SegError::AttributeLookup` if a region lacks an `id` or
/// `SegError::UnsafeName` if the `id` contains a path separator
pub fn plan_output(descriptor: &RegionDescriptor, out_base: &Path,
                   granularity: Granularity) -> SegResult<OutputPaths> {
    match granularity {
        Granularity::Line => {
            let base = out_base.join(format!("{:05}", descriptor.index));
            Ok(OutputPaths {
                image: with_suffix(&base, IMAGE_SUFFIX),
                text: with_suffix(&base, TEXT_SUFFIX),
                metadata: None,
                base,
            })
        }
        Granularity::Region => {
            let id = descriptor.attributes.require(ID_KEY, &descriptor.label())?;
            if !is_safe_file_component(id) {
                return Err(SegError::UnsafeName {
                    region: descriptor.label(),
                    value: id.to_string(),
                });
            }
            let base = with_suffix(out_base, &format!("_{}", id));
            Ok(OutputPaths {
                image: with_suffix(&base, IMAGE_SUFFIX),
                text: with_suffix(&base, TEXT_SUFFIX),
                metadata: Some(with_suffix(&base, METADATA_SUFFIX)),
                base,
            })
        }
    }
}

/// Create the directory the outputs of a run are written into
///
/// Line mode writes into `out_base` itself; region mode writes next to
/// it, into its parent directory.
pub fn prepare_output_dir(out_base: &Path, granularity: Granularity) -> SegResult<()> {
    let dir = match granularity {
        Granularity::Line => Some(out_base),
        Granularity::Region => out_base.parent().filter(|p| !p.as_os_str().is_empty()),
    };
    if let Some(dir) = dir {
        debug!("Creating output directory {}", dir.display());
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Build the metadata record of a region
///
/// Contains the sequence index, the polygon, the text, every attribute of
/// the region element and the output locations as `Dir` (file stem) and
/// `Image`. Later keys win, so attributes override the first three.
pub fn build_metadata_record(descriptor: &RegionDescriptor,
                             paths: &OutputPaths) -> serde_json::Result<Map<String, Value>> {
    let mut record = Map::new();
    record.insert("Index".to_string(), Value::from(descriptor.index));
    record.insert(
        "Coordinates".to_string(),
        serde_json::to_value(descriptor.polygon.points())?,
    );
    record.insert("Text".to_string(), Value::from(descriptor.text.as_str()));
    for (key, value) in descriptor.attributes.iter() {
        record.insert(key.to_string(), Value::from(value));
    }
    record.insert("Dir".to_string(), Value::from(paths.base.to_string_lossy().into_owned()));
    record.insert("Image".to_string(), Value::from(paths.image.to_string_lossy().into_owned()));
    Ok(record)
}

/// Write all outputs of one region
///
/// Files are written in the order raster, metadata, text. Nothing is
/// rolled back if a later write fails.
///
/// # Arguments
/// * `image` - The masked crop
/// * `descriptor` - The region
/// * `paths` - Where to write
pub fn write_region_outputs(image: &RgbaImage, descriptor: &RegionDescriptor,
                            paths: &OutputPaths) -> SegResult<()> {
    image.save_with_format(&paths.image, ImageFormat::Png)?;

    if let Some(metadata_path) = &paths.metadata {
        let json_error = |source| SegError::Json { path: metadata_path.clone(), source };
        let record = build_metadata_record(descriptor, paths).map_err(json_error)?;
        let mut writer = BufWriter::new(File::create(metadata_path)?);
        serde_json::to_writer(&mut writer, &record).map_err(json_error)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    fs::write(&paths.text, format!("{}\n", descriptor.text))?;
    debug!("Wrote {}", paths.base.display());
    Ok(())
}

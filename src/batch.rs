use std::fs;
use std::path::{Path, PathBuf};

use rayon::{prelude::*, ThreadPoolBuilder};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::errors::{CornerMaskError, Result};
use crate::image_processor::ImageProcessor;
use crate::progress_tracker::ProgressTracker;
use crate::{Config, MAX_SIZE};

const ELIGIBLE_SUFFIXES: [&str; 3] = [".png", ".jpg", ".jpeg"];

/// Outcome counts of one batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Creates the output directory and any missing parents.
pub fn prepare_output_dir(output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)
        .map_err(|e| CornerMaskError::file_system(output_dir, "create output directory", e))
}

/// Whether the file name ends in `.png`, `.jpg` or `.jpeg`, ignoring case.
pub fn is_eligible(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_ascii_lowercase)
        .is_some_and(|name| {
            ELIGIBLE_SUFFIXES
                .iter()
                .any(|suffix| name.ends_with(suffix))
        })
}

/// Drives the image processor over every eligible file of the input directory.
pub struct BatchProcessor {
    config: Config,
}

impl BatchProcessor {
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Processes the whole input directory.
    ///
    /// Only an out-of-range size, a failure to list the input directory or to
    /// start the worker pool is returned; per-file failures are logged and
    /// counted.
    pub fn run(&self) -> Result<BatchSummary> {
        if !(1..=MAX_SIZE).contains(&self.config.size) {
            return Err(CornerMaskError::Validation {
                field: "size".to_string(),
                reason: format!("must be between 1 and {}", MAX_SIZE),
            });
        }

        let image_files = self.collect_image_files()?;
        if image_files.is_empty() {
            warn!(
                "No eligible images found in {}",
                self.config.input_dir.display()
            );
        }

        let processor = ImageProcessor::new(&self.config);
        let tracker = ProgressTracker::new(image_files.len(), self.config.progress);
        let process = |path: &PathBuf| -> bool {
            let ok = match processor.process_image(path) {
                Ok(_) => true,
                Err(e) => {
                    error!(
                        "Failed to process {}: {:#}",
                        path.display(),
                        anyhow::Error::new(e)
                    );
                    false
                }
            };
            tracker.inc();
            ok
        };

        let outcomes: Vec<bool> = if self.config.jobs > 1 {
            let pool = ThreadPoolBuilder::new()
                .num_threads(self.config.jobs)
                .build()
                .map_err(|e| CornerMaskError::Configuration {
                    message: format!("failed to start worker pool: {e}"),
                })?;
            pool.install(|| image_files.par_iter().map(process).collect())
        } else {
            image_files.iter().map(process).collect()
        };
        tracker.finish();

        let processed = outcomes.iter().filter(|ok| **ok).count();
        let summary = BatchSummary {
            processed,
            failed: outcomes.len() - processed,
        };

        if summary.failed > 0 {
            warn!("{} of {} images failed", summary.failed, outcomes.len());
        }
        info!("All images processed.");
        Ok(summary)
    }

    /// Lists eligible files directly inside the input directory, sorted by name.
    pub fn collect_image_files(&self) -> Result<Vec<PathBuf>> {
        let input_dir = &self.config.input_dir;
        let metadata = fs::metadata(input_dir)
            .map_err(|e| CornerMaskError::file_system(input_dir, "list input directory", e))?;
        if !metadata.is_dir() {
            return Err(CornerMaskError::file_system(
                input_dir,
                "list input directory",
                std::io::Error::from(std::io::ErrorKind::NotADirectory),
            ));
        }

        let mut image_files = Vec::new();

        let walker = WalkDir::new(input_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                    return Err(CornerMaskError::file_system(
                        input_dir,
                        "list input directory",
                        source,
                    ));
                }
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if entry.file_type().is_file() && is_eligible(path) {
                image_files.push(entry.into_path());
            } else {
                debug!("Skipping {}", path.display());
            }
        }

        Ok(image_files)
    }
}

pub mod batch;
pub mod config;
pub mod errors;
pub mod image_processor;
pub mod imageops;
pub mod logging;
pub mod progress_tracker;

pub use batch::{is_eligible, prepare_output_dir, BatchProcessor, BatchSummary};
pub use config::{Config, DEFAULT_INPUT_DIR, MAX_SIZE, USAGE_EXIT_CODE};
pub use errors::{CornerMaskError, Result};
pub use image_processor::ImageProcessor;

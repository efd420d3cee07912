use anyhow::{Context, Result};
use tracing::error;

use corner_mask_rs::{logging, prepare_output_dir, BatchProcessor, Config};

fn main() -> Result<()> {
    let config = Config::from_args();
    logging::init(config.verbose);

    prepare_output_dir(&config.output_dir).with_context(|| {
        format!(
            "Failed to prepare output directory: {}",
            config.output_dir.display()
        )
    })?;

    // A listing failure stops the batch but is not a process failure.
    if let Err(e) = BatchProcessor::new(config).run() {
        error!("Error processing images: {:#}", anyhow::Error::new(e));
    }

    Ok(())
}

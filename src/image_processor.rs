use std::fs;
use std::path::{Path, PathBuf};

use image::{codecs::png::PngEncoder, GrayImage, ImageReader};
use tracing::{debug, info};

use crate::errors::{CornerMaskError, Result};
use crate::imageops::{rounded_rect_mask, ClipToMask};
use crate::Config;

/// Turns one source image into a masked square PNG.
///
/// The mask is built once from the configured size and radius and shared by
/// every call.
pub struct ImageProcessor<'a> {
    config: &'a Config,
    mask: GrayImage,
}

impl<'a> ImageProcessor<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            mask: rounded_rect_mask(config.size, config.border_radius),
        }
    }

    /// Processes `input_file` and returns the path that was written.
    pub fn process_image(&self, input_file: &Path) -> Result<PathBuf> {
        let output_file = self.output_path(input_file)?;
        let png = self.render(input_file)?;

        fs::write(&output_file, png)
            .map_err(|e| CornerMaskError::file_system(&output_file, "write output", e))?;

        info!("Processed: {}", output_file.display());
        Ok(output_file)
    }

    /// Decodes, stretches, masks and PNG-encodes `input_file` in memory.
    pub fn render(&self, input_file: &Path) -> Result<Vec<u8>> {
        let size = self.config.size;

        let source = ImageReader::open(input_file)
            .map_err(|e| CornerMaskError::file_system(input_file, "open image", e))?
            .with_guessed_format()
            .map_err(|e| CornerMaskError::file_system(input_file, "detect format", e))?
            .decode()
            .map_err(|e| CornerMaskError::image_processing(input_file, "decode image", e))?;
        debug!(
            "Decoded {} ({}x{})",
            input_file.display(),
            source.width(),
            source.height()
        );

        let canvas = source
            .resize_exact(size, size, self.config.filter)
            .into_rgba8()
            .clip_to_mask(&self.mask)?;

        let mut png = Vec::new();
        canvas
            .write_with_encoder(PngEncoder::new(&mut png))
            .map_err(|e| CornerMaskError::image_processing(input_file, "encode png", e))?;

        Ok(png)
    }

    /// Output location: the source file name, unchanged, under the output directory.
    pub fn output_path(&self, input_file: &Path) -> Result<PathBuf> {
        let file_name = input_file
            .file_name()
            .ok_or_else(|| CornerMaskError::Validation {
                field: "input file".to_string(),
                reason: format!("{} has no file name", input_file.display()),
            })?;

        Ok(self.config.output_dir.join(file_name))
    }
}

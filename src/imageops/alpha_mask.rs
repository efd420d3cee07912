use image::{ImageBuffer, Luma, Pixel, Primitive, Rgba};
use num_traits::AsPrimitive;

use crate::errors::{CornerMaskError, Result};
use crate::imageops::get_max_value;

/// Keep-overlap-only compositing of an image onto a coverage mask.
///
/// The result keeps the source colour and scales its alpha by the mask, so
/// content survives only where the mask was painted.
pub trait ClipToMask<SI>
where
    Rgba<SI>: Pixel<Subpixel = SI>,
    SI: Primitive + AsPrimitive<f32> + 'static,
{
    fn clip_to_mask<SM>(
        self,
        mask: &ImageBuffer<Luma<SM>, Vec<SM>>,
    ) -> Result<ImageBuffer<Rgba<SI>, Vec<SI>>>
    where
        Luma<SM>: Pixel<Subpixel = SM>,
        SM: Primitive + AsPrimitive<f32> + 'static;
}

impl<SI> ClipToMask<SI> for ImageBuffer<Rgba<SI>, Vec<SI>>
where
    Rgba<SI>: Pixel<Subpixel = SI>,
    SI: Primitive + AsPrimitive<f32> + 'static,
    f32: AsPrimitive<SI>,
{
    fn clip_to_mask<SM>(
        mut self,
        mask: &ImageBuffer<Luma<SM>, Vec<SM>>,
    ) -> Result<ImageBuffer<Rgba<SI>, Vec<SI>>>
    where
        Luma<SM>: Pixel<Subpixel = SM>,
        SM: Primitive + AsPrimitive<f32> + 'static,
    {
        if self.dimensions() != mask.dimensions() {
            return Err(CornerMaskError::Validation {
                field: "mask".to_string(),
                reason: format!(
                    "dimensions {:?} do not match image dimensions {:?}",
                    mask.dimensions(),
                    self.dimensions()
                ),
            });
        }

        let sm_max: f32 = get_max_value::<SM>().as_();

        for (pixel, mask_pixel) in self.pixels_mut().zip(mask.pixels()) {
            let Luma([coverage]) = *mask_pixel;
            let Rgba([_, _, _, alpha]) = pixel;
            let scaled: f32 = (*alpha).as_() * coverage.as_() / sm_max;
            *alpha = scaled.round().as_();
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, RgbaImage};

    #[test]
    fn test_alpha_follows_mask() -> Result<()> {
        let image = RgbaImage::from_pixel(2, 1, Rgba([10, 20, 30, 255]));
        let mask = GrayImage::from_raw(2, 1, vec![0, 255]).unwrap();

        let clipped = image.clip_to_mask(&mask)?;

        assert_eq!(clipped.get_pixel(0, 0), &Rgba([10, 20, 30, 0]));
        assert_eq!(clipped.get_pixel(1, 0), &Rgba([10, 20, 30, 255]));
        Ok(())
    }

    #[test]
    fn test_source_alpha_is_preserved_inside_mask() -> Result<()> {
        let image = RgbaImage::from_pixel(2, 1, Rgba([200, 100, 50, 128]));
        let mask = GrayImage::from_raw(2, 1, vec![255, 128]).unwrap();

        let clipped = image.clip_to_mask(&mask)?;

        assert_eq!(clipped.get_pixel(0, 0)[3], 128);
        assert_eq!(clipped.get_pixel(1, 0)[3], 64);
        Ok(())
    }

    #[test]
    fn test_dimension_mismatch_is_rejected() {
        let image = RgbaImage::new(4, 4);
        let mask = GrayImage::new(3, 4);

        let err = image.clip_to_mask(&mask).unwrap_err();
        assert!(matches!(err, CornerMaskError::Validation { .. }));
    }
}

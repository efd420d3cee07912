use image::{GrayImage, Luma};

/// Samples per pixel along each axis when estimating arc coverage.
const SUPERSAMPLE: u32 = 4;

/// Builds a `size × size` coverage mask shaped as a rounded rectangle.
///
/// Each corner is replaced by a circular arc of `radius` tangent to both
/// adjacent edges. Pixels inside the shape are 255, pixels outside are 0 and
/// pixels crossed by an arc get their supersampled coverage. A radius larger
/// than half the canvas is clamped, so the shape becomes a circle.
pub fn rounded_rect_mask(size: u32, radius: u32) -> GrayImage {
    let shape = RoundedRect::new(size as f32, radius as f32);
    let samples = SUPERSAMPLE * SUPERSAMPLE;

    GrayImage::from_fn(size, size, |x, y| {
        if shape.is_solid(x, y) {
            return Luma([u8::MAX]);
        }

        let step = 1.0 / SUPERSAMPLE as f32;
        let covered = (0..samples)
            .filter(|i| {
                let sx = x as f32 + (i % SUPERSAMPLE) as f32 * step + step / 2.0;
                let sy = y as f32 + (i / SUPERSAMPLE) as f32 * step + step / 2.0;
                shape.contains(sx, sy)
            })
            .count() as u32;

        Luma([((covered * u8::MAX as u32 + samples / 2) / samples) as u8])
    })
}

struct RoundedRect {
    size: f32,
    radius: f32,
}

impl RoundedRect {
    fn new(size: f32, radius: f32) -> Self {
        Self {
            size,
            radius: radius.min(size / 2.0),
        }
    }

    /// Whether the whole pixel lies in the cross spanned by the straight edges.
    fn is_solid(&self, x: u32, y: u32) -> bool {
        let inner = |v: u32| {
            let v = v as f32;
            v >= self.radius && v + 1.0 <= self.size - self.radius
        };
        inner(x) || inner(y)
    }

    fn contains(&self, px: f32, py: f32) -> bool {
        let cx = px.clamp(self.radius, self.size - self.radius);
        let cy = py.clamp(self.radius, self.size - self.radius);
        let (dx, dy) = (px - cx, py - cy);
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

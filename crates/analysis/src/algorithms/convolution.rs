use image::{GrayImage, Luma};
use crate::{error::Result, traits::RasterTransform, types::Kernel};

/// Truncate a filter response into the 8-bit range
#[inline]
pub(crate) fn clamp_to_u8(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Convolve `image` with `kernel`.
///
/// Only pixels at least `kernel.offset()` away from every edge are computed;
/// the border band keeps the zero the output was allocated with. An even
/// kernel side, or one wider than the image, yields an all-zero raster.
pub fn convolve(image: &GrayImage, kernel: &Kernel) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut output = GrayImage::new(width, height);
    if kernel.side() % 2 == 0 {
        return output;
    }

    let side = kernel.side() as u32;
    let offset = kernel.offset() as u32;
    for y in offset..height.saturating_sub(offset) {
        for x in offset..width.saturating_sub(offset) {
            let mut sum = 0.0;
            for i in 0..side {
                for j in 0..side {
                    let sample = image.get_pixel(x + i - offset, y + j - offset)[0];
                    sum += sample as f64 * kernel.weight(i as usize, j as usize);
                }
            }
            output.put_pixel(x, y, Luma([clamp_to_u8(sum / kernel.normalizer())]));
        }
    }

    output
}

/// Generic square-kernel filter
#[derive(Debug, Clone)]
pub struct ConvolutionEngine {
    pub kernel: Kernel,
}

impl ConvolutionEngine {
    pub fn new(kernel: Kernel) -> Self {
        Self { kernel }
    }
}

impl RasterTransform for ConvolutionEngine {
    fn transform(&self, image: &GrayImage) -> Result<GrayImage> {
        Ok(convolve(image, &self.kernel))
    }
}

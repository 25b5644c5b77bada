use image::{GrayImage, Luma};
use crate::{
    algorithms::convolution::{clamp_to_u8, convolve},
    error::Result,
    traits::RasterTransform,
    types::{Kernel, LaplacianVariant},
};

/// Sobel gradient-magnitude map.
///
/// This is the magnitude only: there is no non-maximum suppression and no
/// hysteresis, so the output is a grayscale response rather than a binary
/// edge map. The one-pixel border stays zero.
#[derive(Debug, Clone)]
pub struct GradientEdgeDetector {
    sobel_x: Kernel,
    sobel_y: Kernel,
}

impl Default for GradientEdgeDetector {
    fn default() -> Self {
        Self {
            sobel_x: Kernel::sobel_x(),
            sobel_y: Kernel::sobel_y(),
        }
    }
}

impl GradientEdgeDetector {
    pub fn magnitude(&self, image: &GrayImage) -> GrayImage {
        let (width, height) = image.dimensions();
        let mut output = GrayImage::new(width, height);

        for y in 1..height.saturating_sub(1) {
            for x in 1..width.saturating_sub(1) {
                let mut gx = 0.0;
                let mut gy = 0.0;
                for i in 0..3 {
                    for j in 0..3 {
                        let sample = image.get_pixel(x + i - 1, y + j - 1)[0] as f64;
                        gx += sample * self.sobel_x.weight(i as usize, j as usize);
                        gy += sample * self.sobel_y.weight(i as usize, j as usize);
                    }
                }
                let magnitude = (gx * gx + gy * gy).sqrt();
                output.put_pixel(x, y, Luma([clamp_to_u8(magnitude)]));
            }
        }

        output
    }
}

impl RasterTransform for GradientEdgeDetector {
    fn transform(&self, image: &GrayImage) -> Result<GrayImage> {
        Ok(self.magnitude(image))
    }
}

/// Single 3×3 Laplacian pass with normalizer 1
#[derive(Debug, Clone)]
pub struct LaplacianEdgeDetector {
    kernel: Kernel,
}

impl LaplacianEdgeDetector {
    pub fn new(variant: LaplacianVariant) -> Self {
        Self { kernel: Kernel::laplacian(variant) }
    }
}

impl Default for LaplacianEdgeDetector {
    fn default() -> Self {
        Self::new(LaplacianVariant::default())
    }
}

impl RasterTransform for LaplacianEdgeDetector {
    fn transform(&self, image: &GrayImage) -> Result<GrayImage> {
        Ok(convolve(image, &self.kernel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_step() -> GrayImage {
        GrayImage::from_fn(5, 5, |x, _| Luma([if x < 2 { 0 } else { 100 }]))
    }

    #[test]
    fn test_uniform_image_has_no_gradient() {
        let image = GrayImage::from_pixel(6, 6, Luma([77u8]));
        let output = GradientEdgeDetector::default().magnitude(&image);
        assert!(output.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_step_edge_saturates() {
        let output = GradientEdgeDetector::default().magnitude(&vertical_step());
        for y in 1..4 {
            let row: Vec<u8> = (0..5).map(|x| output.get_pixel(x, y)[0]).collect();
            assert_eq!(row, vec![0, 255, 255, 0, 0]);
        }
        assert!((0..5).all(|x| output.get_pixel(x, 0)[0] == 0 && output.get_pixel(x, 4)[0] == 0));
    }

    #[test]
    fn test_gradient_is_deterministic() {
        let image = GrayImage::from_fn(9, 7, |x, y| Luma([((x * 31) ^ (y * 17)) as u8]));
        let detector = GradientEdgeDetector::default();
        assert_eq!(detector.magnitude(&image), detector.magnitude(&image));
    }

    #[test]
    fn test_laplacian_variants_on_flat_region() {
        let image = GrayImage::from_pixel(5, 5, Luma([50u8]));
        let weak = LaplacianEdgeDetector::new(LaplacianVariant::Weak).transform(&image).unwrap();
        let standard = LaplacianEdgeDetector::new(LaplacianVariant::Standard).transform(&image).unwrap();

        assert_eq!(weak.get_pixel(2, 2)[0], 150);
        assert_eq!(standard.get_pixel(2, 2)[0], 0);
        assert_eq!(weak.get_pixel(0, 2)[0], 0);
    }
}

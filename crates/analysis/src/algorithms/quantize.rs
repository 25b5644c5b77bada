use image::{GrayImage, Luma};
use imageproc::map::map_colors;
use crate::{error::Result, traits::RasterTransform};

/// Five-level piecewise intensity remap
#[derive(Debug, Clone, Copy, Default)]
pub struct IntensityQuantizer;

impl IntensityQuantizer {
    #[inline]
    pub fn level(intensity: u8) -> u8 {
        match intensity {
            0..=50 => 25,
            51..=100 => 75,
            101..=150 => 125,
            151..=200 => 175,
            _ => 255,
        }
    }

    pub fn quantize(&self, image: &GrayImage) -> GrayImage {
        map_colors(image, |p| Luma([Self::level(p[0])]))
    }
}

impl RasterTransform for IntensityQuantizer {
    fn transform(&self, image: &GrayImage) -> Result<GrayImage> {
        Ok(self.quantize(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        let inputs = [0, 50, 51, 100, 101, 150, 151, 200, 201, 255];
        let expected = [25, 25, 75, 75, 125, 125, 175, 175, 255, 255];
        for (input, want) in inputs.into_iter().zip(expected) {
            assert_eq!(IntensityQuantizer::level(input), want, "input {input}");
        }
    }

    #[test]
    fn test_quantize_raster() {
        let image = GrayImage::from_fn(256, 1, |x, _| Luma([x as u8]));
        let output = IntensityQuantizer.quantize(&image);
        assert_eq!(output.dimensions(), (256, 1));
        assert_eq!(output.get_pixel(120, 0)[0], 125);
        let levels: std::collections::BTreeSet<u8> = output.pixels().map(|p| p[0]).collect();
        assert_eq!(levels.into_iter().collect::<Vec<_>>(), vec![25, 75, 125, 175, 255]);
    }
}

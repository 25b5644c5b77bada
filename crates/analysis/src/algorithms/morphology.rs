use image::{GrayImage, Luma};
use crate::{
    error::Result,
    traits::RasterTransform,
    types::{BACKGROUND, FOREGROUND},
};

/// Binary morphology with a flat 7×7 all-ones structuring element.
///
/// Foreground is 0. Pixels within [`MorphologyEngine::OFFSET`] of any edge
/// are never computed and stay at the zero the output was allocated with.
#[derive(Debug, Clone, Copy, Default)]
pub struct MorphologyEngine;

impl MorphologyEngine {
    pub const ELEMENT_SIDE: u32 = 7;
    pub const OFFSET: u32 = Self::ELEMENT_SIDE / 2;

    /// Foreground only where the whole element covers foreground
    pub fn erode(&self, image: &GrayImage) -> GrayImage {
        Self::sweep(image, |window| window.iter().all(|&v| v == FOREGROUND))
    }

    /// Foreground wherever the element touches any foreground
    pub fn dilate(&self, image: &GrayImage) -> GrayImage {
        Self::sweep(image, |window| window.iter().any(|&v| v == FOREGROUND))
    }

    /// Two erosions followed by three dilations
    pub fn open(&self, image: &GrayImage) -> GrayImage {
        let eroded = self.repeat(image, 2, Self::erode);
        self.repeat(&eroded, 3, Self::dilate)
    }

    /// Three dilations followed by three erosions
    pub fn close(&self, image: &GrayImage) -> GrayImage {
        let dilated = self.repeat(image, 3, Self::dilate);
        self.repeat(&dilated, 3, Self::erode)
    }

    /// Opening then closing, the cleanup run before object counting
    pub fn clean(&self, image: &GrayImage) -> GrayImage {
        self.close(&self.open(image))
    }

    fn repeat(&self, image: &GrayImage, times: usize, op: fn(&Self, &GrayImage) -> GrayImage) -> GrayImage {
        let mut processed = image.clone();
        for _ in 0..times {
            processed = op(self, &processed);
        }
        processed
    }

    fn sweep<F>(image: &GrayImage, is_foreground: F) -> GrayImage
    where
        F: Fn(&[u8]) -> bool,
    {
        let (width, height) = image.dimensions();
        let mut output = GrayImage::new(width, height);
        let offset = Self::OFFSET;
        let mut window = Vec::with_capacity((Self::ELEMENT_SIDE * Self::ELEMENT_SIDE) as usize);

        for y in offset..height.saturating_sub(offset) {
            for x in offset..width.saturating_sub(offset) {
                window.clear();
                for j in 0..Self::ELEMENT_SIDE {
                    for i in 0..Self::ELEMENT_SIDE {
                        window.push(image.get_pixel(x + i - offset, y + j - offset)[0]);
                    }
                }
                let value = if is_foreground(&window) { FOREGROUND } else { BACKGROUND };
                output.put_pixel(x, y, Luma([value]));
            }
        }

        output
    }
}

impl RasterTransform for MorphologyEngine {
    fn transform(&self, image: &GrayImage) -> Result<GrayImage> {
        Ok(self.clean(image))
    }
}

use image::{GrayImage, Luma};
use imageproc::map::map_colors;
use crate::{
    error::{AnalysisError, Result},
    traits::RasterTransform,
    types::{Histogram, BACKGROUND, FOREGROUND},
};

/// Global binarization at the level maximizing between-class variance.
///
/// Pixels brighter than the level become [`BACKGROUND`] (255), the rest
/// [`FOREGROUND`] (0). Counting and contour tracing rely on this polarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct OtsuThresholder;

impl OtsuThresholder {
    /// Threshold level chosen for `histogram`; the first maximum wins ties
    pub fn level_for(histogram: &Histogram) -> u8 {
        let total = histogram.total() as f64;
        let counts = histogram.counts();

        let sum: f64 = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| i as f64 * count as f64)
            .sum();

        let mut sum_b = 0.0;
        let mut weight_b = 0.0;
        let mut max_variance = 0.0;
        let mut threshold = 0u8;

        for (t, &count) in counts.iter().enumerate() {
            weight_b += count as f64;
            if weight_b == 0.0 {
                continue;
            }

            let weight_f = total - weight_b;
            if weight_f == 0.0 {
                break;
            }

            sum_b += t as f64 * count as f64;
            let mean_b = sum_b / weight_b;
            let mean_f = (sum - sum_b) / weight_f;

            let variance = weight_b * weight_f * (mean_b - mean_f).powi(2);
            if variance > max_variance {
                max_variance = variance;
                threshold = t as u8;
            }
        }

        threshold
    }

    pub fn level(&self, image: &GrayImage) -> u8 {
        Self::level_for(&Histogram::of(image))
    }

    pub fn binarize(&self, image: &GrayImage) -> GrayImage {
        let threshold = self.level(image);
        map_colors(image, |p| {
            Luma([if p[0] > threshold { BACKGROUND } else { FOREGROUND }])
        })
    }
}

impl RasterTransform for OtsuThresholder {
    fn transform(&self, image: &GrayImage) -> Result<GrayImage> {
        Ok(self.binarize(image))
    }
}

/// Cumulative-histogram percentile cut with inverted polarity.
///
/// A crude stand-in for watershed segmentation: the darkest
/// `background_fraction` of the pixels defines a level, and everything
/// below it becomes [`BACKGROUND`] while everything at or above it becomes
/// [`FOREGROUND`]. This is the opposite polarity to [`OtsuThresholder`].
/// There is no marker seeding and no flooding.
#[derive(Debug, Clone, Copy)]
pub struct PercentileThresholder {
    background_fraction: f64,
}

impl PercentileThresholder {
    pub const DEFAULT_BACKGROUND_FRACTION: f64 = 0.2;

    pub fn new(background_fraction: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&background_fraction) {
            return Err(AnalysisError::InvalidArgument(format!(
                "background fraction must lie in [0, 1], got {background_fraction}"
            )));
        }
        Ok(Self { background_fraction })
    }

    pub fn background_fraction(&self) -> f64 {
        self.background_fraction
    }

    /// First intensity whose cumulative count reaches the target, or 0
    pub fn level_for(&self, histogram: &Histogram) -> u8 {
        let target = (histogram.total() as f64 * self.background_fraction) as u64;
        let mut cumulative = 0u64;
        for (i, &count) in histogram.counts().iter().enumerate() {
            cumulative += count as u64;
            if cumulative >= target {
                return i as u8;
            }
        }
        0
    }

    pub fn level(&self, image: &GrayImage) -> u8 {
        self.level_for(&Histogram::of(image))
    }

    pub fn segment(&self, image: &GrayImage) -> GrayImage {
        let level = self.level(image);
        map_colors(image, |p| Luma([if p[0] >= level { FOREGROUND } else { BACKGROUND }]))
    }
}

impl Default for PercentileThresholder {
    fn default() -> Self {
        Self { background_fraction: Self::DEFAULT_BACKGROUND_FRACTION }
    }
}

impl RasterTransform for PercentileThresholder {
    fn transform(&self, image: &GrayImage) -> Result<GrayImage> {
        Ok(self.segment(image))
    }
}

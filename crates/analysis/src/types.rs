use std::fmt;

use image::GrayImage;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::{AnalysisError, Result};

/// Sample value marking an object pixel in binarized rasters.
pub const FOREGROUND: u8 = 0;
/// Sample value marking a background pixel in binarized rasters.
pub const BACKGROUND: u8 = 255;

/// Centre weight of a 3×3 Laplacian kernel.
///
/// Both variants share the 4-neighbour ring of ones; they differ only in
/// the centre tap.
#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, IntoStaticStr,
    PartialEq, Eq
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LaplacianVariant {
    /// Centre weight -1, a weaker response that keeps flat regions bright
    #[default]
    Weak,
    /// Centre weight -4, the true discrete Laplacian
    Standard,
}

impl LaplacianVariant {
    pub fn center_weight(self) -> f64 {
        match self {
            Self::Weak => -1.0,
            Self::Standard => -4.0,
        }
    }
}

/// A square convolution kernel with a normalization divisor.
///
/// Weights are stored so that `weight(i, j)` is applied to the sample at
/// `(x + i - offset, y + j - offset)`: the first index walks the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    side: usize,
    weights: Vec<f64>,
    normalizer: f64,
}

impl Kernel {
    pub fn new(side: usize, weights: Vec<f64>, normalizer: f64) -> Result<Self> {
        if weights.len() != side * side {
            return Err(AnalysisError::InvalidArgument(format!(
                "kernel of side {side} needs {} weights, got {}",
                side * side,
                weights.len()
            )));
        }
        if !normalizer.is_finite() || normalizer == 0.0 {
            return Err(AnalysisError::InvalidArgument(format!(
                "kernel normalizer must be finite and non-zero, got {normalizer}"
            )));
        }
        Ok(Self { side, weights, normalizer })
    }

    /// Horizontal Sobel operator
    pub fn sobel_x() -> Self {
        Self {
            side: 3,
            weights: vec![
                -1.0, 0.0, 1.0,
                -2.0, 0.0, 2.0,
                -1.0, 0.0, 1.0,
            ],
            normalizer: 1.0,
        }
    }

    /// Vertical Sobel operator
    pub fn sobel_y() -> Self {
        Self {
            side: 3,
            weights: vec![
                -1.0, -2.0, -1.0,
                0.0, 0.0, 0.0,
                1.0, 2.0, 1.0,
            ],
            normalizer: 1.0,
        }
    }

    pub fn laplacian(variant: LaplacianVariant) -> Self {
        Self {
            side: 3,
            weights: vec![
                0.0, 1.0, 0.0,
                1.0, variant.center_weight(), 1.0,
                0.0, 1.0, 0.0,
            ],
            normalizer: 1.0,
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Distance from the centre tap to the kernel edge
    pub fn offset(&self) -> usize {
        self.side / 2
    }

    pub fn normalizer(&self) -> f64 {
        self.normalizer
    }

    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        self.weights[i * self.side + j]
    }
}

/// Per-intensity pixel counts of a grayscale raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u32; 256],
}

impl Histogram {
    pub fn of(image: &GrayImage) -> Self {
        let counts = imageproc::stats::histogram(image).channels[0];
        Self { counts }
    }

    pub fn counts(&self) -> &[u32; 256] {
        &self.counts
    }

    pub fn count(&self, intensity: u8) -> u32 {
        self.counts[intensity as usize]
    }

    /// Number of pixels the histogram was built from
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }
}

/// Freeman chain code of one traced boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainCode {
    /// The raster held no foreground pixel to start from
    NoObject,
    /// Direction codes 0-7, one per step taken from the start pixel
    Found(Vec<u8>),
}

impl ChainCode {
    pub const NO_OBJECT: &'static str = "no object found";

    pub fn directions(&self) -> &[u8] {
        match self {
            Self::NoObject => &[],
            Self::Found(directions) => directions,
        }
    }

    pub fn steps(&self) -> usize {
        self.directions().len()
    }
}

impl fmt::Display for ChainCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoObject => f.write_str(Self::NO_OBJECT),
            Self::Found(directions) => directions
                .iter()
                .try_for_each(|direction| write!(f, "{direction}")),
        }
    }
}

/// Raster-producing stages of the analysis pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    GradientEdges,
    OtsuThreshold,
    LaplacianEdges,
    PercentileThreshold,
    BoxFilter(u32),
    Quantize,
}

impl Stage {
    /// Output file name used when the report is written to disk
    pub fn file_name(&self) -> String {
        match self {
            Self::GradientEdges => "canny.png".to_string(),
            Self::OtsuThreshold => "otsu.png".to_string(),
            Self::LaplacianEdges => "marr_hildreth.png".to_string(),
            Self::PercentileThreshold => "watershed.png".to_string(),
            Self::BoxFilter(size) => format!("filtered_{size}x{size}.png"),
            Self::Quantize => "segmented.png".to_string(),
        }
    }
}

/// One stage output raster
#[derive(Debug, Clone)]
pub struct StageImage {
    pub stage: Stage,
    pub file_name: String,
    pub image: GrayImage,
}

/// Everything one pipeline run produces
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Source image dimensions
    pub image_width: u32,
    pub image_height: u32,
    /// Stage rasters in execution order
    pub images: Vec<StageImage>,
    /// Objects surviving cleanup and the minimum-area filter
    pub object_count: usize,
    /// Contour of the first object in the Otsu output
    pub chain_code: ChainCode,
}

impl AnalysisReport {
    pub const CHAIN_CODE_FILE_NAME: &'static str = "freeman_chain.txt";

    pub fn image(&self, stage: Stage) -> Option<&GrayImage> {
        self.images
            .iter()
            .find(|output| output.stage == stage)
            .map(|output| &output.image)
    }
}

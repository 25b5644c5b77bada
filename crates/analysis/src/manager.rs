use image::{DynamicImage, GrayImage};
use crate::{
    algorithms::{
        BoxFilterEngine, ConnectedComponentCounter, ContourTracer, GradientEdgeDetector,
        IntensityQuantizer, LaplacianEdgeDetector, OtsuThresholder, PercentileThresholder,
    },
    error::{AnalysisError, Result},
    traits::RasterTransform,
    types::{ChainCode, LaplacianVariant},
};
use serde::{Serialize, Deserialize};
use schemars::JsonSchema;
use strum::{Display, EnumString, EnumIter, IntoStaticStr, VariantNames};

#[derive(
    Debug, Clone,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq
)]
#[serde(tag = "type", content = "params")]
#[strum(serialize_all = "snake_case")]
pub enum AnalysisCommand {
    /// Sobel gradient-magnitude map
    #[serde(rename = "gradient_edges")]
    GradientEdges,

    /// 3×3 Laplacian response
    #[serde(rename = "laplacian_edges")]
    LaplacianEdges {
        #[serde(default)]
        variant: LaplacianVariant,
    },

    /// Otsu binarization (0 = object, 255 = background)
    #[serde(rename = "otsu_threshold")]
    OtsuThreshold,

    /// Histogram-percentile cut with inverted polarity
    #[serde(rename = "percentile_threshold")]
    PercentileThreshold {
        #[schemars(range(min = 0.0, max = 1.0))]
        background_fraction: f64,
    },

    /// Count objects in the Otsu output
    #[serde(rename = "count_objects")]
    CountObjects,

    /// Freeman chain code of the first object in the Otsu output
    #[serde(rename = "chain_code")]
    ChainCode,

    /// Box filter over the red-derived luminance of the colour source
    #[serde(rename = "box_filter")]
    BoxFilter {
        #[schemars(range(min = 1, max = 255))]
        size: u32,
    },

    /// Five-level intensity remap
    #[serde(rename = "quantize")]
    Quantize,
}

impl AnalysisCommand {
    /// Get the JSON schema for all commands
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(AnalysisCommand)
    }

    /// Get a list of all available command names
    pub fn command_names() -> &'static [&'static str] {
        <Self as VariantNames>::VARIANTS
    }

    /// Get a description of the command
    pub fn description(&self) -> &'static str {
        match self {
            Self::GradientEdges => "Sobel gradient magnitude clamped to 255, no suppression or hysteresis",
            Self::LaplacianEdges { .. } => "Single 3x3 Laplacian convolution with a zero border",
            Self::OtsuThreshold => "Global Otsu binarization, dark pixels become objects (0)",
            Self::PercentileThreshold { .. } => "Percentile level from the cumulative histogram, darker pixels become 255",
            Self::CountObjects => "Count 8-connected objects in the Otsu output after smoothing and morphological cleanup",
            Self::ChainCode => "Greedy Freeman chain code from the first object pixel of the Otsu output",
            Self::BoxFilter { .. } => "Clipped-window mean over the red-derived luminance",
            Self::Quantize => "Remap intensities into five buckets",
        }
    }
}

/// Result of a single command
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutput {
    Image(GrayImage),
    Count(usize),
    ChainCode(ChainCode),
}

/// Holds one source image and runs individual analysis commands against it
#[derive(Clone, Default)]
pub struct Analyzer {
    image: Option<DynamicImage>,
    gray: Option<GrayImage>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a source image from file
    pub fn load_image(&mut self, path: &str) -> Result<()> {
        let img = image::open(path)?;
        self.set_image(img);
        Ok(())
    }

    /// Load a source image from memory
    pub fn load_image_from_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let img = image::load_from_memory(bytes)?;
        self.set_image(img);
        Ok(())
    }

    /// Set the source image directly
    pub fn set_image(&mut self, image: DynamicImage) {
        self.gray = Some(image.to_luma8());
        self.image = Some(image);
    }

    fn sources(&self) -> Result<(&DynamicImage, &GrayImage)> {
        match (&self.image, &self.gray) {
            (Some(image), Some(gray)) => Ok((image, gray)),
            _ => Err(AnalysisError::NoImageLoaded),
        }
    }

    pub fn execute(&self, command: AnalysisCommand) -> Result<StageOutput> {
        let (image, gray) = self.sources()?;

        let output = match command {
            AnalysisCommand::GradientEdges => {
                StageOutput::Image(GradientEdgeDetector::default().transform(gray)?)
            }
            AnalysisCommand::LaplacianEdges { variant } => {
                StageOutput::Image(LaplacianEdgeDetector::new(variant).transform(gray)?)
            }
            AnalysisCommand::OtsuThreshold => StageOutput::Image(OtsuThresholder.binarize(gray)),
            AnalysisCommand::PercentileThreshold { background_fraction } => {
                let thresholder = PercentileThresholder::new(background_fraction)?;
                StageOutput::Image(thresholder.segment(gray))
            }
            AnalysisCommand::CountObjects => {
                let binary = OtsuThresholder.binarize(gray);
                StageOutput::Count(ConnectedComponentCounter::default().count(&binary))
            }
            AnalysisCommand::ChainCode => {
                let binary = OtsuThresholder.binarize(gray);
                StageOutput::ChainCode(ContourTracer.trace(&binary))
            }
            AnalysisCommand::BoxFilter { size } => {
                StageOutput::Image(BoxFilterEngine::new(size).filter(image))
            }
            AnalysisCommand::Quantize => StageOutput::Image(IntensityQuantizer.quantize(gray)),
        };

        Ok(output)
    }
}

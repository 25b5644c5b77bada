pub mod builder;

use image::{DynamicImage, GrayImage};
use rayon::prelude::*;
use tracing::{debug, info, instrument};
use crate::{
    algorithms::{
        BoxFilterEngine, ConnectedComponentCounter, ContourTracer, GradientEdgeDetector,
        IntensityQuantizer, LaplacianEdgeDetector, OtsuThresholder, PercentileThresholder,
    },
    error::Result,
    traits::RasterTransform,
    types::{AnalysisReport, Stage, StageImage},
};

/// The full batch analysis run over one source image.
///
/// Every raster stage reads the shared source and allocates its own output,
/// so with `parallel` enabled they are fanned out over the rayon pool.
/// Object counting and contour tracing wait for the Otsu output.
pub struct Pipeline {
    gradient: GradientEdgeDetector,
    otsu: OtsuThresholder,
    laplacian: LaplacianEdgeDetector,
    percentile: PercentileThresholder,
    counter: ConnectedComponentCounter,
    tracer: ContourTracer,
    box_filters: Vec<BoxFilterEngine>,
    quantizer: IntensityQuantizer,
    parallel: bool,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        gradient: GradientEdgeDetector,
        otsu: OtsuThresholder,
        laplacian: LaplacianEdgeDetector,
        percentile: PercentileThresholder,
        counter: ConnectedComponentCounter,
        tracer: ContourTracer,
        box_filters: Vec<BoxFilterEngine>,
        quantizer: IntensityQuantizer,
        parallel: bool,
    ) -> Self {
        Self {
            gradient,
            otsu,
            laplacian,
            percentile,
            counter,
            tracer,
            box_filters,
            quantizer,
            parallel,
        }
    }

    /// Raster stages in driver order
    pub fn stages(&self) -> Vec<Stage> {
        let mut stages = vec![
            Stage::GradientEdges,
            Stage::OtsuThreshold,
            Stage::LaplacianEdges,
            Stage::PercentileThreshold,
        ];
        stages.extend(self.box_filters.iter().map(|filter| Stage::BoxFilter(filter.size)));
        stages.push(Stage::Quantize);
        stages
    }

    fn render(&self, stage: Stage, source: &DynamicImage, gray: &GrayImage) -> Result<GrayImage> {
        match stage {
            Stage::GradientEdges => self.gradient.transform(gray),
            Stage::OtsuThreshold => self.otsu.transform(gray),
            Stage::LaplacianEdges => self.laplacian.transform(gray),
            Stage::PercentileThreshold => self.percentile.transform(gray),
            Stage::BoxFilter(size) => Ok(BoxFilterEngine::new(size).filter(source)),
            Stage::Quantize => self.quantizer.transform(gray),
        }
    }

    /// Run every stage against `image`
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn process(&self, image: &DynamicImage) -> Result<AnalysisReport> {
        let gray = image.to_luma8();

        let render = |stage: &Stage| -> Result<StageImage> {
            let output = self.render(*stage, image, &gray)?;
            debug!(%stage, "stage complete");
            Ok(StageImage {
                stage: *stage,
                file_name: stage.file_name(),
                image: output,
            })
        };

        let stages = self.stages();
        let images: Vec<StageImage> = if self.parallel {
            stages.par_iter().map(render).collect::<Result<_>>()?
        } else {
            stages.iter().map(render).collect::<Result<_>>()?
        };

        let binary = images
            .iter()
            .find(|output| output.stage == Stage::OtsuThreshold)
            .map(|output| output.image.clone())
            .unwrap_or_else(|| self.otsu.binarize(&gray));

        let (object_count, chain_code) = if self.parallel {
            rayon::join(|| self.counter.count(&binary), || self.tracer.trace(&binary))
        } else {
            (self.counter.count(&binary), self.tracer.trace(&binary))
        };

        info!(object_count, chain_steps = chain_code.steps(), "analysis complete");

        Ok(AnalysisReport {
            image_width: image.width(),
            image_height: image.height(),
            images,
            object_count,
            chain_code,
        })
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "Pipeline: {} raster stages, background fraction {}, min object area {}, {}",
            self.stages().len(),
            self.percentile.background_fraction(),
            self.counter.min_area,
            if self.parallel { "parallel" } else { "sequential" }
        )
    }
}

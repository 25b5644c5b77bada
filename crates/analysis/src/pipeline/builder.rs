use crate::{
    algorithms::{
        BoxFilterEngine, ConnectedComponentCounter, ContourTracer, GradientEdgeDetector,
        IntensityQuantizer, LaplacianEdgeDetector, OtsuThresholder, PercentileThresholder,
    },
    error::Result,
    pipeline::Pipeline,
    types::LaplacianVariant,
};

/// Builder for configuring a [`Pipeline`] with a fluent API
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    background_fraction: f64,
    box_sizes: Vec<u32>,
    laplacian: LaplacianVariant,
    min_object_area: usize,
    parallel: bool,
}

impl PipelineBuilder {
    pub const DEFAULT_BOX_SIZES: [u32; 4] = [2, 3, 5, 7];

    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            background_fraction: PercentileThresholder::DEFAULT_BACKGROUND_FRACTION,
            box_sizes: Self::DEFAULT_BOX_SIZES.to_vec(),
            laplacian: LaplacianVariant::default(),
            min_object_area: ConnectedComponentCounter::DEFAULT_MIN_AREA,
            parallel: true,
        }
    }

    /// Fraction of darkest pixels that defines the percentile cut
    pub fn with_background_fraction(mut self, fraction: f64) -> Self {
        self.background_fraction = fraction;
        self
    }

    /// Window sizes for the box filter stages, one output per distinct size.
    ///
    /// Repeated sizes are dropped, keeping the first occurrence's position.
    pub fn with_box_sizes<I>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        self.box_sizes.clear();
        for size in sizes {
            if !self.box_sizes.contains(&size) {
                self.box_sizes.push(size);
            }
        }
        self
    }

    pub fn with_laplacian(mut self, variant: LaplacianVariant) -> Self {
        self.laplacian = variant;
        self
    }

    pub fn with_min_object_area(mut self, min_area: usize) -> Self {
        self.min_object_area = min_area;
        self
    }

    /// Run independent stages on the rayon pool
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the pipeline; fails if the background fraction is outside [0, 1]
    pub fn build(self) -> Result<Pipeline> {
        let percentile = PercentileThresholder::new(self.background_fraction)?;

        Ok(Pipeline::new(
            GradientEdgeDetector::default(),
            OtsuThresholder,
            LaplacianEdgeDetector::new(self.laplacian),
            percentile,
            ConnectedComponentCounter::new(self.min_object_area),
            ContourTracer,
            self.box_sizes.into_iter().map(BoxFilterEngine::new).collect(),
            IntensityQuantizer,
            self.parallel,
        ))
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AnalysisError, types::Stage};

    #[test]
    fn test_default_stage_order() {
        let pipeline = PipelineBuilder::new().build().expect("default pipeline builds");
        assert_eq!(
            pipeline.stages(),
            vec![
                Stage::GradientEdges,
                Stage::OtsuThreshold,
                Stage::LaplacianEdges,
                Stage::PercentileThreshold,
                Stage::BoxFilter(2),
                Stage::BoxFilter(3),
                Stage::BoxFilter(5),
                Stage::BoxFilter(7),
                Stage::Quantize,
            ]
        );
    }

    #[test]
    fn test_invalid_fraction_fails_build() {
        let result = PipelineBuilder::new().with_background_fraction(1.5).build();
        assert!(matches!(result, Err(AnalysisError::InvalidArgument(_))));
    }

    #[test]
    fn test_custom_box_sizes() {
        let pipeline = Pipeline::builder()
            .with_box_sizes([9])
            .parallel(false)
            .build()
            .expect("pipeline builds");
        assert!(pipeline.stages().contains(&Stage::BoxFilter(9)));
        assert!(!pipeline.stages().contains(&Stage::BoxFilter(3)));
        assert!(pipeline.info().contains("sequential"));
    }

    #[test]
    fn test_repeated_box_sizes_are_dropped() {
        let pipeline = Pipeline::builder()
            .with_box_sizes([5, 3, 5, 3, 9])
            .build()
            .expect("pipeline builds");
        let filters: Vec<Stage> = pipeline
            .stages()
            .into_iter()
            .filter(|stage| matches!(stage, Stage::BoxFilter(_)))
            .collect();
        assert_eq!(filters, vec![Stage::BoxFilter(5), Stage::BoxFilter(3), Stage::BoxFilter(9)]);
    }
}

use image::GrayImage;
use crate::error::Result;

/// Trait for stages that map a grayscale raster to a new raster of the same size
pub trait RasterTransform: Send + Sync {
    /// Produce a freshly allocated output; the input is never modified
    fn transform(&self, image: &GrayImage) -> Result<GrayImage>;
}

/// Apply a sequence of transforms, each one reading the previous output
pub fn chain(image: &GrayImage, stages: &[&dyn RasterTransform]) -> Result<GrayImage> {
    let mut processed = image.clone();
    for stage in stages {
        processed = stage.transform(&processed)?;
    }
    Ok(processed)
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("No image loaded")]
    NoImageLoaded,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn describe(error: &AnalysisError) -> &'static str {
        match error {
            AnalysisError::ImageLoad(_) => "image",
            AnalysisError::NoImageLoaded => "missing",
            AnalysisError::InvalidArgument(_) => "argument",
            AnalysisError::Io(_) => "io",
        }
    }

    #[test]
    fn test_every_variant_has_a_library_source() {
        let io: AnalysisError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(describe(&io), "io");
        assert_eq!(describe(&AnalysisError::NoImageLoaded), "missing");

        let fraction = crate::PercentileThresholder::new(2.0).unwrap_err();
        assert_eq!(describe(&fraction), "argument");

        let decode = crate::Analyzer::new().load_image_from_bytes(&[0u8; 4]).unwrap_err();
        assert_eq!(describe(&decode), "image");
    }
}

use std::{
    fs,
    path::{Path, PathBuf},
};

use image::{DynamicImage, GrayImage, ImageFormat};
use tracing::info;
use crate::{
    error::Result,
    types::{AnalysisReport, ChainCode},
};

/// Decode a source image; the format is detected from the file contents
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let image = image::ImageReader::open(path.as_ref())?
        .with_guessed_format()?
        .decode()?;
    info!(
        path = %path.as_ref().display(),
        width = image.width(),
        height = image.height(),
        "loaded source image"
    );
    Ok(image)
}

pub fn save_png<P: AsRef<Path>>(image: &GrayImage, path: P) -> Result<()> {
    image.save_with_format(path.as_ref(), ImageFormat::Png)?;
    Ok(())
}

/// Write the chain code digits, or the no-object sentinel
pub fn write_chain_code<P: AsRef<Path>>(chain_code: &ChainCode, path: P) -> Result<()> {
    fs::write(path, chain_code.to_string())?;
    Ok(())
}

impl AnalysisReport {
    /// Write every stage image and the chain code into `dir`.
    ///
    /// The first failure aborts the write; files already written stay.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(self.images.len() + 1);
        for output in &self.images {
            let path = dir.join(&output.file_name);
            save_png(&output.image, &path)?;
            info!(stage = %output.stage, path = %path.display(), "wrote stage image");
            written.push(path);
        }

        let chain_path = dir.join(Self::CHAIN_CODE_FILE_NAME);
        write_chain_code(&self.chain_code, &chain_path)?;
        info!(path = %chain_path.display(), "wrote chain code");
        written.push(chain_path);

        Ok(written)
    }
}

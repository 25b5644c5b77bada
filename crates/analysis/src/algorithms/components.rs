use image::GrayImage;
use crate::{
    algorithms::{morphology::MorphologyEngine, smoothing::window_mean},
    types::FOREGROUND,
};

const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, 0), (1, 0), (0, -1), (0, 1),
    (-1, -1), (-1, 1), (1, -1), (1, 1),
];

/// Flood-fill one 8-connected foreground region and return its area
fn flood(image: &GrayImage, visited: &mut [bool], start: (u32, u32)) -> usize {
    let (width, height) = image.dimensions();
    let mut stack = vec![start];
    let mut area = 0;

    while let Some((x, y)) = stack.pop() {
        let idx = (y * width + x) as usize;
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        area += 1;

        for (dx, dy) in NEIGHBOURS {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if !visited[(ny * width + nx) as usize] && image.get_pixel(nx, ny)[0] == FOREGROUND {
                stack.push((nx, ny));
            }
        }
    }

    area
}

/// Areas of the 8-connected foreground components in row-major discovery order.
///
/// Components with any pixel closer than `excluded_band` to an edge are
/// flooded first and left out of the result.
pub fn component_areas(image: &GrayImage, excluded_band: u32) -> Vec<usize> {
    let (width, height) = image.dimensions();
    let mut visited = vec![false; (width as usize) * (height as usize)];

    let in_band = |x: u32, y: u32| {
        x < excluded_band
            || y < excluded_band
            || x >= width.saturating_sub(excluded_band)
            || y >= height.saturating_sub(excluded_band)
    };

    if excluded_band > 0 {
        for (x, y, pixel) in image.enumerate_pixels() {
            if in_band(x, y) && pixel[0] == FOREGROUND && !visited[(y * width + x) as usize] {
                flood(image, &mut visited, (x, y));
            }
        }
    }

    let mut areas = Vec::new();
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[0] == FOREGROUND && !visited[(y * width + x) as usize] {
            areas.push(flood(image, &mut visited, (x, y)));
        }
    }
    areas
}

/// Number of 8-connected foreground components with at least `min_area` pixels
pub fn count_components(image: &GrayImage, min_area: usize) -> usize {
    component_areas(image, 0)
        .into_iter()
        .filter(|&area| area >= min_area)
        .count()
}

/// Object counter for Otsu-style binary rasters (0 = object).
///
/// The input is smoothed with a 3×3 mean, cleaned by the morphology
/// open/close sequence and then labelled. The morphology leaves its
/// unprocessed border band at 0, which reads as a frame-shaped object; the
/// component holding that band is discarded before counting.
#[derive(Debug, Clone)]
pub struct ConnectedComponentCounter {
    pub min_area: usize,
    morphology: MorphologyEngine,
}

impl ConnectedComponentCounter {
    pub const DEFAULT_MIN_AREA: usize = 10;
    pub const SMOOTHING_WINDOW: u32 = 3;

    pub fn new(min_area: usize) -> Self {
        Self { min_area, morphology: MorphologyEngine }
    }

    /// Smoothing followed by the morphological cleanup
    pub fn preprocess(&self, binary: &GrayImage) -> GrayImage {
        let (width, height) = binary.dimensions();
        let smoothed = window_mean(width, height, Self::SMOOTHING_WINDOW, |x, y| {
            binary.get_pixel(x, y)[0]
        });
        self.morphology.clean(&smoothed)
    }

    pub fn count(&self, binary: &GrayImage) -> usize {
        let cleaned = self.preprocess(binary);
        component_areas(&cleaned, MorphologyEngine::OFFSET)
            .into_iter()
            .filter(|&area| area >= self.min_area)
            .count()
    }
}

impl Default for ConnectedComponentCounter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_AREA)
    }
}

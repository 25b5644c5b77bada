use image::{GenericImageView, GrayImage, Luma, Pixel};

/// Mean of a clipped `size`×`size` window around every pixel.
///
/// The window spans `-size/2..=size/2` on both axes, so an even size uses
/// the next odd window. Out-of-bounds samples are skipped and the divisor is
/// the number of samples actually read.
pub(crate) fn window_mean<F>(width: u32, height: u32, size: u32, sample: F) -> GrayImage
where
    F: Fn(u32, u32) -> u8,
{
    let half = (size / 2) as i64;
    GrayImage::from_fn(width, height, |x, y| {
        let mut sum = 0u32;
        let mut count = 0u32;
        for j in -half..=half {
            for i in -half..=half {
                let nx = x as i64 + i;
                let ny = y as i64 + j;
                if nx >= 0 && ny >= 0 && nx < width as i64 && ny < height as i64 {
                    sum += sample(nx as u32, ny as u32) as u32;
                    count += 1;
                }
            }
        }
        Luma([(sum / count) as u8])
    })
}

/// Averaging filter over the red-derived luminance of colour samples.
///
/// Each sample contributes `(r + r + r) / 3` in integer arithmetic, which
/// is the red channel rather than a weighted grayscale conversion. Red is
/// premultiplied by alpha first, so transparent samples read as black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxFilterEngine {
    pub size: u32,
}

impl BoxFilterEngine {
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    #[inline]
    pub fn luminance<P: Pixel<Subpixel = u8>>(pixel: &P) -> u8 {
        let [red, _, _, alpha] = pixel.to_rgba().0;
        let red = red as u32 * alpha as u32 / 255;
        ((red + red + red) / 3) as u8
    }

    pub fn filter<I>(&self, image: &I) -> GrayImage
    where
        I: GenericImageView,
        I::Pixel: Pixel<Subpixel = u8>,
    {
        let (width, height) = image.dimensions();
        window_mean(width, height, self.size, |x, y| {
            Self::luminance(&image.get_pixel(x, y))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

    fn colourful() -> RgbImage {
        RgbImage::from_fn(6, 5, |x, y| Rgb([(x * 40 + y * 3) as u8, 250, (y * 50) as u8]))
    }

    #[test]
    fn test_size_one_returns_red_channel() {
        let image = colourful();
        let output = BoxFilterEngine::new(1).filter(&image);
        for (x, y, pixel) in output.enumerate_pixels() {
            assert_eq!(pixel[0], image.get_pixel(x, y)[0]);
        }
    }

    #[test]
    fn test_uniform_colour_is_preserved_for_every_size() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(9, 7, Rgb([90, 10, 200])));
        for size in [1, 2, 3, 5, 7] {
            let output = BoxFilterEngine::new(size).filter(&image);
            assert!(output.pixels().all(|p| p[0] == 90), "size {size}");
        }
    }

    #[test]
    fn test_window_is_clipped_at_corners() {
        let image = RgbImage::from_fn(3, 3, |x, y| Rgb([(y * 3 + x) as u8 * 10, 0, 0]));
        let output = BoxFilterEngine::new(3).filter(&image);
        // Corner (0, 0) averages 0, 10, 30, 40
        assert_eq!(output.get_pixel(0, 0)[0], 20);
        // Centre averages all nine: (0 + ... + 80) / 9
        assert_eq!(output.get_pixel(1, 1)[0], 40);
    }

    #[test]
    fn test_even_size_uses_next_odd_window() {
        let image = colourful();
        assert_eq!(
            BoxFilterEngine::new(2).filter(&image),
            BoxFilterEngine::new(3).filter(&image)
        );
    }

    #[test]
    fn test_red_is_premultiplied_by_alpha() {
        let image = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 { Rgba([200, 9, 9, 128]) } else { Rgba([200, 9, 9, 0]) }
        });
        assert_eq!(BoxFilterEngine::luminance(image.get_pixel(0, 0)), 100);
        assert_eq!(BoxFilterEngine::luminance(image.get_pixel(1, 0)), 0);
        assert_eq!(BoxFilterEngine::luminance(&Rgb([200u8, 9, 9])), 200);

        let output = BoxFilterEngine::new(1).filter(&DynamicImage::ImageRgba8(image));
        assert_eq!(output.get_pixel(0, 0)[0], 100);
        assert_eq!(output.get_pixel(1, 0)[0], 0);
    }

    #[test]
    fn test_luma_input_is_accepted() {
        let image = GrayImage::from_pixel(4, 4, Luma([123u8]));
        let output = BoxFilterEngine::new(5).filter(&image);
        assert!(output.pixels().all(|p| p[0] == 123));
    }
}

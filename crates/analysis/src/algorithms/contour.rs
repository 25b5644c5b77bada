use image::GrayImage;
use crate::types::{ChainCode, FOREGROUND};

/// Freeman directions, clockwise from "right" with y growing downwards
pub const DIRECTIONS: [(i64, i64); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Greedy Freeman chain-code walk from the first foreground pixel.
///
/// Each step scans the eight directions starting at the reverse of the last
/// move and takes the first unvisited foreground neighbour. The walk stops
/// as soon as no such neighbour exists, so it can end before the boundary
/// closes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContourTracer;

impl ContourTracer {
    /// First foreground pixel in row-major order
    pub fn start_point(image: &GrayImage) -> Option<(u32, u32)> {
        image
            .enumerate_pixels()
            .find(|(_, _, pixel)| pixel[0] == FOREGROUND)
            .map(|(x, y, _)| (x, y))
    }

    pub fn trace(&self, image: &GrayImage) -> ChainCode {
        let Some((mut x, mut y)) = Self::start_point(image) else {
            return ChainCode::NoObject;
        };

        let (width, height) = image.dimensions();
        let mut visited = vec![false; (width as usize) * (height as usize)];
        visited[(y * width + x) as usize] = true;

        let mut chain = Vec::new();
        let mut prev_dir = 0usize;

        loop {
            let next = (0..8).map(|i| (prev_dir + i) % 8).find_map(|dir| {
                let (dx, dy) = DIRECTIONS[dir];
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                    return None;
                }
                let (nx, ny) = (nx as u32, ny as u32);
                let open = !visited[(ny * width + nx) as usize]
                    && image.get_pixel(nx, ny)[0] == FOREGROUND;
                open.then_some((dir, nx, ny))
            });

            let Some((dir, nx, ny)) = next else {
                break;
            };

            chain.push(dir as u8);
            visited[(ny * width + nx) as usize] = true;
            (x, y) = (nx, ny);
            prev_dir = (dir + 4) % 8;
        }

        ChainCode::Found(chain)
    }
}

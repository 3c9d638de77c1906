//! Connected-blob extraction over binary masks.
//!
//! A blob is one 8-connected region of set pixels, summarized by its area,
//! bounding box, and boundary pixels. Blobs are discovered in raster-scan
//! order (top-to-bottom, left-to-right), which makes the largest-blob
//! tie-break deterministic: when two blobs share maximal area, the first
//! one discovered wins.

use std::collections::VecDeque;

use crate::detect::mask::Mask;
use crate::PixelPoint;

/// One connected region of a mask.
#[derive(Clone, Debug)]
pub struct Blob {
    /// Pixel count of the region.
    pub area: u32,
    /// Inclusive bounding box (top-left, bottom-right).
    pub bounds: (PixelPoint, PixelPoint),
    /// Pixels on the outer edge of the region: set pixels with at least one
    /// unset (or out-of-image) 4-neighbor.
    pub boundary: Vec<PixelPoint>,
}

/// Find every 8-connected blob in the mask, in raster-scan discovery order.
pub fn find_blobs(mask: &Mask) -> Vec<Blob> {
    let w = mask.width() as i64;
    let h = mask.height() as i64;
    let mut visited = vec![false; (w * h) as usize];
    let mut blobs = Vec::new();

    for start_y in 0..h {
        for start_x in 0..w {
            let start_idx = (start_y * w + start_x) as usize;
            if visited[start_idx] || !mask.is_set(start_x as u32, start_y as u32) {
                continue;
            }

            let mut area = 0u32;
            let mut min = PixelPoint::new(start_x as u32, start_y as u32);
            let mut max = min;
            let mut boundary = Vec::new();
            let mut queue = VecDeque::new();
            visited[start_idx] = true;
            queue.push_back((start_x, start_y));

            while let Some((x, y)) = queue.pop_front() {
                area += 1;
                min.x = min.x.min(x as u32);
                min.y = min.y.min(y as u32);
                max.x = max.x.max(x as u32);
                max.y = max.y.max(y as u32);

                if is_boundary(mask, x, y, w, h) {
                    boundary.push(PixelPoint::new(x as u32, y as u32));
                }

                for dy in -1i64..=1 {
                    for dx in -1i64..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = x + dx;
                        let ny = y + dy;
                        if nx < 0 || nx >= w || ny < 0 || ny >= h {
                            continue;
                        }
                        let idx = (ny * w + nx) as usize;
                        if !visited[idx] && mask.is_set(nx as u32, ny as u32) {
                            visited[idx] = true;
                            queue.push_back((nx, ny));
                        }
                    }
                }
            }

            blobs.push(Blob {
                area,
                bounds: (min, max),
                boundary,
            });
        }
    }

    blobs
}

fn is_boundary(mask: &Mask, x: i64, y: i64, w: i64, h: i64) -> bool {
    for (dx, dy) in [(-1i64, 0i64), (1, 0), (0, -1), (0, 1)] {
        let nx = x + dx;
        let ny = y + dy;
        if nx < 0 || nx >= w || ny < 0 || ny >= h {
            return true;
        }
        if !mask.is_set(nx as u32, ny as u32) {
            return true;
        }
    }
    false
}

/// The blob with maximum area. Ties go to the earliest blob in discovery
/// order (strictly-greater comparison keeps the first maximum).
pub fn largest_blob(blobs: &[Blob]) -> Option<&Blob> {
    let mut best: Option<&Blob> = None;
    for blob in blobs {
        if best.map_or(true, |b| blob.area > b.area) {
            best = Some(blob);
        }
    }
    best
}

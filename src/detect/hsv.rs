//! RGB to HSV conversion and in-range masking.
//!
//! HSV uses the 8-bit OpenCV convention: hue is halved into 0..=180 so it
//! fits a byte, saturation and value span 0..=255. The static detection
//! ranges in `ColorClass` are expressed on the same scale.

use crate::detect::mask::Mask;
use crate::HsvRange;

/// Convert one RGB triple to HSV (H 0..=180, S/V 0..=255).
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [u8; 3] {
    let r = rgb[0] as f32;
    let g = rgb[1] as f32;
    let b = rgb[2] as f32;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max > 0.0 { delta / max * 255.0 } else { 0.0 };

    let h_deg = if delta == 0.0 {
        0.0
    } else if max == r {
        let h = 60.0 * (g - b) / delta;
        if h < 0.0 {
            h + 360.0
        } else {
            h
        }
    } else if max == g {
        60.0 * (b - r) / delta + 120.0
    } else {
        60.0 * (r - g) / delta + 240.0
    };

    let h = (h_deg / 2.0).round() as u16 % 180;
    [h as u8, s.round().clamp(0.0, 255.0) as u8, v.round() as u8]
}

/// Convert a packed RGB24 buffer to a packed HSV buffer of the same shape.
pub fn rgb_to_hsv_buffer(pixels: &[u8]) -> Vec<u8> {
    let mut hsv = vec![0u8; pixels.len()];
    for (src, dst) in pixels.chunks_exact(3).zip(hsv.chunks_exact_mut(3)) {
        let converted = rgb_to_hsv([src[0], src[1], src[2]]);
        dst.copy_from_slice(&converted);
    }
    hsv
}

/// Binary mask of the pixels whose HSV values fall inside `range`.
pub fn mask_in_range(hsv: &[u8], width: u32, height: u32, range: HsvRange) -> Mask {
    let mut mask = Mask::new(width, height);
    for (i, pixel) in hsv.chunks_exact(3).enumerate() {
        if range.contains([pixel[0], pixel[1], pixel[2]]) {
            mask.set_index(i);
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColorClass;

    #[test]
    fn primary_colors_convert() {
        // Pure blue: 240 degrees -> 120 half-degrees.
        assert_eq!(rgb_to_hsv([0, 0, 255]), [120, 255, 255]);
        // Pure green: 120 degrees -> 60.
        assert_eq!(rgb_to_hsv([0, 255, 0]), [60, 255, 255]);
        // Pure red: 0 degrees.
        assert_eq!(rgb_to_hsv([255, 0, 0]), [0, 255, 255]);
    }

    #[test]
    fn gray_has_zero_saturation() {
        let [_, s, v] = rgb_to_hsv([60, 60, 60]);
        assert_eq!(s, 0);
        assert_eq!(v, 60);
    }

    #[test]
    fn black_is_zeroed() {
        assert_eq!(rgb_to_hsv([0, 0, 0]), [0, 0, 0]);
    }

    #[test]
    fn orange_maps_into_detection_range() {
        let hsv = rgb_to_hsv([255, 165, 0]);
        assert!(ColorClass::Orange.hsv_range().contains(hsv));
    }

    #[test]
    fn mask_selects_matching_pixels() {
        // 2x1 frame: saturated blue next to gray.
        let rgb = [0u8, 0, 255, 60, 60, 60];
        let hsv = rgb_to_hsv_buffer(&rgb);
        let mask = mask_in_range(&hsv, 2, 1, ColorClass::Blue.hsv_range());
        assert!(mask.is_set(0, 0));
        assert!(!mask.is_set(1, 0));
        assert_eq!(mask.count_set(), 1);
    }
}

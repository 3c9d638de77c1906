//! Branding logo loading.
//!
//! Logos are optional image files resized to a fixed header slot. Any load
//! failure falls back to a blank white placeholder so the panel always
//! renders.

use std::path::Path;

use image::imageops::FilterType;

pub const LOGO_WIDTH: u32 = 80;
pub const LOGO_HEIGHT: u32 = 50;

/// Load and resize a logo, or produce the white placeholder.
pub fn load_logo(path: Option<&Path>) -> Vec<u8> {
    let Some(path) = path else {
        return placeholder();
    };
    match image::open(path) {
        Ok(decoded) => decoded
            .resize_exact(LOGO_WIDTH, LOGO_HEIGHT, FilterType::Triangle)
            .to_rgb8()
            .into_raw(),
        Err(e) => {
            log::warn!("failed to load logo {}: {}", path.display(), e);
            placeholder()
        }
    }
}

fn placeholder() -> Vec<u8> {
    vec![255u8; (LOGO_WIDTH * LOGO_HEIGHT * 3) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_logo_falls_back_to_placeholder() {
        let logo = load_logo(Some(Path::new("/nonexistent/logo.png")));
        assert_eq!(logo.len(), (LOGO_WIDTH * LOGO_HEIGHT * 3) as usize);
        assert!(logo.iter().all(|&b| b == 255));
    }

    #[test]
    fn no_logo_configured_is_a_placeholder() {
        assert_eq!(load_logo(None), placeholder());
    }
}

//! Panel renderer.
//!
//! Composites the header (logos + title), the ruler, the indicator circles,
//! and the readout texts into one RGB24 buffer per frame.

use crate::config::PanelSettings;
use crate::detect::FrameDetections;
use crate::font;
use crate::panel::indicator::{canvas_y, BreathingReadout};
use crate::panel::layout::{
    PanelLayout, AVERAGE_TEXT_COLOR, AVERAGE_TEXT_X, AVERAGE_TEXT_Y, BACKGROUND_COLOR,
    INDICATOR_EMPTY_FILL, INDICATOR_OUTLINE, INDICATOR_RADIUS, INDICATOR_XS, PERCENT_TEXT_XS,
    PERCENT_TEXT_Y, RULER_LINE_WIDTH, RULER_TICK_LENGTH, RULER_TICK_WIDTH, RULER_X, TEXT_COLOR,
};
use crate::panel::logo::{load_logo, LOGO_HEIGHT, LOGO_WIDTH};

const TITLE: &str = "BREATHING TRAINER";
const TITLE_SCALE: u32 = 2;
const AVERAGE_SCALE: u32 = 2;
const LOGO_MARGIN: u32 = 5;

pub struct PanelRenderer {
    layout: PanelLayout,
    logo_left: Vec<u8>,
    logo_right: Vec<u8>,
}

impl PanelRenderer {
    /// Build a renderer, loading the configured logos (placeholders on
    /// failure).
    pub fn new(settings: &PanelSettings) -> Self {
        Self {
            layout: PanelLayout::default(),
            logo_left: load_logo(settings.logo_left.as_deref()),
            logo_right: load_logo(settings.logo_right.as_deref()),
        }
    }

    pub fn layout(&self) -> PanelLayout {
        self.layout
    }

    /// Render one frame of the panel.
    pub fn render(
        &self,
        detections: &FrameDetections,
        readout: &BreathingReadout,
        frame_height: u32,
    ) -> Vec<u8> {
        let w = self.layout.width;
        let h = self.layout.height;
        let header = self.layout.header_height;
        let canvas_h = self.layout.canvas_height();

        let mut buffer = Vec::with_capacity((w * h * 3) as usize);
        for _ in 0..w * h {
            buffer.extend_from_slice(&BACKGROUND_COLOR);
        }

        self.draw_header(&mut buffer);
        self.draw_ruler(&mut buffer);

        // Indicator circles, bottom-parked when the ball is absent.
        for (class, sighting) in detections.iter() {
            let cx = INDICATOR_XS[class.index()] as i64;
            let cy = match sighting {
                Some(s) => header as i64 + canvas_y(s.center.y, frame_height, canvas_h) as i64,
                None => (header + canvas_h) as i64,
            };
            let fill = match sighting {
                Some(_) => class.draw_color(),
                None => INDICATOR_EMPTY_FILL,
            };
            fill_disc(&mut buffer, w, h, cx, cy, INDICATOR_RADIUS, class.draw_color());
            fill_disc(
                &mut buffer,
                w,
                h,
                cx,
                cy,
                INDICATOR_RADIUS - INDICATOR_OUTLINE,
                fill,
            );
        }

        // Per-ball percentages and the average.
        for class in crate::ColorClass::ALL {
            let text = format!("{}: {}%", class.label(), readout.percent(class));
            draw_centered_text(
                &mut buffer,
                w,
                h,
                PERCENT_TEXT_XS[class.index()] as i64,
                (header + PERCENT_TEXT_Y) as i64,
                &text,
                TEXT_COLOR,
                1,
            );
        }
        let average = format!("BREATHING AVG: {}%", readout.average());
        draw_centered_text(
            &mut buffer,
            w,
            h,
            AVERAGE_TEXT_X as i64,
            (header + AVERAGE_TEXT_Y) as i64,
            &average,
            AVERAGE_TEXT_COLOR,
            AVERAGE_SCALE,
        );

        buffer
    }

    fn draw_header(&self, buffer: &mut Vec<u8>) {
        let w = self.layout.width;
        let h = self.layout.height;
        let header = self.layout.header_height;

        let logo_y = (header - LOGO_HEIGHT) as i64 / 2;
        blit_rgb(
            buffer,
            w,
            h,
            LOGO_MARGIN as i64,
            logo_y,
            &self.logo_left,
            LOGO_WIDTH,
            LOGO_HEIGHT,
        );
        blit_rgb(
            buffer,
            w,
            h,
            (w - LOGO_WIDTH - LOGO_MARGIN) as i64,
            logo_y,
            &self.logo_right,
            LOGO_WIDTH,
            LOGO_HEIGHT,
        );

        let title_y = (header as i64 - (font::GLYPH_HEIGHT * TITLE_SCALE) as i64) / 2;
        draw_centered_text(
            buffer,
            w,
            h,
            w as i64 / 2,
            title_y,
            TITLE,
            TEXT_COLOR,
            TITLE_SCALE,
        );
    }

    fn draw_ruler(&self, buffer: &mut Vec<u8>) {
        let w = self.layout.width;
        let h = self.layout.height;
        let header = self.layout.header_height as i64;
        let ruler = self.layout.ruler();

        // Main vertical line, centered on RULER_X.
        fill_rect(
            buffer,
            w,
            h,
            RULER_X as i64 - RULER_LINE_WIDTH as i64 / 2,
            header + ruler.top as i64,
            RULER_LINE_WIDTH,
            ruler.effective_height(),
            TEXT_COLOR,
        );

        for (value, y) in ruler.ticks() {
            let tick_y = header + y as i64 - RULER_TICK_WIDTH as i64 / 2;
            fill_rect(
                buffer,
                w,
                h,
                RULER_X as i64,
                tick_y,
                RULER_TICK_LENGTH,
                RULER_TICK_WIDTH,
                TEXT_COLOR,
            );
            let label = value.to_string();
            draw_centered_text(
                buffer,
                w,
                h,
                RULER_X as i64 - 25,
                header + y as i64 - font::GLYPH_HEIGHT as i64 / 2,
                &label,
                TEXT_COLOR,
                1,
            );
        }
    }
}

fn fill_rect(
    buffer: &mut [u8],
    width: u32,
    height: u32,
    x: i64,
    y: i64,
    rect_w: u32,
    rect_h: u32,
    color: [u8; 3],
) {
    for dy in 0..rect_h as i64 {
        for dx in 0..rect_w as i64 {
            font::put_pixel(buffer, width, height, x + dx, y + dy, color);
        }
    }
}

fn fill_disc(
    buffer: &mut [u8],
    width: u32,
    height: u32,
    cx: i64,
    cy: i64,
    radius: u32,
    color: [u8; 3],
) {
    let r = radius as i64;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                font::put_pixel(buffer, width, height, cx + dx, cy + dy, color);
            }
        }
    }
}

fn blit_rgb(
    buffer: &mut [u8],
    width: u32,
    height: u32,
    x: i64,
    y: i64,
    src: &[u8],
    src_w: u32,
    src_h: u32,
) {
    for sy in 0..src_h as i64 {
        for sx in 0..src_w as i64 {
            let offset = ((sy * src_w as i64 + sx) * 3) as usize;
            let color = [src[offset], src[offset + 1], src[offset + 2]];
            font::put_pixel(buffer, width, height, x + sx, y + sy, color);
        }
    }
}

fn draw_centered_text(
    buffer: &mut [u8],
    width: u32,
    height: u32,
    center_x: i64,
    y: i64,
    text: &str,
    color: [u8; 3],
    scale: u32,
) {
    let x = center_x - font::text_width(text, scale) as i64 / 2;
    font::draw_text_line(buffer, width, height, x, y, text, color, scale);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PanelSettings;
    use crate::detect::BallSighting;
    use crate::panel::layout;
    use crate::{ColorClass, PixelPoint};

    fn renderer() -> PanelRenderer {
        PanelRenderer::new(&PanelSettings {
            logo_left: None,
            logo_right: None,
            output_dir: None,
            snapshot_every_frames: 30,
        })
    }

    fn pixel(buffer: &[u8], width: u32, x: u32, y: u32) -> [u8; 3] {
        let offset = ((y * width + x) * 3) as usize;
        [buffer[offset], buffer[offset + 1], buffer[offset + 2]]
    }

    #[test]
    fn render_fills_the_window() {
        let panel = renderer();
        let buffer = panel.render(&FrameDetections::default(), &BreathingReadout::default(), 480);
        assert_eq!(
            buffer.len(),
            (layout::WINDOW_WIDTH * layout::WINDOW_HEIGHT * 3) as usize
        );
        // A corner away from any element is background.
        assert_eq!(
            pixel(&buffer, layout::WINDOW_WIDTH, layout::WINDOW_WIDTH - 1, 300),
            BACKGROUND_COLOR
        );
    }

    #[test]
    fn absent_ball_parks_white_at_the_bottom() {
        let panel = renderer();
        let buffer = panel.render(&FrameDetections::default(), &BreathingReadout::default(), 480);
        // Just above the bottom edge, inside the first indicator circle.
        assert_eq!(
            pixel(
                &buffer,
                layout::WINDOW_WIDTH,
                INDICATOR_XS[0],
                layout::WINDOW_HEIGHT - 5
            ),
            INDICATOR_EMPTY_FILL
        );
    }

    #[test]
    fn detected_ball_is_drawn_in_its_color_at_its_height() {
        let panel = renderer();
        let mut detections = FrameDetections::default();
        // Mid-frame -> mid-canvas.
        detections.set(
            ColorClass::Orange,
            Some(BallSighting {
                center: PixelPoint::new(320, 240),
                radius: 18.0,
            }),
        );
        let readout = BreathingReadout::from_detections(&detections, 480);
        let buffer = panel.render(&detections, &readout, 480);
        let cy = layout::HEADER_HEIGHT + layout::CANVAS_HEIGHT / 2;
        assert_eq!(
            pixel(&buffer, layout::WINDOW_WIDTH, INDICATOR_XS[1], cy),
            ColorClass::Orange.draw_color()
        );
    }

    #[test]
    fn ruler_line_is_drawn() {
        let panel = renderer();
        let buffer = panel.render(&FrameDetections::default(), &BreathingReadout::default(), 480);
        let y = layout::HEADER_HEIGHT + layout::RULER_TOP_MARGIN + 10;
        assert_eq!(pixel(&buffer, layout::WINDOW_WIDTH, RULER_X, y), TEXT_COLOR);
    }
}

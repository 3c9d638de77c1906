//! The breathing-exercise indicator panel.
//!
//! A fixed-size render model: header with branding logos and a title, a
//! vertical 0..=100 ruler, one indicator circle per ball, per-ball
//! percentage texts, and the breathing average. The panel draws into a
//! plain RGB24 buffer; encoding or displaying that buffer is the caller's
//! concern.

pub mod indicator;
pub mod layout;
pub mod logo;
pub mod render;

pub use indicator::{breathing_average, canvas_y, percent_from_y, BreathingReadout};
pub use layout::{PanelLayout, RulerLayout};
pub use logo::load_logo;
pub use render::PanelRenderer;

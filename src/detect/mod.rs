//! HSV ball detection pipeline.
//!
//! The pipeline is a fixed composition with constant parameters: Gaussian
//! blur, HSV thresholding, morphological cleanup, largest-blob selection,
//! and a minimum enclosing circle with a radius noise floor. There is no
//! adaptive logic and no tracking across frames.

mod backend;
mod backends;
mod blur;
mod circle;
mod contour;
mod hsv;
mod mask;
mod result;

pub use backend::DetectorBackend;
pub use backends::{HsvBallBackend, StubBackend};
pub use blur::gaussian_blur;
pub use circle::{min_enclosing_circle, Circle};
pub use contour::{find_blobs, largest_blob, Blob};
pub use hsv::{mask_in_range, rgb_to_hsv, rgb_to_hsv_buffer};
pub use mask::Mask;
pub use result::{BallSighting, FrameDetections};

mod hsv_ball;
mod stub;

pub use hsv_ball::HsvBallBackend;
pub use stub::StubBackend;

//! Minimum enclosing circle (Welzl's algorithm).
//!
//! Runs over blob boundary pixels; interior pixels cannot change the
//! result. Points are shuffled first for the expected-linear running time.

use rand::seq::SliceRandom;

use crate::PixelPoint;

/// Tolerance for containment checks, in pixels.
const EPSILON: f32 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
}

impl Circle {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let dx = x - self.cx;
        let dy = y - self.cy;
        dx * dx + dy * dy <= (self.radius + EPSILON) * (self.radius + EPSILON)
    }

    /// Center rounded to the nearest integer pixel.
    pub fn center_pixel(&self) -> PixelPoint {
        PixelPoint::new(
            self.cx.round().max(0.0) as u32,
            self.cy.round().max(0.0) as u32,
        )
    }
}

/// Smallest circle containing every point. Returns `None` for an empty set.
pub fn min_enclosing_circle(points: &[PixelPoint]) -> Option<Circle> {
    if points.is_empty() {
        return None;
    }

    let mut pts: Vec<(f32, f32)> = points.iter().map(|p| (p.x as f32, p.y as f32)).collect();
    pts.shuffle(&mut rand::thread_rng());

    let mut circle = Circle {
        cx: pts[0].0,
        cy: pts[0].1,
        radius: 0.0,
    };

    for i in 1..pts.len() {
        let (px, py) = pts[i];
        if circle.contains(px, py) {
            continue;
        }
        circle = Circle {
            cx: px,
            cy: py,
            radius: 0.0,
        };
        for j in 0..i {
            let (qx, qy) = pts[j];
            if circle.contains(qx, qy) {
                continue;
            }
            circle = circle_from_two((px, py), (qx, qy));
            for k in 0..j {
                let (rx, ry) = pts[k];
                if !circle.contains(rx, ry) {
                    circle = circle_from_three((px, py), (qx, qy), (rx, ry));
                }
            }
        }
    }

    Some(circle)
}

fn circle_from_two(a: (f32, f32), b: (f32, f32)) -> Circle {
    let cx = (a.0 + b.0) / 2.0;
    let cy = (a.1 + b.1) / 2.0;
    let radius = ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt() / 2.0;
    Circle { cx, cy, radius }
}

/// Circumcircle of three points; falls back to the widest two-point circle
/// when the points are (near-)collinear.
fn circle_from_three(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> Circle {
    let d = 2.0 * (a.0 * (b.1 - c.1) + b.0 * (c.1 - a.1) + c.0 * (a.1 - b.1));
    if d.abs() < 1e-6 {
        let ab = circle_from_two(a, b);
        let ac = circle_from_two(a, c);
        let bc = circle_from_two(b, c);
        let mut widest = ab;
        if ac.radius > widest.radius {
            widest = ac;
        }
        if bc.radius > widest.radius {
            widest = bc;
        }
        return widest;
    }

    let a2 = a.0 * a.0 + a.1 * a.1;
    let b2 = b.0 * b.0 + b.1 * b.1;
    let c2 = c.0 * c.0 + c.1 * c.1;
    let cx = (a2 * (b.1 - c.1) + b2 * (c.1 - a.1) + c2 * (a.1 - b.1)) / d;
    let cy = (a2 * (c.0 - b.0) + b2 * (a.0 - c.0) + c2 * (b.0 - a.0)) / d;
    let radius = ((a.0 - cx).powi(2) + (a.1 - cy).powi(2)).sqrt();
    Circle { cx, cy, radius }
}

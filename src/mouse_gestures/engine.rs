use crate::mouse_gestures::event::Point;
use crate::mouse_gestures::sign::Sign;

pub const DEFAULT_TOLERANCE_PX: f32 = 10.0;

/// Reduces absolute pointer positions to direction signs.
///
/// The reference point only moves when a sign is emitted, so slow drifts
/// below the tolerance still add up against the last significant point.
#[derive(Debug)]
pub struct GestureTracer {
    tolerance_px: f32,
    anchor_point: Option<Point>,
}

impl Default for GestureTracer {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE_PX)
    }
}

impl GestureTracer {
    pub fn new(tolerance_px: f32) -> Self {
        Self {
            tolerance_px,
            anchor_point: None,
        }
    }

    pub fn begin(&mut self, point: Point) {
        self.anchor_point = Some(point);
    }

    pub fn observe(&mut self, point: Point) -> Option<Sign> {
        let anchor = match self.anchor_point {
            Some(anchor) => anchor,
            None => {
                self.anchor_point = Some(point);
                return None;
            }
        };

        let dx = point.x - anchor.x;
        let dy = point.y - anchor.y;
        let sign = direction_from_delta(dx, dy, self.tolerance_px)?;
        self.anchor_point = Some(point);
        Some(sign)
    }

    pub fn anchor(&self) -> Option<Point> {
        self.anchor_point
    }

    pub fn reset(&mut self) {
        self.anchor_point = None;
    }
}

/// Four-way direction for a delta whose larger axis exceeds `tolerance`.
/// Ties between the axes go to the vertical.
pub fn direction_from_delta(dx: f32, dy: f32, tolerance: f32) -> Option<Sign> {
    let abs_x = dx.abs();
    let abs_y = dy.abs();
    if abs_x <= tolerance && abs_y <= tolerance {
        return None;
    }

    if abs_x > abs_y {
        Some(if dx < 0.0 { Sign::Left } else { Sign::Right })
    } else {
        Some(if dy < 0.0 { Sign::Up } else { Sign::Down })
    }
}

//! Horizontal swipe detection

/// Minimum horizontal travel, in pixels
pub const SWIPE_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start: Option<(f64, f64)>,
}

impl SwipeTracker {
    pub fn start(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
    }

    /// Finish a touch; a swipe needs mostly-horizontal travel past the threshold
    pub fn end(&mut self, x: f64, y: f64) -> Option<SwipeDirection> {
        let (start_x, start_y) = self.start.take()?;
        let dx = start_x - x;
        let dy = start_y - y;
        if dx.abs() <= dy.abs() || dx.abs() <= SWIPE_THRESHOLD {
            return None;
        }
        Some(if dx > 0.0 {
            SwipeDirection::Left
        } else {
            SwipeDirection::Right
        })
    }
}

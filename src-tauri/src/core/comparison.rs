//! Split-position math for the before/after comparison view.

use serde::{Deserialize, Serialize};

/// Horizontal fraction (0-100) at which the "before" image is clipped over the "after" image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SplitPosition(f64);

impl Default for SplitPosition {
    fn default() -> Self {
        Self(50.0)
    }
}

impl SplitPosition {
    /// Create a position, clamping into [0, 100]. NaN maps to the default.
    pub fn new(percent: f64) -> Self {
        if percent.is_nan() {
            return Self::default();
        }
        Self(percent.clamp(0.0, 100.0))
    }

    /// Position for a pointer at `pointer_x` over a container starting at
    /// `container_left` with `container_width`.
    ///
    /// The offset is clamped to [0, width] before conversion.
    pub fn from_pointer(pointer_x: f64, container_left: f64, container_width: f64) -> Self {
        if container_width.is_nan() || container_width <= 0.0 {
            return Self(0.0);
        }
        let x = (pointer_x - container_left).clamp(0.0, container_width);
        Self::new(x / container_width * 100.0)
    }

    pub fn percent(self) -> f64 {
        self.0
    }
}

/// Pointer sample sent by the frontend while the slider is dragged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragSample {
    pub pointer_x: f64,
    pub container_left: f64,
    pub container_width: f64,
}

impl From<DragSample> for SplitPosition {
    fn from(sample: DragSample) -> Self {
        Self::from_pointer(sample.pointer_x, sample.container_left, sample.container_width)
    }
}

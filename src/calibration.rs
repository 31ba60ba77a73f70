//! Screen calibration and the sensor-to-screen projection.

use std::sync::Once;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A 2D width/height pair in one coordinate space's units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Parameters mapping sensor-space tip positions onto a target screen.
///
/// The sensor reports positions centered on its origin, with y growing
/// upward from a hover floor. Screens address pixels from the top-left
/// corner with y growing downward. A calibration captures the screen size,
/// the usable sensor interaction box, and the hover floor, and [`project`]
/// bridges the two conventions.
///
/// [`project`]: ScreenCalibration::project
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenCalibration {
    /// Target screen size in pixels.
    pub screen: Extent,

    /// Usable sensor interaction box in sensor units, centered on x = 0.
    pub sensor_frame: Extent,

    /// Sensor height below which input is ignored as hover floor.
    pub y_min: f64,
}

impl Default for ScreenCalibration {
    /// 1024x768 screen over a 400x400 sensor box with a 40 unit hover floor.
    fn default() -> Self {
        Self {
            screen: Extent::new(1024.0, 768.0),
            sensor_frame: Extent::new(400.0, 400.0),
            y_min: 40.0,
        }
    }
}

impl ScreenCalibration {
    pub fn new(screen: Extent, sensor_frame: Extent, y_min: f64) -> Self {
        Self {
            screen,
            sensor_frame,
            y_min,
        }
    }

    /// Map a sensor-space tip position onto screen coordinates.
    ///
    /// The x axis is recentered so the sensor origin lands mid-screen, the
    /// hover floor is subtracted from y, both axes are rescaled from sensor
    /// units to pixels, and the vertical axis is flipped into screen
    /// convention. The result is deliberately not clamped: positions outside
    /// the interaction box project outside the screen bounds, and callers
    /// decide how to treat them.
    pub fn project(&self, tip: Point2<f64>) -> Point2<f64> {
        if self.sensor_frame.width <= 0.0 || self.sensor_frame.height <= 0.0 {
            warn_degenerate_sensor_frame(self.sensor_frame);
        }

        let x = (tip.x + self.sensor_frame.width / 2.0) / self.sensor_frame.width
            * self.screen.width;
        let y = (tip.y - self.y_min) / self.sensor_frame.height * self.screen.height;

        Point2::new(x, self.screen.height - y)
    }
}

/// Warn the first time a projection runs against a zero or negative
/// interaction box. The projection still runs and stays deterministic;
/// frames arrive at sensor rate, so the warning fires once per process.
fn warn_degenerate_sensor_frame(sensor_frame: Extent) {
    static DEGENERATE_WARN: Once = Once::new();
    DEGENERATE_WARN.call_once(|| {
        tracing::warn!(
            width = sensor_frame.width,
            height = sensor_frame.height,
            "sensor interaction box is degenerate, screen projection will be distorted"
        );
    });
}

//! # Leapframe - Motion Sensor Frame Queries
//!
//! Typed frame snapshots and screen-space projection for Leap Motion style
//! hand tracking sensors.
//!
//! A sensor driver delivers frames as loose JSON; this crate parses them into
//! typed records once, then answers the per-tick questions gesture code asks:
//! finger counts and ids, primary tip coordinates, screen-space position,
//! average finger position.
//!
//! ## Features
//!
//! - Typed [`Frame`] / [`Finger`] / [`Hand`] records with wire-format parsing
//! - [`FrameState`] query surface over one frame snapshot
//! - Sensor-to-screen projection with per-instance [`ScreenCalibration`]
//! - Finger-set equality between states for gesture continuity checks
//!
//! ## Example
//!
//! ```rust
//! use leapframe::{Finger, Frame, FrameState};
//!
//! // One frame with a single finger resting on the hover floor.
//! let frame = Frame::new(1, 1_000_000.0)
//!     .with_fingers(vec![Finger::new(7, [0.0, 40.0, 0.0])]);
//! let state = FrameState::new(Some(frame));
//!
//! assert_eq!(state.fingers_count(), 1);
//! let screen = state.screen_position().unwrap();
//! assert_eq!(screen.x, 512.0);
//! assert_eq!(screen.y, 768.0);
//! ```

// Public modules
pub mod calibration;
pub mod frame;
pub mod frame_state;

// Re-exports for convenience
pub use calibration::{Extent, ScreenCalibration};
pub use frame::{Finger, Frame, Hand};
pub use frame_state::FrameState;

// Error types
pub use crate::error::{Error, Result};

mod error {
    use thiserror::Error;

    /// Errors that can occur in the leapframe library
    #[derive(Error, Debug)]
    pub enum Error {
        #[error("malformed frame record: {reason}")]
        MalformedFrame { reason: String },
    }

    /// Result type for leapframe operations
    pub type Result<T> = std::result::Result<T, Error>;
}

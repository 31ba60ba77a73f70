//! Typed sensor frame records and wire-format parsing.

use nalgebra::Point3;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// One sampled snapshot from the motion sensor.
///
/// This is the record an external sensor-driver layer supplies. On the wire
/// the sensor reports JSON with camelCase keys; fields a payload omits resolve
/// to their defaults here, at construction time, so downstream queries never
/// have to branch on missing data. Unknown wire fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Frame {
    /// Opaque frame identifier, monotonically increasing on real hardware.
    pub id: Option<i64>,

    /// Sensor clock at capture time, microseconds.
    pub timestamp: Option<f64>,

    /// Detected fingers in sensor reporting order.
    /// The first entry is treated as the primary finger.
    #[serde(deserialize_with = "null_as_default")]
    pub fingers: Vec<Finger>,

    /// Detected hands in sensor reporting order.
    #[serde(deserialize_with = "null_as_default")]
    pub hands: Vec<Hand>,
}

impl Frame {
    /// Create a frame with the given id and timestamp and no detections.
    pub fn new(id: i64, timestamp: f64) -> Self {
        Self {
            id: Some(id),
            timestamp: Some(timestamp),
            fingers: Vec::new(),
            hands: Vec::new(),
        }
    }

    /// Replace the finger sequence.
    pub fn with_fingers(mut self, fingers: Vec<Finger>) -> Self {
        self.fingers = fingers;
        self
    }

    /// Replace the hand sequence.
    pub fn with_hands(mut self, hands: Vec<Hand>) -> Self {
        self.hands = hands;
        self
    }

    /// Parse one wire payload as reported by the sensor driver.
    ///
    /// Omitted fields and explicit `null` sequences resolve to their
    /// defaults, so a bare `{}` is a valid (empty) frame. A payload that is
    /// structurally invalid, such as unparseable JSON or a finger record
    /// without its position arrays, is rejected as
    /// [`Error::MalformedFrame`].
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| Error::MalformedFrame {
            reason: e.to_string(),
        })
    }

    /// True when the sensor reported neither fingers nor hands.
    pub fn is_empty(&self) -> bool {
        self.fingers.is_empty() && self.hands.is_empty()
    }
}

/// Drivers report absent sequences either by omitting the key or by
/// sending an explicit `null`; both parse as empty.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A detected finger.
///
/// Both positions are 3D coordinates in sensor-space units, zero-centered
/// near the sensor origin with y growing upward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finger {
    /// Unique within a frame.
    pub id: i32,

    /// Raw tip position `[x, y, z]`.
    pub tip_position: [f64; 3],

    /// Jitter-filtered tip position, suited for averaging.
    pub stabilized_tip_position: [f64; 3],
}

impl Finger {
    /// Create a finger whose stabilized tip coincides with the raw tip.
    pub fn new(id: i32, tip_position: [f64; 3]) -> Self {
        Self {
            id,
            tip_position,
            stabilized_tip_position: tip_position,
        }
    }

    /// Set the jitter-filtered tip position.
    pub fn with_stabilized(mut self, stabilized_tip_position: [f64; 3]) -> Self {
        self.stabilized_tip_position = stabilized_tip_position;
        self
    }

    /// Raw tip position as a point.
    pub fn tip(&self) -> Point3<f64> {
        Point3::from(self.tip_position)
    }

    /// Jitter-filtered tip position as a point.
    pub fn stabilized_tip(&self) -> Point3<f64> {
        Point3::from(self.stabilized_tip_position)
    }
}

/// A detected hand.
///
/// Only its presence is consulted by the frame queries; the id and palm
/// position are carried through for downstream consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hand {
    /// Unique within a frame.
    pub id: i32,

    /// Palm center `[x, y, z]` in sensor-space units, when reported.
    #[serde(default)]
    pub palm_position: Option<[f64; 3]>,
}

impl Hand {
    /// Create a hand with no palm position.
    pub fn new(id: i32) -> Self {
        Self {
            id,
            palm_position: None,
        }
    }

    /// Set the palm position.
    pub fn with_palm(mut self, palm_position: [f64; 3]) -> Self {
        self.palm_position = Some(palm_position);
        self
    }

    /// Palm center as a point, when reported.
    pub fn palm(&self) -> Option<Point3<f64>> {
        self.palm_position.map(Point3::from)
    }
}

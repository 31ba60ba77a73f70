//! Point-in-time view over one sensor frame.

use std::collections::HashSet;

use nalgebra::{Point2, Point3, Vector3};

use crate::calibration::ScreenCalibration;
use crate::frame::{Finger, Frame, Hand};

/// A frame snapshot paired with the calibration used to project it.
///
/// `FrameState` wraps one [`Frame`] and answers the questions gesture
/// recognizers ask every tick, from finger counts to where the primary tip
/// lands on screen. It never mutates the frame; build a new state per
/// incoming frame.
///
/// All primary-finger queries return `None` on a frame with no fingers
/// rather than a placeholder coordinate, so callers can tell "no input"
/// from "input at the origin".
#[derive(Debug, Clone)]
pub struct FrameState {
    frame: Frame,
    calibration: ScreenCalibration,
}

impl FrameState {
    /// Wrap a frame with the default calibration.
    ///
    /// `None` behaves as an empty frame, matching what a sensor driver
    /// hands over before the first real capture arrives.
    pub fn new(frame: Option<Frame>) -> Self {
        Self::with_calibration(frame, ScreenCalibration::default())
    }

    /// Wrap a frame with an explicit calibration.
    pub fn with_calibration(frame: Option<Frame>, calibration: ScreenCalibration) -> Self {
        Self {
            frame: frame.unwrap_or_default(),
            calibration,
        }
    }

    /// Identifier of the underlying frame, when the sensor reported one.
    pub fn frame_id(&self) -> Option<i64> {
        self.frame.id
    }

    /// Sensor capture time in microseconds, when reported.
    pub fn timestamp(&self) -> Option<f64> {
        self.frame.timestamp
    }

    /// The calibration this state projects with.
    pub fn calibration(&self) -> &ScreenCalibration {
        &self.calibration
    }

    /// All fingers in sensor reporting order.
    pub fn fingers(&self) -> &[Finger] {
        &self.frame.fingers
    }

    /// All hands in sensor reporting order.
    pub fn hands(&self) -> &[Hand] {
        &self.frame.hands
    }

    pub fn fingers_count(&self) -> usize {
        self.frame.fingers.len()
    }

    pub fn hands_count(&self) -> usize {
        self.frame.hands.len()
    }

    /// Finger ids in sensor reporting order, duplicates preserved.
    pub fn finger_ids(&self) -> Vec<i32> {
        self.frame.fingers.iter().map(|f| f.id).collect()
    }

    /// The first reported finger, if any.
    pub fn primary_finger(&self) -> Option<&Finger> {
        self.frame.fingers.first()
    }

    /// Raw x of the primary finger tip.
    pub fn x(&self) -> Option<f64> {
        self.primary_finger().map(|f| f.tip_position[0])
    }

    /// Raw y of the primary finger tip.
    pub fn y(&self) -> Option<f64> {
        self.primary_finger().map(|f| f.tip_position[1])
    }

    /// Raw z of the primary finger tip.
    pub fn z(&self) -> Option<f64> {
        self.primary_finger().map(|f| f.tip_position[2])
    }

    /// The first reported hand, if any.
    pub fn hand(&self) -> Option<&Hand> {
        self.frame.hands.first()
    }

    /// Primary finger tip projected onto the sensor's vertical plane,
    /// discarding depth.
    pub fn position_2d(&self) -> Option<Point2<f64>> {
        self.primary_finger()
            .map(|f| Point2::new(f.tip_position[0], f.tip_position[1]))
    }

    /// Primary finger tip mapped onto screen coordinates.
    ///
    /// Uses this state's [`ScreenCalibration`]; the result is unclamped and
    /// may fall outside the screen bounds.
    pub fn screen_position(&self) -> Option<Point2<f64>> {
        self.position_2d().map(|tip| self.calibration.project(tip))
    }

    /// Mean of the stabilized tip positions across all fingers.
    ///
    /// Returns the origin for a frame with no fingers, so gesture code can
    /// feed the result into motion deltas without a missing-data branch.
    pub fn average_position(&self) -> Point3<f64> {
        if self.frame.fingers.is_empty() {
            return Point3::origin();
        }

        let sum: Vector3<f64> = self
            .frame
            .fingers
            .iter()
            .map(|f| Vector3::from(f.stabilized_tip_position))
            .sum();

        Point3::from(sum / self.frame.fingers.len() as f64)
    }
}

/// Two states are equal when they agree on which fingers are present.
///
/// Equality compares finger counts and the set of finger ids, nothing else:
/// frame id, timestamps, tip positions, hands, and calibration are all
/// ignored. This is the "same fingers, possibly moved" notion a gesture
/// recognizer needs to decide whether two snapshots belong to one gesture.
impl PartialEq for FrameState {
    fn eq(&self, other: &Self) -> bool {
        if self.fingers_count() != other.fingers_count() {
            return false;
        }

        let ours: HashSet<i32> = self.frame.fingers.iter().map(|f| f.id).collect();
        let theirs: HashSet<i32> = other.frame.fingers.iter().map(|f| f.id).collect();
        ours == theirs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::Extent;
    use approx::assert_relative_eq;

    fn finger(id: i32, tip: [f64; 3]) -> Finger {
        Finger::new(id, tip)
    }

    #[test]
    fn test_empty_state_queries() {
        let state = FrameState::new(None);

        assert_eq!(state.frame_id(), None);
        assert_eq!(state.timestamp(), None);
        assert_eq!(state.fingers_count(), 0);
        assert_eq!(state.hands_count(), 0);
        assert!(state.finger_ids().is_empty());
        assert!(state.primary_finger().is_none());
        assert!(state.x().is_none());
        assert!(state.y().is_none());
        assert!(state.z().is_none());
        assert!(state.hand().is_none());
        assert!(state.position_2d().is_none());
        assert!(state.screen_position().is_none());
    }

    #[test]
    fn test_calibration_accessor() {
        let default_state = FrameState::new(None);
        assert_eq!(*default_state.calibration(), ScreenCalibration::default());

        let calibration = ScreenCalibration::new(
            Extent::new(800.0, 600.0),
            Extent::new(200.0, 200.0),
            25.0,
        );
        let state = FrameState::with_calibration(None, calibration);
        assert_eq!(*state.calibration(), calibration);
    }

    #[test]
    fn test_counts_and_ids_preserve_order() {
        let frame = Frame::new(7, 100.0).with_fingers(vec![
            finger(5, [0.0, 50.0, 0.0]),
            finger(2, [10.0, 60.0, 5.0]),
            finger(9, [20.0, 70.0, -5.0]),
        ]);
        let state = FrameState::new(Some(frame));

        assert_eq!(state.fingers_count(), 3);
        assert_eq!(state.finger_ids(), vec![5, 2, 9]);

        let fingers = state.fingers();
        assert_eq!(fingers.len(), 3);
        assert_eq!(fingers[1].id, 2);
        assert_relative_eq!(fingers[2].tip_position[0], 20.0, epsilon = 1e-10);
    }

    #[test]
    fn test_primary_finger_components() {
        let frame = Frame::new(7, 100.0).with_fingers(vec![
            finger(1, [12.5, 200.0, -30.0]),
            finger(2, [99.0, 99.0, 99.0]),
        ]);
        let state = FrameState::new(Some(frame));

        assert_eq!(state.primary_finger().map(|f| f.id), Some(1));
        assert_relative_eq!(state.x().unwrap(), 12.5, epsilon = 1e-10);
        assert_relative_eq!(state.y().unwrap(), 200.0, epsilon = 1e-10);
        assert_relative_eq!(state.z().unwrap(), -30.0, epsilon = 1e-10);
    }

    #[test]
    fn test_first_hand() {
        let frame = Frame::new(7, 100.0).with_hands(vec![Hand::new(4), Hand::new(5)]);
        let state = FrameState::new(Some(frame));

        assert_eq!(state.hands_count(), 2);
        assert_eq!(state.hand().map(|h| h.id), Some(4));

        let hands = state.hands();
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[1].id, 5);
    }

    #[test]
    fn test_position_2d_discards_depth() {
        let frame = Frame::new(7, 100.0).with_fingers(vec![finger(1, [3.0, 4.0, -250.0])]);
        let state = FrameState::new(Some(frame));

        let p = state.position_2d().unwrap();
        assert_relative_eq!(p.x, 3.0, epsilon = 1e-10);
        assert_relative_eq!(p.y, 4.0, epsilon = 1e-10);
    }

    #[test]
    fn test_screen_position_uses_calibration() {
        let frame = Frame::new(7, 100.0).with_fingers(vec![finger(1, [0.0, 40.0, 0.0])]);
        let state = FrameState::new(Some(frame));

        let screen = state.screen_position().unwrap();
        assert_relative_eq!(screen.x, 512.0, epsilon = 1e-10);
        assert_relative_eq!(screen.y, 768.0, epsilon = 1e-10);
    }

    #[test]
    fn test_average_position() {
        let frame = Frame::new(7, 100.0).with_fingers(vec![
            finger(1, [2.0, 4.0, 6.0]),
            finger(2, [4.0, 8.0, 10.0]),
        ]);
        let state = FrameState::new(Some(frame));

        let avg = state.average_position();
        assert_relative_eq!(avg.x, 3.0, epsilon = 1e-10);
        assert_relative_eq!(avg.y, 6.0, epsilon = 1e-10);
        assert_relative_eq!(avg.z, 8.0, epsilon = 1e-10);
    }

    #[test]
    fn test_average_position_uses_stabilized_tips() {
        let frame = Frame::new(7, 100.0).with_fingers(vec![
            finger(1, [100.0, 100.0, 100.0]).with_stabilized([2.0, 4.0, 6.0])
        ]);
        let state = FrameState::new(Some(frame));

        let avg = state.average_position();
        assert_relative_eq!(avg.x, 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_average_position_empty_is_origin() {
        let state = FrameState::new(None);
        assert_eq!(state.average_position(), Point3::origin());
    }

    #[test]
    fn test_equality_reflexive() {
        // Holds with duplicate ids too, where the id set collapses.
        let state = FrameState::new(Some(Frame::new(1, 100.0).with_fingers(vec![
            finger(5, [0.0, 50.0, 0.0]),
            finger(5, [1.0, 51.0, 0.0]),
        ])));

        assert_eq!(state, state);
        assert_eq!(state, state.clone());
        assert_eq!(FrameState::new(None), FrameState::new(None));
    }

    #[test]
    fn test_equality_same_ids_any_order() {
        let a = FrameState::new(Some(Frame::new(1, 100.0).with_fingers(vec![
            finger(5, [0.0, 50.0, 0.0]),
            finger(2, [1.0, 60.0, 0.0]),
        ])));
        let b = FrameState::new(Some(Frame::new(2, 200.0).with_fingers(vec![
            finger(2, [9.0, 9.0, 9.0]),
            finger(5, [8.0, 8.0, 8.0]),
        ])));

        assert_eq!(a, b);
        assert_eq!(b, a);
    }

    #[test]
    fn test_equality_ignores_everything_but_fingers() {
        let calibration = ScreenCalibration::new(
            Extent::new(1920.0, 1080.0),
            Extent::new(500.0, 300.0),
            50.0,
        );
        let a = FrameState::new(Some(
            Frame::new(1, 100.0).with_fingers(vec![finger(5, [0.0, 50.0, 0.0])]),
        ));
        let b = FrameState::with_calibration(
            Some(
                Frame::new(999, 9_999.0)
                    .with_fingers(vec![finger(5, [70.0, 80.0, 90.0])])
                    .with_hands(vec![Hand::new(1)]),
            ),
            calibration,
        );

        assert_eq!(a, b);
    }

    #[test]
    fn test_inequality_on_count() {
        let a = FrameState::new(Some(
            Frame::new(1, 100.0).with_fingers(vec![finger(5, [0.0, 50.0, 0.0])]),
        ));
        let b = FrameState::new(Some(Frame::new(1, 100.0).with_fingers(vec![
            finger(5, [0.0, 50.0, 0.0]),
            finger(2, [0.0, 60.0, 0.0]),
        ])));

        assert_ne!(a, b);
    }

    #[test]
    fn test_inequality_on_ids() {
        let a = FrameState::new(Some(
            Frame::new(1, 100.0).with_fingers(vec![finger(5, [0.0, 50.0, 0.0])]),
        ));
        let b = FrameState::new(Some(
            Frame::new(1, 100.0).with_fingers(vec![finger(6, [0.0, 50.0, 0.0])]),
        ));

        assert_ne!(a, b);
    }

    #[test]
    fn test_equality_with_duplicate_ids() {
        // Same count, same id set, different multiplicity on each side.
        let a = FrameState::new(Some(Frame::new(1, 100.0).with_fingers(vec![
            finger(5, [0.0, 50.0, 0.0]),
            finger(5, [1.0, 50.0, 0.0]),
            finger(2, [2.0, 50.0, 0.0]),
        ])));
        let b = FrameState::new(Some(Frame::new(1, 100.0).with_fingers(vec![
            finger(5, [0.0, 50.0, 0.0]),
            finger(2, [1.0, 50.0, 0.0]),
            finger(2, [2.0, 50.0, 0.0]),
        ])));

        assert_eq!(a, b);
        assert_eq!(b, a);
    }

    #[test]
    fn test_empty_states_are_equal() {
        assert_eq!(FrameState::new(None), FrameState::new(Some(Frame::default())));
    }
}

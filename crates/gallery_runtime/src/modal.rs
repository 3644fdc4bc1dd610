//! Preview-modal gesture classification.

use crate::model::{SwipeGesture, SWIPE_DISMISS_THRESHOLD_PX};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Outcome of a completed touch gesture over the preview modal.
pub enum SwipeOutcome {
    /// The finger travelled down far enough to dismiss the preview.
    Dismiss,
    /// Too short, upward, or never moved.
    Ignore,
}

impl SwipeGesture {
    /// Starts tracking a gesture at `y`, discarding any previous end point.
    pub fn begin(y: i32) -> Self {
        Self {
            start_y: Some(y),
            end_y: None,
        }
    }

    /// Records the latest touch position.
    pub fn track(&mut self, y: i32) {
        self.end_y = Some(y);
    }

    /// `start_y - end_y`, when both ends were observed.
    pub fn delta(&self) -> Option<i32> {
        Some(self.start_y? - self.end_y?)
    }

    /// Classifies the finished gesture.
    pub fn outcome(&self) -> SwipeOutcome {
        match self.delta() {
            Some(delta) if delta < -SWIPE_DISMISS_THRESHOLD_PX => SwipeOutcome::Dismiss,
            _ => SwipeOutcome::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn swipe(start: i32, end: i32) -> SwipeGesture {
        let mut gesture = SwipeGesture::begin(start);
        gesture.track(end);
        gesture
    }

    #[test]
    fn downward_swipe_past_threshold_dismisses() {
        assert_eq!(swipe(100, 190).delta(), Some(-90));
        assert_eq!(swipe(100, 190).outcome(), SwipeOutcome::Dismiss);
    }

    #[test]
    fn short_or_upward_swipes_are_ignored() {
        assert_eq!(swipe(100, 150).outcome(), SwipeOutcome::Ignore);
        assert_eq!(swipe(100, 180).outcome(), SwipeOutcome::Ignore);
        assert_eq!(swipe(300, 100).outcome(), SwipeOutcome::Ignore);
    }

    #[test]
    fn tap_without_move_is_ignored() {
        let gesture = SwipeGesture::begin(40);
        assert_eq!(gesture.delta(), None);
        assert_eq!(gesture.outcome(), SwipeOutcome::Ignore);
    }

    #[test]
    fn track_overwrites_previous_position() {
        let mut gesture = swipe(0, 50);
        gesture.track(120);
        assert_eq!(gesture.delta(), Some(-120));
    }
}

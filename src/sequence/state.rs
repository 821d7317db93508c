//! Sequence state and the reducer that drives it
//!
//! Every change to the index pair goes through [`reduce`]. The guards that
//! turn a request into a no-op are match arms, so the whole transition table
//! reads in one place.

use serde::Serialize;

/// Direction of travel between two slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards higher indices (`next`)
    Forward,
    /// Towards lower indices (`previous`)
    Backward,
}

impl Direction {
    /// Direction implied by moving from `prev` to `active`
    ///
    /// Equal indices count as backward: nothing has moved forward yet.
    pub fn between(prev: usize, active: usize) -> Self {
        if active > prev {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Direction::Forward)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}

/// The three fields owned by the sequence controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SequenceState {
    /// Slot currently visible (or entering, mid-transition)
    pub active_index: usize,
    /// Slot that was active before the last accepted transition
    pub prev_active_index: usize,
    /// True from an accepted transition until completion is signaled
    pub is_animating: bool,
}

impl SequenceState {
    /// Starting state for a sequence of `slot_count` slots
    ///
    /// The start index is clamped to the last slot. A non-zero, in-bounds
    /// start seeds `prev_active_index` one below it so the first render
    /// already has a forward direction; anything else leaves both equal.
    pub fn initial(slot_count: usize, start_index: Option<usize>) -> Self {
        let last = slot_count.saturating_sub(1);

        match start_index {
            Some(start) if start > 0 && start <= last => Self {
                active_index: start,
                prev_active_index: start - 1,
                is_animating: false,
            },
            Some(start) => Self::resting_at(start.min(last)),
            None => Self::resting_at(0),
        }
    }

    /// A settled state with both indices on `index`
    pub fn resting_at(index: usize) -> Self {
        Self {
            active_index: index,
            prev_active_index: index,
            is_animating: false,
        }
    }

    /// Direction of the most recent transition
    pub fn direction(&self) -> Direction {
        Direction::between(self.prev_active_index, self.active_index)
    }

    fn moved_to(self, target: usize) -> Self {
        Self {
            active_index: target,
            prev_active_index: self.active_index,
            is_animating: true,
        }
    }
}

impl Default for SequenceState {
    fn default() -> Self {
        Self::resting_at(0)
    }
}

/// Requests the reducer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    GoPrevious,
    GoNext,
    AnimationFinished,
}

impl Action {
    /// Whether this action starts a transition when accepted
    pub fn is_navigation(&self) -> bool {
        matches!(self, Action::GoPrevious | Action::GoNext)
    }
}

/// Compute the state that follows `state` under `action`
///
/// Navigation is dropped (state returned unchanged) when fewer than two
/// slots exist, while a transition is in flight, or at either boundary.
/// `AnimationFinished` only clears the busy flag and is idempotent.
pub fn reduce(state: SequenceState, action: Action, slot_count: usize) -> SequenceState {
    match (action, state) {
        (Action::AnimationFinished, _) => SequenceState {
            is_animating: false,
            ..state
        },
        (_, _) if slot_count < 2 => state,
        (_, SequenceState { is_animating: true, .. }) => state,
        (Action::GoPrevious, SequenceState { active_index: 0, .. }) => state,
        (Action::GoPrevious, SequenceState { active_index, .. }) => state.moved_to(active_index - 1),
        (Action::GoNext, SequenceState { active_index, .. }) if active_index + 1 >= slot_count => {
            state
        }
        (Action::GoNext, SequenceState { active_index, .. }) => state.moved_to(active_index + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_defaults_to_first_slot() {
        assert_eq!(SequenceState::initial(3, None), SequenceState::resting_at(0));
        assert_eq!(SequenceState::initial(0, None), SequenceState::resting_at(0));
    }

    #[test]
    fn initial_seeds_previous_below_start() {
        let state = SequenceState::initial(4, Some(2));
        assert_eq!(state.active_index, 2);
        assert_eq!(state.prev_active_index, 1);
        assert!(!state.is_animating);
        assert_eq!(state.direction(), Direction::Forward);
    }

    #[test]
    fn initial_clamps_out_of_range_start() {
        let state = SequenceState::initial(3, Some(10));
        assert_eq!(state, SequenceState::resting_at(2));

        let empty = SequenceState::initial(0, Some(5));
        assert_eq!(empty, SequenceState::resting_at(0));
    }

    #[test]
    fn next_moves_forward_and_sets_busy() {
        let state = reduce(SequenceState::default(), Action::GoNext, 3);
        assert_eq!(
            state,
            SequenceState {
                active_index: 1,
                prev_active_index: 0,
                is_animating: true,
            }
        );
    }

    #[test]
    fn previous_at_first_slot_is_noop() {
        let start = SequenceState::default();
        let state = reduce(start, Action::GoPrevious, 3);
        assert_eq!(state, start);
        assert!(!state.is_animating);
    }

    #[test]
    fn next_at_last_slot_is_noop() {
        let start = SequenceState::resting_at(2);
        assert_eq!(reduce(start, Action::GoNext, 3), start);
    }

    #[test]
    fn navigation_dropped_while_animating() {
        let busy = reduce(SequenceState::resting_at(1), Action::GoNext, 4);
        assert!(busy.is_animating);
        assert_eq!(reduce(busy, Action::GoNext, 4), busy);
        assert_eq!(reduce(busy, Action::GoPrevious, 4), busy);
    }

    #[test]
    fn single_slot_never_moves() {
        let start = SequenceState::default();
        let mut state = start;
        for _ in 0..5 {
            state = reduce(state, Action::GoNext, 1);
            state = reduce(state, Action::GoPrevious, 1);
        }
        assert_eq!(state, start);
    }

    #[test]
    fn animation_finished_is_idempotent() {
        let busy = reduce(SequenceState::default(), Action::GoNext, 2);
        let once = reduce(busy, Action::AnimationFinished, 2);
        let twice = reduce(once, Action::AnimationFinished, 2);
        assert!(!once.is_animating);
        assert_eq!(once, twice);
    }

    #[test]
    fn previous_then_next_restores_active_index() {
        for slot_count in 2..8 {
            for start in 1..slot_count {
                let origin = SequenceState::resting_at(start);

                let back = reduce(origin, Action::GoPrevious, slot_count);
                assert_eq!(back.active_index, start - 1);
                let settled = reduce(back, Action::AnimationFinished, slot_count);
                let forth = reduce(settled, Action::GoNext, slot_count);

                assert_eq!(forth.active_index, start, "slot_count={slot_count}");
                assert_eq!(forth.prev_active_index, start - 1);
            }
        }
    }

    #[test]
    fn direction_follows_index_order() {
        assert_eq!(Direction::between(0, 1), Direction::Forward);
        assert_eq!(Direction::between(2, 1), Direction::Backward);
        assert_eq!(Direction::between(1, 1), Direction::Backward);
    }
}

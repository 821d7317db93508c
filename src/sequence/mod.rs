//! Sequence controller - owns which slot is active
//!
//! The controller is the only writer of [`SequenceState`]. Presenters read a
//! [`SequenceSnapshot`] each render and report completion back through the
//! [`CompletionSink`] trait.
//!
//! ```text
//!   previous()/next()          animation_finished()
//!         │                            ▲
//!         ▼                            │ (once per animated element)
//!   ┌──────────────┐  snapshot   ┌─────┴──────┐
//!   │  Controller  │ ──────────▶ │ Presenters │
//!   └──────────────┘             └────────────┘
//! ```

mod state;

pub use state::{reduce, Action, Direction, SequenceState};

use serde::Serialize;
use std::fmt;

/// Summary of a finished transition, handed to the completion callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionRecord {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
}

/// Callback invoked once per logical transition
pub type CompletionCallback = Box<dyn FnMut(TransitionRecord)>;

/// Read-only view of the controller published to presenters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SequenceSnapshot {
    pub active_index: usize,
    pub prev_active_index: usize,
    pub is_animating: bool,
    pub slot_count: usize,
}

impl SequenceSnapshot {
    pub fn state(&self) -> SequenceState {
        SequenceState {
            active_index: self.active_index,
            prev_active_index: self.prev_active_index,
            is_animating: self.is_animating,
        }
    }

    pub fn direction(&self) -> Direction {
        Direction::between(self.prev_active_index, self.active_index)
    }

    /// Whether `previous()` would be accepted right now
    pub fn can_go_previous(&self) -> bool {
        self.slot_count >= 2 && !self.is_animating && self.active_index > 0
    }

    /// Whether `next()` would be accepted right now
    pub fn can_go_next(&self) -> bool {
        self.slot_count >= 2 && !self.is_animating && self.active_index + 1 < self.slot_count
    }

    /// Whether moving from `self` to `next` warrants a re-render
    ///
    /// A change of `prev_active_index` alone never happens without a change
    /// of `active_index`, so it is not compared.
    pub fn should_update(&self, next: &SequenceSnapshot) -> bool {
        self.active_index != next.active_index
            || self.is_animating != next.is_animating
            || self.slot_count != next.slot_count
    }
}

/// Receiver of animation-completion notifications
///
/// Implemented by [`SequenceController`]; presenters only depend on this
/// trait so they can be driven against a recording sink in tests.
pub trait CompletionSink {
    fn animation_finished(&mut self);
}

/// Owns the sequence state and serializes every change through [`reduce`]
pub struct SequenceController {
    state: SequenceState,
    slot_count: usize,
    /// Completion signals seen since the current transition was accepted.
    /// `None` until the first transition, so stray signals never fire the callback.
    signals_since_transition: Option<u32>,
    on_complete: Option<CompletionCallback>,
}

impl fmt::Debug for SequenceController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceController")
            .field("state", &self.state)
            .field("slot_count", &self.slot_count)
            .field("signals_since_transition", &self.signals_since_transition)
            .field("has_callback", &self.on_complete.is_some())
            .finish()
    }
}

impl SequenceController {
    pub fn new(slot_count: usize, start_index: Option<usize>) -> Self {
        Self {
            state: SequenceState::initial(slot_count, start_index),
            slot_count,
            signals_since_transition: None,
            on_complete: None,
        }
    }

    /// Attach the "transition complete" callback (builder form)
    pub fn with_completion_callback(mut self, callback: impl FnMut(TransitionRecord) + 'static) -> Self {
        self.set_completion_callback(callback);
        self
    }

    pub fn set_completion_callback(&mut self, callback: impl FnMut(TransitionRecord) + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn snapshot(&self) -> SequenceSnapshot {
        SequenceSnapshot {
            active_index: self.state.active_index,
            prev_active_index: self.state.prev_active_index,
            is_animating: self.state.is_animating,
            slot_count: self.slot_count,
        }
    }

    /// Go to the previous slot. Returns whether the request was accepted.
    pub fn previous(&mut self) -> bool {
        self.dispatch(Action::GoPrevious)
    }

    /// Go to the next slot. Returns whether the request was accepted.
    pub fn next(&mut self) -> bool {
        self.dispatch(Action::GoNext)
    }

    /// Clear the busy flag. Safe to call any number of times.
    pub fn animation_finished(&mut self) {
        self.dispatch(Action::AnimationFinished);
    }

    /// Apply `action` and return whether the state changed
    pub fn dispatch(&mut self, action: Action) -> bool {
        let before = self.state;
        let after = reduce(before, action, self.slot_count);

        if action.is_navigation() {
            if after == before {
                tracing::trace!(
                    ?action,
                    active = before.active_index,
                    animating = before.is_animating,
                    slot_count = self.slot_count,
                    "Navigation request dropped"
                );
            } else {
                self.signals_since_transition = Some(0);
                tracing::debug!(
                    from = after.prev_active_index,
                    to = after.active_index,
                    direction = after.direction().as_str(),
                    "Transition accepted"
                );
            }
        } else {
            self.record_completion_signal();
        }

        self.state = after;
        after != before
    }

    /// Update the slot count supplied by the caller
    ///
    /// If the active slot no longer exists, the sequence settles on the new
    /// last slot and any in-flight transition is abandoned.
    pub fn set_slot_count(&mut self, slot_count: usize) {
        self.slot_count = slot_count;

        if slot_count > 0 && self.state.active_index < slot_count {
            return;
        }
        if slot_count == 0 && self.state == SequenceState::resting_at(0) {
            return;
        }

        let clamped = slot_count.saturating_sub(1);
        tracing::warn!(
            active = self.state.active_index,
            slot_count,
            clamped,
            "Active slot out of range after slot count change"
        );
        self.state = SequenceState::resting_at(clamped);
        self.signals_since_transition = None;
    }

    fn record_completion_signal(&mut self) {
        let Some(count) = self.signals_since_transition.as_mut() else {
            tracing::trace!("Completion signal with no transition started");
            return;
        };

        *count += 1;
        if *count != 1 {
            tracing::trace!(count = *count, "Duplicate completion signal coalesced");
            return;
        }

        let record = TransitionRecord {
            from: self.state.prev_active_index,
            to: self.state.active_index,
            direction: self.state.direction(),
        };
        tracing::debug!(from = record.from, to = record.to, "Transition complete");

        if let Some(callback) = self.on_complete.as_mut() {
            callback(record);
        }
    }
}

impl CompletionSink for SequenceController {
    fn animation_finished(&mut self) {
        SequenceController::animation_finished(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_controller(
        slot_count: usize,
    ) -> (SequenceController, Rc<RefCell<Vec<TransitionRecord>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let controller = SequenceController::new(slot_count, None)
            .with_completion_callback(move |record| sink.borrow_mut().push(record));
        (controller, seen)
    }

    #[test]
    fn callback_fires_once_per_transition() {
        let (mut controller, seen) = recording_controller(3);

        assert!(controller.next());
        // Entering and exiting slot each report completion
        controller.animation_finished();
        controller.animation_finished();

        assert!(!controller.state().is_animating);
        assert_eq!(
            *seen.borrow(),
            vec![TransitionRecord {
                from: 0,
                to: 1,
                direction: Direction::Forward,
            }]
        );
    }

    #[test]
    fn counter_resets_for_each_transition() {
        let (mut controller, seen) = recording_controller(3);

        controller.next();
        controller.animation_finished();
        controller.animation_finished();
        controller.previous();
        controller.animation_finished();
        controller.animation_finished();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].direction, Direction::Backward);
        assert_eq!((seen[1].from, seen[1].to), (1, 0));
    }

    #[test]
    fn stray_signal_before_any_transition_is_silent() {
        let (mut controller, seen) = recording_controller(3);
        controller.animation_finished();
        assert!(seen.borrow().is_empty());
        assert_eq!(controller.state(), SequenceState::resting_at(0));
    }

    #[test]
    fn rejected_navigation_keeps_counter() {
        let (mut controller, seen) = recording_controller(2);
        controller.next();
        controller.animation_finished();

        // At the last slot: rejected, so the late duplicate still counts as a repeat
        assert!(!controller.next());
        controller.animation_finished();

        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn requests_while_animating_are_dropped() {
        let mut controller = SequenceController::new(5, Some(2));
        assert!(controller.next());
        let busy = controller.state();

        assert!(!controller.next());
        assert!(!controller.previous());
        assert_eq!(controller.state(), busy);
    }

    #[test]
    fn single_slot_is_permanently_idle() {
        let mut controller = SequenceController::new(1, None);
        for _ in 0..10 {
            assert!(!controller.next());
            assert!(!controller.previous());
        }
        assert_eq!(controller.state(), SequenceState::resting_at(0));
    }

    #[test]
    fn snapshot_reports_affordances() {
        let mut controller = SequenceController::new(2, None);
        let snapshot = controller.snapshot();
        assert!(!snapshot.can_go_previous());
        assert!(snapshot.can_go_next());

        controller.next();
        let busy = controller.snapshot();
        assert!(!busy.can_go_next());
        assert!(!busy.can_go_previous());
        assert!(snapshot.should_update(&busy));
    }

    #[test]
    fn should_update_ignores_identical_snapshots() {
        let controller = SequenceController::new(3, None);
        let snapshot = controller.snapshot();
        assert!(!snapshot.should_update(&controller.snapshot()));
    }

    #[test]
    fn shrinking_slot_count_clamps_active_slot() {
        let mut controller = SequenceController::new(4, Some(3));
        controller.set_slot_count(2);
        assert_eq!(controller.state(), SequenceState::resting_at(1));
        assert_eq!(controller.slot_count(), 2);
    }

    #[test]
    fn shrinking_mid_transition_abandons_it() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut controller = SequenceController::new(4, Some(3))
            .with_completion_callback(move |record| sink.borrow_mut().push(record));

        assert!(controller.previous());
        assert!(controller.state().is_animating);

        controller.set_slot_count(2);
        assert_eq!(controller.state(), SequenceState::resting_at(1));

        // Completion from the abandoned transition arrives late
        controller.animation_finished();
        assert!(seen.borrow().is_empty());

        // Busy flag is gone, so navigation works again
        assert!(controller.previous());
        controller.animation_finished();
        assert_eq!(
            *seen.borrow(),
            vec![TransitionRecord {
                from: 1,
                to: 0,
                direction: Direction::Backward,
            }]
        );
    }

    #[test]
    fn growing_slot_count_keeps_state() {
        let mut controller = SequenceController::new(2, Some(1));
        let before = controller.state();
        controller.set_slot_count(6);
        assert_eq!(controller.state(), before);
        assert!(controller.next());
    }
}

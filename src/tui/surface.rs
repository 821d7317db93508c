//! Element surface: the terminal stand-in for a document tree
//!
//! Tracks which classes each element carries, starts a motion when a token
//! with a motion rule is added, cancels it when the token goes away, and
//! reports finished motions as completion signals that bubble from the
//! animated element up through its ancestors.

use super::stylesheet::{Motion, Stylesheet};
use crate::presenter::{AnimationEndSignal, ClassList, ElementId};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// A motion in progress on one element
#[derive(Debug, Clone)]
struct RunningMotion {
    token: String,
    motion: Motion,
    started: Instant,
    duration: Duration,
}

impl RunningMotion {
    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

#[derive(Debug, Default)]
struct ElementState {
    parent: Option<ElementId>,
    classes: ClassList,
    running: Vec<RunningMotion>,
}

/// A completion signal as seen by one element on its bubbling path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub observer: ElementId,
    pub signal: AnimationEndSignal,
}

#[derive(Debug, Default)]
pub struct Surface {
    elements: HashMap<ElementId, ElementState>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element under `parent` (or at the root)
    pub fn insert(&mut self, element: ElementId, parent: Option<ElementId>) {
        self.elements.entry(element).or_default().parent = parent;
    }

    /// Set an element's classes, starting and cancelling motions by diff
    pub fn apply_classes(
        &mut self,
        element: ElementId,
        classes: &ClassList,
        stylesheet: &Stylesheet,
        now: Instant,
    ) {
        let state = self.elements.entry(element).or_default();

        // Removing the token cancels the motion without a completion signal
        state
            .running
            .retain(|running| classes.contains(&running.token));

        for token in classes.tokens() {
            if state.classes.contains(token) {
                continue;
            }
            if let Some(motion) = stylesheet.motion(token) {
                state.running.push(RunningMotion {
                    token: token.clone(),
                    motion,
                    started: now,
                    duration: stylesheet.duration_of(token),
                });
            }
        }

        state.classes = classes.clone();
    }

    pub fn classes(&self, element: ElementId) -> Option<&ClassList> {
        self.elements.get(&element).map(|state| &state.classes)
    }

    /// Motions running on `element` with their progress
    pub fn motions(&self, element: ElementId, now: Instant) -> Vec<(Motion, f32)> {
        self.elements
            .get(&element)
            .map(|state| {
                state
                    .running
                    .iter()
                    .map(|running| (running.motion, running.progress(now)))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_animating(&self, element: ElementId) -> bool {
        self.elements
            .get(&element)
            .is_some_and(|state| !state.running.is_empty())
    }

    /// Retire finished motions and return their signals along each bubbling path
    ///
    /// Deliveries for one signal are ordered target first, then ancestors.
    pub fn collect_finished(&mut self, now: Instant) -> Vec<Delivery> {
        let mut finished = Vec::new();

        for (&element, state) in self.elements.iter_mut() {
            state.running.retain(|running| {
                if running.is_finished(now) {
                    finished.push(AnimationEndSignal::new(element, running.token.clone()));
                    false
                } else {
                    true
                }
            });
        }

        // Stable order regardless of map iteration
        finished.sort_by_key(|signal| signal.target);

        let mut deliveries = Vec::new();
        for signal in finished {
            let mut observer = Some(signal.target);
            while let Some(current) = observer {
                deliveries.push(Delivery {
                    observer: current,
                    signal: signal.clone(),
                });
                observer = self.elements.get(&current).and_then(|state| state.parent);
            }
        }
        deliveries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> Stylesheet {
        Stylesheet::terminal(Duration::from_millis(100))
    }

    fn classes(tokens: &[&str]) -> ClassList {
        tokens.iter().copied().collect()
    }

    #[test]
    fn added_motion_token_starts_and_finishes() {
        let mut surface = Surface::new();
        let root = ElementId::allocate();
        surface.insert(root, None);

        let t0 = Instant::now();
        surface.apply_classes(root, &classes(&["fromRight", "active"]), &sheet(), t0);
        assert!(surface.is_animating(root));
        assert!(surface.collect_finished(t0 + Duration::from_millis(50)).is_empty());

        let deliveries = surface.collect_finished(t0 + Duration::from_millis(100));
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].observer, root);
        assert_eq!(deliveries[0].signal.target, root);
        assert_eq!(deliveries[0].signal.animation, "fromRight");
        assert!(!surface.is_animating(root));
    }

    #[test]
    fn child_signals_bubble_to_parent() {
        let mut surface = Surface::new();
        let root = ElementId::allocate();
        let heading = ElementId::allocate();
        surface.insert(root, None);
        surface.insert(heading, Some(root));

        let t0 = Instant::now();
        surface.apply_classes(heading, &classes(&["headingDrop"]), &sheet(), t0);

        let deliveries = surface.collect_finished(t0 + Duration::from_secs(1));
        let observers: Vec<_> = deliveries.iter().map(|d| d.observer).collect();
        assert_eq!(observers, vec![heading, root]);
        assert!(deliveries.iter().all(|d| d.signal.target == heading));
    }

    #[test]
    fn tokens_without_motion_never_signal() {
        let mut surface = Surface::new();
        let root = ElementId::allocate();
        let t0 = Instant::now();
        surface.apply_classes(root, &classes(&["noSuchEffect", "active"]), &sheet(), t0);
        assert!(!surface.is_animating(root));
        assert!(surface.collect_finished(t0 + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn removing_token_cancels_silently() {
        let mut surface = Surface::new();
        let root = ElementId::allocate();
        let t0 = Instant::now();
        surface.apply_classes(root, &classes(&["toLeft", "active"]), &sheet(), t0);
        surface.apply_classes(root, &classes(&["toLeft"]), &sheet(), t0);
        assert!(surface.is_animating(root), "unrelated removal keeps motion");

        surface.apply_classes(root, &ClassList::new(), &sheet(), t0);
        assert!(surface.collect_finished(t0 + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn reapplying_same_token_does_not_restart() {
        let mut surface = Surface::new();
        let root = ElementId::allocate();
        let t0 = Instant::now();
        surface.apply_classes(root, &classes(&["fromLeft"]), &sheet(), t0);
        surface.apply_classes(
            root,
            &classes(&["fromLeft", "active"]),
            &sheet(),
            t0 + Duration::from_millis(60),
        );
        assert_eq!(surface.collect_finished(t0 + Duration::from_millis(100)).len(), 1);
    }
}

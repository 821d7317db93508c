//! Slot presenter - one per panel slot
//!
//! A presenter turns the published [`SequenceSnapshot`] into the class list
//! and style of its own element, and reconciles completion signals coming
//! back from the rendering layer.
//!
//! # Completion signals
//!
//! The rendering layer reports one signal per animated element, and signals
//! bubble: a panel's root sees signals from animated descendants too. The
//! presenter keeps the [`ElementId`] of its own root and ignores any signal
//! that originated elsewhere.

mod classes;

pub use classes::{resolve_classes, ClassList, SlotRole, StaticClasses, ACTIVE_MARKER};

use crate::effects::{EffectRegistry, TransitionConfig};
use crate::layout::{self, StyleDeclarations, DEFAULT_PANEL_AREA};
use crate::sequence::{CompletionSink, SequenceSnapshot};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Stable handle to a rendered element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId(u64);

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

impl ElementId {
    /// Fresh, process-unique id
    pub fn allocate() -> Self {
        Self(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Notification that an animation finished on some element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationEndSignal {
    /// Element the animation ran on (not the element observing the bubble)
    pub target: ElementId,
    /// Name of the finished animation, informational only
    pub animation: String,
}

impl AnimationEndSignal {
    pub fn new(target: ElementId, animation: impl Into<String>) -> Self {
        Self {
            target,
            animation: animation.into(),
        }
    }
}

/// What a presenter did with a completion signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalOutcome {
    /// Signal came from another element
    Ignored,
    /// Signal forwarded to the controller
    Forwarded {
        /// The exiting slot dropped its active marker locally
        marker_removed: bool,
    },
}

/// Static per-slot configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    pub transition: TransitionConfig,
    pub static_classes: StaticClasses,
    pub grid_area: String,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            transition: TransitionConfig::default(),
            static_classes: StaticClasses::none(),
            grid_area: DEFAULT_PANEL_AREA.to_string(),
        }
    }
}

/// Output of one presenter render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSlot {
    pub element: ElementId,
    pub slot_index: usize,
    /// `None` means the element carries no class attribute at all
    pub class_attribute: Option<String>,
    pub style: StyleDeclarations,
}

/// Presenter for the slot at `slot_index`
#[derive(Debug, Clone)]
pub struct SlotPresenter {
    slot_index: usize,
    config: SlotConfig,
    element: ElementId,
    /// Classes currently on the element (last render plus local edits)
    classes: ClassList,
}

impl SlotPresenter {
    pub fn new(slot_index: usize, config: SlotConfig) -> Self {
        Self::with_element(slot_index, config, ElementId::allocate())
    }

    /// Presenter bound to an element the rendering layer already created
    pub fn with_element(slot_index: usize, config: SlotConfig, element: ElementId) -> Self {
        Self {
            slot_index,
            config,
            element,
            classes: ClassList::new(),
        }
    }

    pub fn slot_index(&self) -> usize {
        self.slot_index
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    /// Classes as currently applied to the element
    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    /// Recompute classes and style from the snapshot
    pub fn render(&mut self, snapshot: &SequenceSnapshot, registry: &EffectRegistry) -> RenderedSlot {
        let state = snapshot.state();
        self.classes = resolve_classes(
            self.slot_index,
            &state,
            &self.config.transition,
            &self.config.static_classes,
            registry,
        );

        RenderedSlot {
            element: self.element,
            slot_index: self.slot_index,
            class_attribute: self.classes.to_attribute(),
            style: layout::panel_style(
                &self.config.grid_area,
                snapshot.active_index == self.slot_index,
            ),
        }
    }

    /// Handle a (possibly bubbled) completion signal observed on this element
    pub fn handle_animation_end(
        &mut self,
        signal: &AnimationEndSignal,
        snapshot: &SequenceSnapshot,
        sink: &mut impl CompletionSink,
    ) -> SignalOutcome {
        if signal.target != self.element {
            tracing::trace!(
                slot = self.slot_index,
                target = signal.target.raw(),
                animation = %signal.animation,
                "Ignoring bubbled completion signal"
            );
            return SignalOutcome::Ignored;
        }

        let marker_removed =
            snapshot.prev_active_index == self.slot_index && self.classes.remove(ACTIVE_MARKER);

        tracing::debug!(
            slot = self.slot_index,
            animation = %signal.animation,
            marker_removed,
            "Completion signal accepted"
        );
        sink.animation_finished();

        SignalOutcome::Forwarded { marker_removed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::SequenceController;

    #[derive(Default)]
    struct CountingSink(usize);

    impl CompletionSink for CountingSink {
        fn animation_finished(&mut self) {
            self.0 += 1;
        }
    }

    fn presenters(count: usize) -> Vec<SlotPresenter> {
        (0..count)
            .map(|i| SlotPresenter::new(i, SlotConfig::default()))
            .collect()
    }

    fn render_all(
        presenters: &mut [SlotPresenter],
        controller: &SequenceController,
    ) -> Vec<Option<String>> {
        let snapshot = controller.snapshot();
        presenters
            .iter_mut()
            .map(|p| p.render(&snapshot, EffectRegistry::builtin()).class_attribute)
            .collect()
    }

    #[test]
    fn first_render_marks_only_the_start_slot() {
        let controller = SequenceController::new(3, None);
        let mut slots = presenters(3);
        assert_eq!(
            render_all(&mut slots, &controller),
            vec![Some("active".to_string()), None, None]
        );
    }

    #[test]
    fn next_then_finish_walks_through_both_phases() {
        let mut controller = SequenceController::new(3, None);
        let mut slots = presenters(3);

        assert!(controller.next());
        let moving = render_all(&mut slots, &controller);
        assert_eq!(moving[0].as_deref(), Some("toLeft active"));
        assert_eq!(moving[1].as_deref(), Some("fromRight active"));
        assert_eq!(moving[2], None);

        controller.animation_finished();
        let settled = render_all(&mut slots, &controller);
        assert_eq!(settled, vec![None, Some("active".to_string()), None]);
    }

    #[test]
    fn unknown_effect_only_marks_active() {
        let mut controller = SequenceController::new(2, None);
        let config = SlotConfig {
            transition: TransitionConfig::new("noSuchEffect", "noSuchEffect"),
            ..SlotConfig::default()
        };
        let mut entering = SlotPresenter::new(1, config);

        controller.next();
        let rendered = entering.render(&controller.snapshot(), EffectRegistry::builtin());
        assert_eq!(rendered.class_attribute.as_deref(), Some("active"));
    }

    #[test]
    fn bubbled_signal_is_ignored() {
        let mut controller = SequenceController::new(2, None);
        let mut slot = SlotPresenter::new(0, SlotConfig::default());
        controller.next();
        let snapshot = controller.snapshot();
        slot.render(&snapshot, EffectRegistry::builtin());

        let child = ElementId::allocate();
        let mut sink = CountingSink::default();
        let outcome =
            slot.handle_animation_end(&AnimationEndSignal::new(child, "fadeIn"), &snapshot, &mut sink);

        assert_eq!(outcome, SignalOutcome::Ignored);
        assert_eq!(sink.0, 0);
        assert!(slot.classes().contains(ACTIVE_MARKER));
    }

    #[test]
    fn exiting_slot_drops_marker_before_rerender() {
        let mut controller = SequenceController::new(2, None);
        let mut slots = presenters(2);
        controller.next();
        render_all(&mut slots, &controller);
        let snapshot = controller.snapshot();

        let signal = AnimationEndSignal::new(slots[0].element(), "toLeft");
        let outcome = slots[0].handle_animation_end(&signal, &snapshot, &mut controller);

        assert_eq!(outcome, SignalOutcome::Forwarded { marker_removed: true });
        assert_eq!(slots[0].classes().tokens(), &["toLeft"]);
        assert!(!controller.state().is_animating);
    }

    #[test]
    fn entering_slot_keeps_marker() {
        let mut controller = SequenceController::new(2, None);
        let mut slots = presenters(2);
        controller.next();
        render_all(&mut slots, &controller);
        let snapshot = controller.snapshot();

        let signal = AnimationEndSignal::new(slots[1].element(), "fromRight");
        let mut sink = CountingSink::default();
        let outcome = slots[1].handle_animation_end(&signal, &snapshot, &mut sink);

        assert_eq!(outcome, SignalOutcome::Forwarded { marker_removed: false });
        assert!(slots[1].classes().contains(ACTIVE_MARKER));
        assert_eq!(sink.0, 1);
    }

    #[test]
    fn both_signals_reach_controller() {
        let mut controller = SequenceController::new(3, None);
        let mut slots = presenters(3);
        controller.next();
        render_all(&mut slots, &controller);
        let snapshot = controller.snapshot();

        for slot in slots.iter_mut().take(2) {
            let signal = AnimationEndSignal::new(slot.element(), "slide");
            slot.handle_animation_end(&signal, &snapshot, &mut controller);
        }

        assert!(!controller.state().is_animating);
        assert!(controller.next());
    }

    #[test]
    fn panel_style_follows_active_slot() {
        let controller = SequenceController::new(2, None);
        let snapshot = controller.snapshot();
        let mut slots = presenters(2);
        let first = slots[0].render(&snapshot, EffectRegistry::builtin());
        let second = slots[1].render(&snapshot, EffectRegistry::builtin());
        assert_eq!(first.style.get("z-index"), Some("1"));
        assert_eq!(second.style.get("z-index"), Some("0"));
        assert_eq!(first.style.get("grid-area"), Some("panel"));
    }

    #[test]
    fn element_ids_are_unique() {
        let a = ElementId::allocate();
        let b = ElementId::allocate();
        assert_ne!(a, b);
    }
}

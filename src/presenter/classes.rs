//! Class resolution for a single slot
//!
//! [`resolve_classes`] is a pure function of its inputs. Everything the
//! stylesheet needs to animate a slot is encoded in the returned list:
//! caller classes first, then directional tokens, then the marker.

use crate::effects::{EffectRegistry, TransitionConfig};
use crate::sequence::SequenceState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker token carried by the visible (or transitioning) slot
pub const ACTIVE_MARKER: &str = "active";

/// Caller-supplied classes, passed through verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StaticClasses {
    One(String),
    Many(Vec<String>),
}

impl StaticClasses {
    pub fn none() -> Self {
        StaticClasses::Many(Vec::new())
    }

    pub fn tokens(&self) -> &[String] {
        match self {
            StaticClasses::One(token) => std::slice::from_ref(token),
            StaticClasses::Many(tokens) => tokens,
        }
    }
}

impl Default for StaticClasses {
    fn default() -> Self {
        Self::none()
    }
}

impl From<&str> for StaticClasses {
    fn from(token: &str) -> Self {
        StaticClasses::One(token.to_string())
    }
}

impl From<Vec<String>> for StaticClasses {
    fn from(tokens: Vec<String>) -> Self {
        StaticClasses::Many(tokens)
    }
}

/// Role a slot plays in the current transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRole {
    Entering,
    Exiting,
    Inert,
}

impl SlotRole {
    /// Entering wins when both indices point at the same slot
    pub fn of(slot_index: usize, state: &SequenceState) -> Self {
        if slot_index == state.active_index {
            SlotRole::Entering
        } else if slot_index == state.prev_active_index {
            SlotRole::Exiting
        } else {
            SlotRole::Inert
        }
    }
}

/// Ordered list of class tokens as applied to an element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, token: impl Into<String>) {
        self.0.push(token.into());
    }

    pub fn extend<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(tokens.into_iter().map(Into::into));
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }

    /// Remove every occurrence of `token`; returns whether any was present
    pub fn remove(&mut self, token: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != token);
        self.0.len() != before
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value for the element's class attribute; `None` means no attribute
    pub fn to_attribute(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.join(" "))
        }
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

impl<S: Into<String>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Compute the class list for `slot_index` under `state`
pub fn resolve_classes(
    slot_index: usize,
    state: &SequenceState,
    transition: &TransitionConfig,
    static_classes: &StaticClasses,
    registry: &EffectRegistry,
) -> ClassList {
    let mut classes: ClassList = static_classes.tokens().iter().cloned().collect();
    let role = SlotRole::of(slot_index, state);

    match (state.is_animating, role) {
        (true, SlotRole::Entering | SlotRole::Exiting) => {
            let forward = state.active_index > state.prev_active_index;
            let effect = registry.resolve(transition.effect_for(forward));
            classes.extend(effect.for_role(role == SlotRole::Entering).iter().copied());
            classes.push(ACTIVE_MARKER);
        }
        (false, SlotRole::Entering) => classes.push(ACTIVE_MARKER),
        _ => {}
    }

    classes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(active: usize, prev: usize, animating: bool) -> SequenceState {
        SequenceState {
            active_index: active,
            prev_active_index: prev,
            is_animating: animating,
        }
    }

    fn resolve(slot: usize, state: &SequenceState, transition: &TransitionConfig) -> ClassList {
        resolve_classes(
            slot,
            state,
            transition,
            &StaticClasses::none(),
            EffectRegistry::builtin(),
        )
    }

    #[test]
    fn forward_transition_uses_forward_effect_for_both_roles() {
        let transition = TransitionConfig::new("toLeftEasing", "cubeToRight");
        let moving = state(1, 0, true);

        assert_eq!(
            resolve(1, &moving, &transition).tokens(),
            &["fromRight", "active"]
        );
        assert_eq!(
            resolve(0, &moving, &transition).tokens(),
            &["toLeftEasing", "onTop", "active"]
        );
    }

    #[test]
    fn backward_transition_uses_backward_effect() {
        let transition = TransitionConfig::new("toLeftEasing", "cubeToRight");
        let moving = state(0, 1, true);

        assert_eq!(
            resolve(0, &moving, &transition).tokens(),
            &["cubeRightIn", "active"]
        );
        assert_eq!(
            resolve(1, &moving, &transition).tokens(),
            &["cubeRightOut", "onTop", "active"]
        );
    }

    #[test]
    fn settled_slot_carries_only_the_marker() {
        let settled = state(1, 0, false);
        let transition = TransitionConfig::default();
        assert_eq!(resolve(1, &settled, &transition).tokens(), &["active"]);
        assert!(resolve(0, &settled, &transition).is_empty());
    }

    #[test]
    fn inert_slot_gets_no_attribute() {
        let moving = state(1, 0, true);
        let classes = resolve(2, &moving, &TransitionConfig::default());
        assert_eq!(classes.to_attribute(), None);
    }

    #[test]
    fn static_classes_come_first() {
        let moving = state(1, 0, true);
        let classes = resolve_classes(
            1,
            &moving,
            &TransitionConfig::default(),
            &StaticClasses::Many(vec!["panel".into(), "card".into()]),
            EffectRegistry::builtin(),
        );
        assert_eq!(classes.to_attribute().as_deref(), Some("panel card fromRight active"));
    }

    #[test]
    fn single_static_class_survives_on_inert_slot() {
        let classes = resolve_classes(
            2,
            &state(0, 0, false),
            &TransitionConfig::default(),
            &StaticClasses::from("panel"),
            EffectRegistry::builtin(),
        );
        assert_eq!(classes.to_attribute().as_deref(), Some("panel"));
    }

    #[test]
    fn unknown_effect_still_marks_active() {
        let transition = TransitionConfig::new("warpSpeed", "warpSpeed");
        let moving = state(1, 0, true);
        assert_eq!(resolve(1, &moving, &transition).tokens(), &["active"]);
        assert_eq!(resolve(0, &moving, &transition).tokens(), &["active"]);
    }

    #[test]
    fn resolution_is_deterministic() {
        let transition = TransitionConfig::new("scaleDownFromBottom", "fromTopFade");
        for (active, prev, animating) in [(1, 0, true), (0, 1, true), (2, 1, false)] {
            let s = state(active, prev, animating);
            for slot in 0..3 {
                assert_eq!(resolve(slot, &s, &transition), resolve(slot, &s, &transition));
            }
        }
    }

    #[test]
    fn remove_reports_presence() {
        let mut classes: ClassList = ["panel", "active"].into_iter().collect();
        assert!(classes.remove(ACTIVE_MARKER));
        assert!(!classes.remove(ACTIVE_MARKER));
        assert_eq!(classes.to_string(), "panel");
    }

    #[test]
    fn role_prefers_entering_when_indices_coincide() {
        assert_eq!(SlotRole::of(0, &state(0, 0, false)), SlotRole::Entering);
        assert_eq!(SlotRole::of(0, &state(1, 0, true)), SlotRole::Exiting);
        assert_eq!(SlotRole::of(3, &state(1, 0, true)), SlotRole::Inert);
    }
}

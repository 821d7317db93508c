//! Effect registry: named enter/exit class pairs
//!
//! An effect is looked up by name every render, so the registry is a hash
//! map built once from the built-in catalogue. Names that are not in the
//! registry resolve to [`EffectClasses::EMPTY`]: the slot still switches,
//! just without directional classes.

mod catalogue;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Class tokens applied to the entering and exiting slot of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectClasses {
    pub entering: &'static [&'static str],
    pub exiting: &'static [&'static str],
}

impl EffectClasses {
    /// Fallback for unresolved effect names
    pub const EMPTY: EffectClasses = EffectClasses::new(&[], &[]);

    pub const fn new(entering: &'static [&'static str], exiting: &'static [&'static str]) -> Self {
        Self { entering, exiting }
    }

    /// Tokens for the given role
    pub fn for_role(&self, entering: bool) -> &'static [&'static str] {
        if entering {
            self.entering
        } else {
            self.exiting
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entering.is_empty() && self.exiting.is_empty()
    }
}

/// Names of the built-in effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKey {
    FromRight,
    FromLeft,
    FromBottom,
    FromTop,
    FromRightFade,
    FromLeftFade,
    FromBottomFade,
    FromTopFade,
    ToLeftEasing,
    ToRightEasing,
    ToTopEasing,
    ToBottomEasing,
    ScaleDownFromRight,
    ScaleDownFromLeft,
    ScaleDownFromTop,
    ScaleDownFromBottom,
    CubeToLeft,
    CubeToRight,
}

impl EffectKey {
    pub const ALL: [EffectKey; 18] = [
        EffectKey::FromRight,
        EffectKey::FromLeft,
        EffectKey::FromBottom,
        EffectKey::FromTop,
        EffectKey::FromRightFade,
        EffectKey::FromLeftFade,
        EffectKey::FromBottomFade,
        EffectKey::FromTopFade,
        EffectKey::ToLeftEasing,
        EffectKey::ToRightEasing,
        EffectKey::ToTopEasing,
        EffectKey::ToBottomEasing,
        EffectKey::ScaleDownFromRight,
        EffectKey::ScaleDownFromLeft,
        EffectKey::ScaleDownFromTop,
        EffectKey::ScaleDownFromBottom,
        EffectKey::CubeToLeft,
        EffectKey::CubeToRight,
    ];

    /// Registry name (also what config files use)
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKey::FromRight => "fromRight",
            EffectKey::FromLeft => "fromLeft",
            EffectKey::FromBottom => "fromBottom",
            EffectKey::FromTop => "fromTop",
            EffectKey::FromRightFade => "fromRightFade",
            EffectKey::FromLeftFade => "fromLeftFade",
            EffectKey::FromBottomFade => "fromBottomFade",
            EffectKey::FromTopFade => "fromTopFade",
            EffectKey::ToLeftEasing => "toLeftEasing",
            EffectKey::ToRightEasing => "toRightEasing",
            EffectKey::ToTopEasing => "toTopEasing",
            EffectKey::ToBottomEasing => "toBottomEasing",
            EffectKey::ScaleDownFromRight => "scaleDownFromRight",
            EffectKey::ScaleDownFromLeft => "scaleDownFromLeft",
            EffectKey::ScaleDownFromTop => "scaleDownFromTop",
            EffectKey::ScaleDownFromBottom => "scaleDownFromBottom",
            EffectKey::CubeToLeft => "cubeToLeft",
            EffectKey::CubeToRight => "cubeToRight",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

/// Immutable name → classes lookup table
#[derive(Debug)]
pub struct EffectRegistry {
    effects: HashMap<&'static str, EffectClasses>,
}

static BUILTIN: LazyLock<EffectRegistry> = LazyLock::new(|| {
    EffectRegistry {
        effects: catalogue::BUILTIN_EFFECTS
            .iter()
            .map(|(key, classes)| (key.as_str(), *classes))
            .collect(),
    }
});

impl EffectRegistry {
    /// The shared registry of built-in effects
    pub fn builtin() -> &'static EffectRegistry {
        &BUILTIN
    }

    /// Classes for `name`, or [`EffectClasses::EMPTY`] if unknown
    pub fn resolve(&self, name: &str) -> EffectClasses {
        self.effects
            .get(name)
            .copied()
            .unwrap_or(EffectClasses::EMPTY)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.effects.contains_key(name)
    }

    /// All registered names, sorted for stable display
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.effects.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

/// Which effect a slot uses in each direction
///
/// Names are kept as free-form strings so a config file can name an effect
/// the registry does not know; that degrades to no directional classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionConfig {
    /// Effect used when moving to a higher index
    pub forward: String,
    /// Effect used when moving to a lower index
    pub backward: String,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self::from_keys(EffectKey::FromRight, EffectKey::FromLeft)
    }
}

impl TransitionConfig {
    pub fn new(forward: impl Into<String>, backward: impl Into<String>) -> Self {
        Self {
            forward: forward.into(),
            backward: backward.into(),
        }
    }

    pub fn from_keys(forward: EffectKey, backward: EffectKey) -> Self {
        Self::new(forward.as_str(), backward.as_str())
    }

    /// Effect name for a transition in the given direction
    pub fn effect_for(&self, forward: bool) -> &str {
        if forward {
            &self.forward
        } else {
            &self.backward
        }
    }

    /// Names in this config the registry cannot resolve
    pub fn unresolved<'a>(&'a self, registry: &EffectRegistry) -> Vec<&'a str> {
        [self.forward.as_str(), self.backward.as_str()]
            .into_iter()
            .filter(|name| !registry.contains(name))
            .collect()
    }
}

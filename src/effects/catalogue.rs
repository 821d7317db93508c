//! Built-in effect catalogue
//!
//! Token names are the contract with the stylesheet; changing one here
//! silently breaks whichever stylesheet keys off it.

use super::{EffectClasses, EffectKey};

pub(super) const BUILTIN_EFFECTS: &[(EffectKey, EffectClasses)] = &[
    (
        EffectKey::FromRight,
        EffectClasses::new(&["fromRight"], &["toLeft"]),
    ),
    (
        EffectKey::FromLeft,
        EffectClasses::new(&["fromLeft"], &["toRight"]),
    ),
    (
        EffectKey::FromBottom,
        EffectClasses::new(&["fromBottom"], &["toTop"]),
    ),
    (
        EffectKey::FromTop,
        EffectClasses::new(&["fromTop"], &["toBottom"]),
    ),
    (
        EffectKey::FromRightFade,
        EffectClasses::new(&["fromRightFade"], &["toLeftFade"]),
    ),
    (
        EffectKey::FromLeftFade,
        EffectClasses::new(&["fromLeftFade"], &["toRightFade"]),
    ),
    (
        EffectKey::FromBottomFade,
        EffectClasses::new(&["fromBottomFade"], &["toTopFade"]),
    ),
    (
        EffectKey::FromTopFade,
        EffectClasses::new(&["fromTopFade"], &["toBottomFade"]),
    ),
    (
        EffectKey::ToLeftEasing,
        EffectClasses::new(&["fromRight"], &["toLeftEasing", "onTop"]),
    ),
    (
        EffectKey::ToRightEasing,
        EffectClasses::new(&["fromLeft"], &["toRightEasing", "onTop"]),
    ),
    (
        EffectKey::ToTopEasing,
        EffectClasses::new(&["fromBottom"], &["toTopEasing", "onTop"]),
    ),
    (
        EffectKey::ToBottomEasing,
        EffectClasses::new(&["fromTop"], &["toBottomEasing", "onTop"]),
    ),
    (
        EffectKey::ScaleDownFromRight,
        EffectClasses::new(&["fromRight", "onTop"], &["scaleDown"]),
    ),
    (
        EffectKey::ScaleDownFromLeft,
        EffectClasses::new(&["fromLeft", "onTop"], &["scaleDown"]),
    ),
    (
        EffectKey::ScaleDownFromTop,
        EffectClasses::new(&["fromTop", "onTop"], &["scaleDown"]),
    ),
    (
        EffectKey::ScaleDownFromBottom,
        EffectClasses::new(&["fromBottom", "onTop"], &["scaleDown"]),
    ),
    (
        EffectKey::CubeToLeft,
        EffectClasses::new(&["cubeLeftIn"], &["cubeLeftOut", "onTop"]),
    ),
    (
        EffectKey::CubeToRight,
        EffectClasses::new(&["cubeRightIn"], &["cubeRightOut", "onTop"]),
    ),
];

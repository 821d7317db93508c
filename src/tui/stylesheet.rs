//! Terminal stylesheet: what each class token does on screen
//!
//! The core only emits class tokens. This is the terminal's equivalent of
//! the keyframe definitions: tokens map to motions, every motion runs for
//! the configured duration, and tokens without a rule do nothing (so they
//! never produce a completion signal either).

use ratatui::layout::Rect;
use std::collections::HashMap;
use std::time::Duration;

/// Screen edge a motion starts from or ends at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// How the exit curve accelerates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Linear,
    EaseIn,
}

impl Curve {
    fn apply(self, t: f32) -> f32 {
        match self {
            Curve::Linear => t,
            Curve::EaseIn => t * t,
        }
    }
}

/// A keyframe animation, reduced to what a character grid can show
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Slide in from an edge; `fade` shortens the travel and dims the start
    SlideIn { from: Edge, fade: bool },
    /// Slide out towards an edge
    SlideOut { to: Edge, fade: bool, curve: Curve },
    /// Shrink in place
    ScaleDown,
    /// Grow from the given edge, like a cube face turning into view
    CubeIn { from: Edge },
    /// Collapse into the given edge
    CubeOut { to: Edge },
    /// Heading drops into place (decorative, runs on child elements)
    Drop,
}

/// Where (and how) to draw an element at some point of its motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub area: Rect,
    pub dim: bool,
}

impl Motion {
    /// Placement of an element whose resting area is `area`, at progress `t`
    pub fn place(&self, area: Rect, t: f32) -> Placement {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Motion::SlideIn { from, fade } => {
                let travel = if fade { 0.35 } else { 1.0 };
                Placement {
                    area: offset(area, from, (1.0 - t) * travel),
                    dim: fade && t < 0.6,
                }
            }
            Motion::SlideOut { to, fade, curve } => {
                let travel = if fade { 0.35 } else { 1.0 };
                Placement {
                    area: offset(area, to, curve.apply(t) * travel),
                    dim: fade && t > 0.4,
                }
            }
            Motion::ScaleDown => Placement {
                area: shrink(area, 1.0 - 0.2 * t),
                dim: true,
            },
            Motion::CubeIn { from } => Placement {
                area: collapse(area, from, t),
                dim: t < 0.5,
            },
            Motion::CubeOut { to } => Placement {
                area: collapse(area, to, 1.0 - t),
                dim: t > 0.5,
            },
            Motion::Drop => Placement {
                area: offset(area, Edge::Top, (1.0 - t) * 0.5),
                dim: false,
            },
        }
    }
}

/// `area` pushed `fraction` of its size towards `edge`, clipped to itself
fn offset(area: Rect, edge: Edge, fraction: f32) -> Rect {
    let dx = (area.width as f32 * fraction).round() as u16;
    let dy = (area.height as f32 * fraction).round() as u16;
    let dx = dx.min(area.width);
    let dy = dy.min(area.height);
    match edge {
        Edge::Right => Rect::new(area.x + dx, area.y, area.width - dx, area.height),
        Edge::Left => Rect::new(area.x, area.y, area.width - dx, area.height),
        Edge::Bottom => Rect::new(area.x, area.y + dy, area.width, area.height - dy),
        Edge::Top => Rect::new(area.x, area.y, area.width, area.height - dy),
    }
}

/// Centered sub-rect scaled by `factor`
fn shrink(area: Rect, factor: f32) -> Rect {
    let width = (area.width as f32 * factor).round() as u16;
    let height = (area.height as f32 * factor).round() as u16;
    Rect::new(
        area.x + (area.width - width.min(area.width)) / 2,
        area.y + (area.height - height.min(area.height)) / 2,
        width.min(area.width),
        height.min(area.height),
    )
}

/// The `fraction` of `area` nearest to `edge`
fn collapse(area: Rect, edge: Edge, fraction: f32) -> Rect {
    let width = ((area.width as f32 * fraction).round() as u16).min(area.width);
    let height = ((area.height as f32 * fraction).round() as u16).min(area.height);
    match edge {
        Edge::Left => Rect::new(area.x, area.y, width, area.height),
        Edge::Right => Rect::new(area.x + area.width - width, area.y, width, area.height),
        Edge::Top => Rect::new(area.x, area.y, area.width, height),
        Edge::Bottom => Rect::new(area.x, area.y + area.height - height, area.width, height),
    }
}

/// Rule for one class token
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub motion: Option<Motion>,
    /// Raises the element above its siblings while the token is present
    pub on_top: bool,
}

/// Token to rule lookup plus the shared animation duration
#[derive(Debug, Clone)]
pub struct Stylesheet {
    rules: HashMap<&'static str, Rule>,
    duration: Duration,
}

/// Token applied to panel headings while their panel enters
pub const HEADING_ENTER_TOKEN: &str = "headingDrop";

impl Stylesheet {
    /// Rules for every token the built-in effects emit
    pub fn terminal(duration: Duration) -> Self {
        use Edge::*;

        let motion = |m: Motion| Rule {
            motion: Some(m),
            on_top: false,
        };
        let slide_in = |from| motion(Motion::SlideIn { from, fade: false });
        let fade_in = |from| motion(Motion::SlideIn { from, fade: true });
        let slide_out = |to, fade, curve| motion(Motion::SlideOut { to, fade, curve });

        let rules = HashMap::from([
            ("fromRight", slide_in(Right)),
            ("fromLeft", slide_in(Left)),
            ("fromTop", slide_in(Top)),
            ("fromBottom", slide_in(Bottom)),
            ("fromRightFade", fade_in(Right)),
            ("fromLeftFade", fade_in(Left)),
            ("fromTopFade", fade_in(Top)),
            ("fromBottomFade", fade_in(Bottom)),
            ("toLeft", slide_out(Left, false, Curve::Linear)),
            ("toRight", slide_out(Right, false, Curve::Linear)),
            ("toTop", slide_out(Top, false, Curve::Linear)),
            ("toBottom", slide_out(Bottom, false, Curve::Linear)),
            ("toLeftFade", slide_out(Left, true, Curve::Linear)),
            ("toRightFade", slide_out(Right, true, Curve::Linear)),
            ("toTopFade", slide_out(Top, true, Curve::Linear)),
            ("toBottomFade", slide_out(Bottom, true, Curve::Linear)),
            ("toLeftEasing", slide_out(Left, false, Curve::EaseIn)),
            ("toRightEasing", slide_out(Right, false, Curve::EaseIn)),
            ("toTopEasing", slide_out(Top, false, Curve::EaseIn)),
            ("toBottomEasing", slide_out(Bottom, false, Curve::EaseIn)),
            ("scaleDown", motion(Motion::ScaleDown)),
            ("cubeLeftIn", motion(Motion::CubeIn { from: Right })),
            ("cubeLeftOut", motion(Motion::CubeOut { to: Left })),
            ("cubeRightIn", motion(Motion::CubeIn { from: Left })),
            ("cubeRightOut", motion(Motion::CubeOut { to: Right })),
            (HEADING_ENTER_TOKEN, motion(Motion::Drop)),
            (
                "onTop",
                Rule {
                    motion: None,
                    on_top: true,
                },
            ),
        ]);

        Self { rules, duration }
    }

    pub fn rule(&self, token: &str) -> Option<&Rule> {
        self.rules.get(token)
    }

    pub fn motion(&self, token: &str) -> Option<Motion> {
        self.rule(token).and_then(|rule| rule.motion)
    }

    pub fn is_on_top<'a>(&self, tokens: impl IntoIterator<Item = &'a String>) -> bool {
        tokens
            .into_iter()
            .any(|token| self.rule(token).is_some_and(|rule| rule.on_top))
    }

    /// Duration for a token's motion (headings run for half as long)
    pub fn duration_of(&self, token: &str) -> Duration {
        if token == HEADING_ENTER_TOKEN {
            self.duration / 2
        } else {
            self.duration
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::EffectRegistry;

    fn area() -> Rect {
        Rect::new(10, 5, 40, 20)
    }

    #[test]
    fn every_builtin_token_has_a_rule() {
        let sheet = Stylesheet::terminal(Duration::from_millis(100));
        let registry = EffectRegistry::builtin();
        for name in registry.names() {
            let classes = registry.resolve(name);
            for token in classes.entering.iter().chain(classes.exiting) {
                assert!(sheet.rule(token).is_some(), "no rule for {}", token);
            }
        }
    }

    #[test]
    fn unknown_and_marker_tokens_have_no_motion() {
        let sheet = Stylesheet::terminal(Duration::from_millis(100));
        assert_eq!(sheet.motion("active"), None);
        assert_eq!(sheet.motion("panel"), None);
        assert_eq!(sheet.motion("onTop"), None);
        assert!(sheet.is_on_top(&["x".to_string(), "onTop".to_string()]));
    }

    #[test]
    fn slide_in_starts_offscreen_and_ends_at_rest() {
        let motion = Motion::SlideIn {
            from: Edge::Right,
            fade: false,
        };
        assert_eq!(motion.place(area(), 0.0).area.width, 0);
        assert_eq!(motion.place(area(), 1.0).area, area());
        let half = motion.place(area(), 0.5).area;
        assert_eq!((half.x, half.width), (30, 20));
    }

    #[test]
    fn slide_out_ends_offscreen() {
        let motion = Motion::SlideOut {
            to: Edge::Left,
            fade: false,
            curve: Curve::EaseIn,
        };
        assert_eq!(motion.place(area(), 0.0).area, area());
        assert_eq!(motion.place(area(), 1.0).area.width, 0);
        // Ease-in covers a quarter of the distance at half time
        assert_eq!(motion.place(area(), 0.5).area.width, 30);
    }

    #[test]
    fn cube_faces_stay_inside_area() {
        let motion = Motion::CubeIn { from: Edge::Right };
        let placed = motion.place(area(), 0.25).area;
        assert_eq!(placed.right(), area().right());
        assert_eq!(placed.width, 10);
    }

    #[test]
    fn heading_runs_half_duration() {
        let sheet = Stylesheet::terminal(Duration::from_millis(600));
        assert_eq!(sheet.duration_of(HEADING_ENTER_TOKEN), Duration::from_millis(300));
        assert_eq!(sheet.duration_of("fromRight"), Duration::from_millis(600));
    }
}

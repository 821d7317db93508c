// panelswap - a panel container that cycles through child panels one at a
// time, with directional enter/exit transitions expressed as class tokens.
//
// Architecture:
// - sequence: index state machine (pure reducer + controller)
// - effects: named effect -> entering/exiting class tokens
// - presenter: per-slot class resolution and completion-signal filtering
// - container: controller + grid + caller's render function
// - layout: grid directives as style declarations
// - headless / tui: script runner and interactive terminal demo

pub mod cli;
pub mod config;
pub mod container;
pub mod effects;
pub mod headless;
pub mod layout;
pub mod logging;
pub mod presenter;
pub mod sequence;
pub mod tui;

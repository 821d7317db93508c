//! Headless script runner
//!
//! Drives a container and its presenters from a list of textual steps and
//! reports what each step did. Used by the `script` subcommand and handy for
//! checking effect names without a terminal.
//!
//! Steps:
//! - `next` / `n`, `prev` / `p`: navigation requests
//! - `end`: every animated slot reports completion from its own root
//! - `end:N`: slot N's root reports completion
//! - `bubble:N`: a descendant of slot N reports completion (ignored by slot N)

use crate::config::Config;
use crate::container::PanelContainer;
use crate::effects::EffectRegistry;
use crate::presenter::{AnimationEndSignal, ElementId, SignalOutcome, SlotPresenter, SlotRole};
use crate::sequence::{SequenceSnapshot, TransitionRecord};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

// ─────────────────────────────────────────────────────────────────────────────
// Steps
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    Next,
    Previous,
    End,
    EndSlot(usize),
    Bubble(usize),
}

impl FromStr for ScriptStep {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let step = s.trim().to_ascii_lowercase();
        let (name, arg) = match step.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (step.as_str(), None),
        };

        let slot = |arg: Option<&str>| -> Result<usize> {
            let arg = arg.with_context(|| format!("step '{}' needs a slot, e.g. {}:1", name, name))?;
            arg.parse()
                .with_context(|| format!("invalid slot '{}' in step '{}'", arg, s))
        };

        match (name, arg) {
            ("next" | "n", None) => Ok(Self::Next),
            ("prev" | "p", None) => Ok(Self::Previous),
            ("end", None) => Ok(Self::End),
            ("end", arg) => Ok(Self::EndSlot(slot(arg)?)),
            ("bubble", arg) => Ok(Self::Bubble(slot(arg)?)),
            _ => bail!("unknown step '{}' (expected next, prev, end, end:N, bubble:N)", s),
        }
    }
}

impl fmt::Display for ScriptStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => write!(f, "next"),
            Self::Previous => write!(f, "prev"),
            Self::End => write!(f, "end"),
            Self::EndSlot(slot) => write!(f, "end:{}", slot),
            Self::Bubble(slot) => write!(f, "bubble:{}", slot),
        }
    }
}

/// Parse all steps, failing on the first bad one
pub fn parse_steps(steps: &[String]) -> Result<Vec<ScriptStep>> {
    steps.iter().map(|s| s.parse()).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Reports
// ─────────────────────────────────────────────────────────────────────────────

/// What a completion signal did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalReport {
    Ignored { slot: usize },
    Forwarded { slot: usize, marker_removed: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: String,
    /// Navigation steps only: whether the request started a transition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub signals: Vec<SignalReport>,
    pub state: SequenceSnapshot,
    /// Class attribute per slot, `None` when the slot has none
    pub classes: Vec<Option<String>>,
    /// Transitions reported complete during this step
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub completed: Vec<TransitionRecord>,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self.accepted {
            Some(true) => "accepted",
            Some(false) => "dropped",
            None => "",
        };
        write!(
            f,
            "{:<9} {:<8} active={} prev={} animating={:<5}",
            self.step,
            outcome,
            self.state.active_index,
            self.state.prev_active_index,
            self.state.is_animating
        )?;

        for (slot, classes) in self.classes.iter().enumerate() {
            match classes {
                Some(classes) => write!(f, " [{}] \"{}\"", slot, classes)?,
                None => write!(f, " [{}] -", slot)?,
            }
        }

        for signal in &self.signals {
            match signal {
                SignalReport::Ignored { slot } => write!(f, " | slot {} ignored", slot)?,
                SignalReport::Forwarded {
                    slot,
                    marker_removed: true,
                } => write!(f, " | slot {} done (marker removed)", slot)?,
                SignalReport::Forwarded { slot, .. } => write!(f, " | slot {} done", slot)?,
            }
        }

        for record in &self.completed {
            write!(
                f,
                " | complete {}->{} ({})",
                record.from,
                record.to,
                record.direction.as_str()
            )?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Runner
// ─────────────────────────────────────────────────────────────────────────────

pub struct ScriptRunner {
    container: PanelContainer<SequenceSnapshot>,
    presenters: Vec<SlotPresenter>,
    registry: &'static EffectRegistry,
    completed: Rc<RefCell<Vec<TransitionRecord>>>,
}

impl ScriptRunner {
    pub fn new(config: &Config) -> Result<Self> {
        let completed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&completed);

        let container = PanelContainer::new(config.slot_count(), config.start_index)
            .with_grid(config.grid.clone())
            .with_children(|props| props.snapshot)
            .with_completion_callback(move |record| sink.borrow_mut().push(record));

        let slot_config = config.presentation.slot_config();
        let presenters = (0..config.slot_count())
            .map(|slot| SlotPresenter::new(slot, slot_config.clone()))
            .collect();

        let mut runner = Self {
            container,
            presenters,
            registry: EffectRegistry::builtin(),
            completed,
        };
        runner.render_slots()?;
        Ok(runner)
    }

    pub fn snapshot(&self) -> SequenceSnapshot {
        self.container.snapshot()
    }

    /// Re-render the presenters if the container says anything changed
    fn render_slots(&mut self) -> Result<()> {
        if !self.container.needs_render() {
            return Ok(());
        }
        let output = self.container.render().context("Container render failed")?;
        for presenter in &mut self.presenters {
            presenter.render(&output.content, self.registry);
        }
        Ok(())
    }

    /// Slots whose role in the current transition carries effect classes
    ///
    /// Only these produce completion signals in a real rendering layer; with
    /// an unknown effect name the list is empty and the flag stays set.
    pub fn animated_slots(&self) -> Vec<usize> {
        let snapshot = self.snapshot();
        if !snapshot.is_animating {
            return Vec::new();
        }
        let state = snapshot.state();
        let forward = snapshot.direction().is_forward();

        self.presenters
            .iter()
            .filter_map(|presenter| {
                let entering = match SlotRole::of(presenter.slot_index(), &state) {
                    SlotRole::Entering => true,
                    SlotRole::Exiting => false,
                    SlotRole::Inert => return None,
                };
                let effect = presenter.config().transition.effect_for(forward);
                let classes = self.registry.resolve(effect);
                (!classes.for_role(entering).is_empty()).then_some(presenter.slot_index())
            })
            .collect()
    }

    fn deliver(&mut self, slot: usize, target: Option<ElementId>) -> Result<SignalReport> {
        let snapshot = self.snapshot();
        let presenter = self
            .presenters
            .get_mut(slot)
            .with_context(|| format!("no slot {} (slot count is {})", slot, snapshot.slot_count))?;

        let target = target.unwrap_or_else(|| presenter.element());
        let signal = AnimationEndSignal::new(target, "script");

        Ok(
            match presenter.handle_animation_end(&signal, &snapshot, &mut self.container) {
                SignalOutcome::Ignored => SignalReport::Ignored { slot },
                SignalOutcome::Forwarded { marker_removed } => {
                    SignalReport::Forwarded { slot, marker_removed }
                }
            },
        )
    }

    /// Apply one step and report the resulting state
    pub fn apply(&mut self, step: ScriptStep) -> Result<StepReport> {
        let mut accepted = None;
        let mut signals = Vec::new();

        match step {
            ScriptStep::Next => accepted = Some(self.container.next()),
            ScriptStep::Previous => accepted = Some(self.container.previous()),
            ScriptStep::End => {
                for slot in self.animated_slots() {
                    signals.push(self.deliver(slot, None)?);
                }
            }
            ScriptStep::EndSlot(slot) => signals.push(self.deliver(slot, None)?),
            ScriptStep::Bubble(slot) => {
                signals.push(self.deliver(slot, Some(ElementId::allocate()))?)
            }
        }

        self.render_slots()?;

        Ok(StepReport {
            step: step.to_string(),
            accepted,
            signals,
            state: self.snapshot(),
            classes: self.class_attributes(),
            completed: self.completed.borrow_mut().drain(..).collect(),
        })
    }

    /// Current class attribute of every slot (including local marker edits)
    pub fn class_attributes(&self) -> Vec<Option<String>> {
        self.presenters
            .iter()
            .map(|p| p.classes().to_attribute())
            .collect()
    }

    /// Report for the state before any step ran
    pub fn initial_report(&self) -> StepReport {
        StepReport {
            step: "start".to_string(),
            accepted: None,
            signals: Vec::new(),
            state: self.snapshot(),
            classes: self.class_attributes(),
            completed: Vec::new(),
        }
    }
}

/// Run a whole script and collect reports (the first one is the start state)
pub fn run_script(config: &Config, steps: &[ScriptStep]) -> Result<Vec<StepReport>> {
    let mut runner = ScriptRunner::new(config)?;
    let mut reports = vec![runner.initial_report()];
    for &step in steps {
        reports.push(runner.apply(step)?);
    }
    Ok(reports)
}

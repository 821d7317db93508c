//! Panel container - the sequence controller plus the caller's render function
//!
//! The container publishes [`ConsumerProps`] to a caller-supplied function
//! which produces whatever the rendering layer consumes (`T`). A `render`
//! function takes precedence over a `children` function; having neither is a
//! caller mistake and fails the render instead of producing blank output.

use crate::layout::{GridProperties, StyleDeclarations};
use crate::sequence::{CompletionSink, SequenceController, SequenceSnapshot, TransitionRecord};
use std::fmt;

/// Errors surfaced by [`PanelContainer::render`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// Neither a render function nor a children function was supplied
    MissingRenderer,
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::MissingRenderer => write!(
                f,
                "a panel container needs either a render function or a children function"
            ),
        }
    }
}

impl std::error::Error for ContainerError {}

/// Everything a render function gets to see
///
/// Props are read-only. Navigation goes through
/// [`PanelContainer::previous`] / [`PanelContainer::next`], and completion
/// signals reach the controller through [`CompletionSink`] (implemented by
/// the container), usually via `SlotPresenter::handle_animation_end`.
#[derive(Debug, Clone, Copy)]
pub struct ConsumerProps<'a> {
    pub snapshot: SequenceSnapshot,
    pub grid: &'a GridProperties,
}

impl ConsumerProps<'_> {
    pub fn active_index(&self) -> usize {
        self.snapshot.active_index
    }

    pub fn prev_active_index(&self) -> usize {
        self.snapshot.prev_active_index
    }

    pub fn is_animating(&self) -> bool {
        self.snapshot.is_animating
    }
}

/// Caller-supplied function producing the container's content
pub type RenderFn<T> = Box<dyn Fn(&ConsumerProps<'_>) -> T>;

/// Result of a container render
#[derive(Debug, Clone)]
pub struct ContainerOutput<T> {
    pub style: StyleDeclarations,
    pub content: T,
}

pub struct PanelContainer<T> {
    controller: SequenceController,
    grid: GridProperties,
    render: Option<RenderFn<T>>,
    children: Option<RenderFn<T>>,
    last_rendered: Option<SequenceSnapshot>,
}

impl<T> fmt::Debug for PanelContainer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelContainer")
            .field("controller", &self.controller)
            .field("grid", &self.grid)
            .field("has_render", &self.render.is_some())
            .field("has_children", &self.children.is_some())
            .field("last_rendered", &self.last_rendered)
            .finish()
    }
}

impl<T> PanelContainer<T> {
    pub fn new(slot_count: usize, start_index: Option<usize>) -> Self {
        Self {
            controller: SequenceController::new(slot_count, start_index),
            grid: GridProperties::default(),
            render: None,
            children: None,
            last_rendered: None,
        }
    }

    pub fn with_grid(mut self, grid: GridProperties) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_render(mut self, render: impl Fn(&ConsumerProps<'_>) -> T + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    pub fn with_children(mut self, children: impl Fn(&ConsumerProps<'_>) -> T + 'static) -> Self {
        self.children = Some(Box::new(children));
        self
    }

    pub fn with_completion_callback(
        mut self,
        callback: impl FnMut(TransitionRecord) + 'static,
    ) -> Self {
        self.controller.set_completion_callback(callback);
        self
    }

    pub fn controller(&self) -> &SequenceController {
        &self.controller
    }

    pub fn grid(&self) -> &GridProperties {
        &self.grid
    }

    pub fn snapshot(&self) -> SequenceSnapshot {
        self.controller.snapshot()
    }

    pub fn previous(&mut self) -> bool {
        self.controller.previous()
    }

    pub fn next(&mut self) -> bool {
        self.controller.next()
    }

    pub fn animation_finished(&mut self) {
        self.controller.animation_finished();
    }

    pub fn set_slot_count(&mut self, slot_count: usize) {
        self.controller.set_slot_count(slot_count);
    }

    /// Whether state relevant to rendering changed since the last render
    pub fn needs_render(&self) -> bool {
        match &self.last_rendered {
            Some(previous) => previous.should_update(&self.controller.snapshot()),
            None => true,
        }
    }

    /// Produce the container style and the caller's content
    pub fn render(&mut self) -> Result<ContainerOutput<T>, ContainerError> {
        let snapshot = self.controller.snapshot();
        let props = ConsumerProps {
            snapshot,
            grid: &self.grid,
        };

        let renderer = self
            .render
            .as_ref()
            .or(self.children.as_ref())
            .ok_or(ContainerError::MissingRenderer)?;
        let content = renderer(&props);

        self.last_rendered = Some(snapshot);
        Ok(ContainerOutput {
            style: self.grid.container_style(),
            content,
        })
    }
}

impl<T> CompletionSink for PanelContainer<T> {
    fn animation_finished(&mut self) {
        self.controller.animation_finished();
    }
}

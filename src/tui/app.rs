// App state for the demo
//
// Owns the container, one presenter per panel and the element surface.
// Each tick retires finished motions, routes their completion signals to
// the presenters, and re-renders whatever changed.

use super::stylesheet::{Stylesheet, HEADING_ENTER_TOKEN};
use super::surface::Surface;
use crate::config::{Config, PanelContent};
use crate::container::PanelContainer;
use crate::effects::EffectRegistry;
use crate::layout::GridProperties;
use crate::logging::LogBuffer;
use crate::presenter::{ClassList, ElementId, RenderedSlot, SignalOutcome, SlotPresenter};
use crate::sequence::{SequenceSnapshot, TransitionRecord};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// One panel as the UI sees it
pub struct PanelView {
    pub presenter: SlotPresenter,
    pub heading: ElementId,
    pub content: PanelContent,
    /// Output of the presenter's last render
    pub rendered: RenderedSlot,
}

pub struct App {
    pub container: PanelContainer<SequenceSnapshot>,
    pub panels: Vec<PanelView>,
    pub surface: Surface,
    pub stylesheet: Stylesheet,
    pub grid: GridProperties,
    pub controls_area: String,
    pub log_buffer: LogBuffer,
    pub last_completed: Option<TransitionRecord>,
    pub should_quit: bool,
    registry: &'static EffectRegistry,
    completed: Rc<RefCell<Vec<TransitionRecord>>>,
}

impl App {
    pub fn with_config(log_buffer: LogBuffer, config: &Config) -> Self {
        Self::with_config_at(log_buffer, config, Instant::now())
    }

    pub(crate) fn with_config_at(log_buffer: LogBuffer, config: &Config, now: Instant) -> Self {
        let completed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&completed);

        let container = PanelContainer::new(config.slot_count(), config.start_index)
            .with_grid(config.grid.clone())
            .with_render(|props| props.snapshot)
            .with_completion_callback(move |record| sink.borrow_mut().push(record));

        let slot_config = config.presentation.slot_config();
        let snapshot = container.snapshot();
        let registry = EffectRegistry::builtin();
        let mut surface = Surface::new();

        let panels = config
            .panels
            .iter()
            .enumerate()
            .map(|(slot, content)| {
                let mut presenter = SlotPresenter::new(slot, slot_config.clone());
                let heading = ElementId::allocate();
                surface.insert(presenter.element(), None);
                surface.insert(heading, Some(presenter.element()));
                let rendered = presenter.render(&snapshot, registry);
                PanelView {
                    presenter,
                    heading,
                    content: content.clone(),
                    rendered,
                }
            })
            .collect();

        let mut app = Self {
            container,
            panels,
            surface,
            stylesheet: Stylesheet::terminal(Duration::from_millis(config.animation_ms)),
            grid: config.grid.clone(),
            controls_area: config.presentation.controls_area.clone(),
            log_buffer,
            last_completed: None,
            should_quit: false,
            registry,
            completed,
        };
        app.refresh(now);
        app
    }

    pub fn snapshot(&self) -> SequenceSnapshot {
        self.container.snapshot()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if self.container.previous() {
                    self.refresh(now);
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.container.next() {
                    self.refresh(now);
                }
            }
            _ => {}
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tick
    // ─────────────────────────────────────────────────────────────────────────

    /// Route finished motions to presenters, then re-render
    pub fn tick(&mut self, now: Instant) {
        let deliveries = self.surface.collect_finished(now);
        if deliveries.is_empty() {
            return;
        }

        for delivery in deliveries {
            // Only panel roots have presenters; headings just pass the bubble on
            let Some(panel) = self
                .panels
                .iter_mut()
                .find(|panel| panel.presenter.element() == delivery.observer)
            else {
                continue;
            };

            let snapshot = self.container.snapshot();
            let outcome =
                panel
                    .presenter
                    .handle_animation_end(&delivery.signal, &snapshot, &mut self.container);

            if let SignalOutcome::Forwarded {
                marker_removed: true,
            } = outcome
            {
                let classes = panel.presenter.classes().clone();
                panel.rendered.class_attribute = classes.to_attribute();
                self.surface.apply_classes(
                    panel.presenter.element(),
                    &classes,
                    &self.stylesheet,
                    now,
                );
            }
        }

        for record in self.completed.borrow_mut().drain(..) {
            tracing::info!(
                from = record.from,
                to = record.to,
                direction = record.direction.as_str(),
                "Transition complete"
            );
            self.last_completed = Some(record);
        }

        self.refresh(now);
    }

    /// Re-render presenters and push their classes to the surface
    fn refresh(&mut self, now: Instant) {
        if !self.container.needs_render() {
            return;
        }
        let output = match self.container.render() {
            Ok(output) => output,
            Err(e) => {
                tracing::error!("Render failed: {}", e);
                return;
            }
        };
        let snapshot = output.content;

        for panel in &mut self.panels {
            panel.rendered = panel.presenter.render(&snapshot, self.registry);
            self.surface.apply_classes(
                panel.presenter.element(),
                panel.presenter.classes(),
                &self.stylesheet,
                now,
            );

            let entering = snapshot.is_animating && snapshot.active_index == panel.presenter.slot_index();
            let heading_classes: ClassList = if entering {
                ["heading", HEADING_ENTER_TOKEN].into_iter().collect()
            } else {
                ["heading"].into_iter().collect()
            };
            self.surface
                .apply_classes(panel.heading, &heading_classes, &self.stylesheet, now);
        }
    }

    /// Whether a panel should be drawn: visible marker or a motion in flight
    pub fn is_visible(&self, panel: &PanelView) -> bool {
        panel.presenter.classes().contains(crate::presenter::ACTIVE_MARKER)
            || self.surface.is_animating(panel.presenter.element())
    }

    /// Panels in paint order (later ones on top)
    pub fn paint_order(&self) -> Vec<&PanelView> {
        let mut visible: Vec<&PanelView> =
            self.panels.iter().filter(|panel| self.is_visible(panel)).collect();

        visible.sort_by_key(|panel| {
            let z_index: u8 = panel
                .rendered
                .style
                .get("z-index")
                .and_then(|z| z.parse().ok())
                .unwrap_or(0);
            let on_top = self.stylesheet.is_on_top(panel.presenter.classes().tokens());
            (on_top, z_index)
        });
        visible
    }
}

//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;
use crate::effects::EffectRegistry;
use crate::presenter::StaticClasses;

impl Config {
    /// Serialize `[[panels]]` entries
    pub(super) fn panels_to_toml(&self) -> String {
        let mut output = String::new();
        for panel in &self.panels {
            output.push_str("\n[[panels]]\n");
            output.push_str(&format!("title = {}\n", toml_string(&panel.title)));
            output.push_str(&format!("body = {}\n", toml_string(&panel.body)));
        }
        output
    }

    /// Serialize the static panel class (single token or list)
    fn panel_class_to_toml(&self) -> String {
        match &self.presentation.panel_class {
            StaticClasses::One(token) => toml_string(token),
            StaticClasses::Many(tokens) => format!(
                "[{}]",
                tokens
                    .iter()
                    .map(|t| toml_string(t))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    /// Serialize configuration to TOML format
    pub fn to_toml(&self) -> String {
        let start_index = match self.start_index {
            Some(index) => format!("start_index = {}", index),
            None => "# start_index = 0".to_string(),
        };

        let areas = self
            .grid
            .template_areas
            .iter()
            .map(|a| toml_string(a))
            .collect::<Vec<_>>()
            .join(", ");

        let effects = EffectRegistry::builtin().names().join(", ");

        format!(
            r#"# panelswap configuration

# Slot shown first (clamped to the number of panels)
{start_index}

# Duration of each enter/exit motion in the demo (milliseconds)
animation_ms = {animation_ms}

# Redraw interval for the demo (milliseconds)
tick_ms = {tick_ms}

# Effects: {effects}
# Unknown names are accepted but produce no directional classes.
[presentation]
forward = {forward}
backward = {backward}
panel_class = {panel_class}
panel_area = {panel_area}
controls_area = {controls_area}

# Grid directives (pass-through styling)
[grid]
column_sizes = {columns}
row_sizes = {rows}
template_areas = [{areas}]

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
{panels}"#,
            animation_ms = self.animation_ms,
            tick_ms = self.tick_ms,
            forward = toml_string(&self.presentation.transition.forward),
            backward = toml_string(&self.presentation.transition.backward),
            panel_class = self.panel_class_to_toml(),
            panel_area = toml_string(&self.presentation.panel_area),
            controls_area = toml_string(&self.presentation.controls_area),
            columns = toml_string(&self.grid.column_sizes),
            rows = toml_string(&self.grid.row_sizes),
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = toml_string(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = toml_string(&self.logging.file_prefix),
            panels = self.panels_to_toml(),
        )
    }
}

/// Quote a string as a TOML basic string
fn toml_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

//! Grid layout directives for the container, its panels and the controls region.
//!
//! None of this feeds back into the sequence state: it is styling data the
//! rendering layer applies as-is. Single source of truth for the default
//! area names and the declarations every panel carries.
use serde::{Deserialize, Serialize};

/// Grid area panels occupy unless configured otherwise
pub const DEFAULT_PANEL_AREA: &str = "panel";

/// Grid area of the controls region unless configured otherwise
pub const DEFAULT_CONTROLS_AREA: &str = "controls";

/// Ordered `property: value` pairs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StyleDeclarations(Vec<(&'static str, String)>);

impl StyleDeclarations {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.0.push((property, value.into()));
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(p, v)| (*p, v.as_str()))
    }

    /// Inline CSS form: `a: 1; b: 2;`
    pub fn to_css(&self) -> String {
        self.0
            .iter()
            .map(|(p, v)| format!("{}: {};", p, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Size of one grid track, parsed from a sizing token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackSize {
    /// `auto`
    Auto,
    /// `Nfr` - share of the remaining space
    Fraction(u16),
    /// `N%`
    Percent(u16),
    /// `N` or `Npx` - fixed cells
    Fixed(u16),
}

impl TrackSize {
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("auto") {
            return Some(TrackSize::Auto);
        }
        if let Some(n) = token.strip_suffix("fr") {
            return n.parse().ok().map(TrackSize::Fraction);
        }
        if let Some(n) = token.strip_suffix('%') {
            return n.parse().ok().map(TrackSize::Percent);
        }
        let n = token.strip_suffix("px").unwrap_or(token);
        n.parse().ok().map(TrackSize::Fixed)
    }
}

/// Grid directives accepted by the container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridProperties {
    /// `grid-template-columns` value, e.g. "1fr"
    pub column_sizes: String,
    /// `grid-template-rows` value, e.g. "auto" or "1fr 3"
    pub row_sizes: String,
    /// One entry per template row, e.g. ["panel", "controls"]
    pub template_areas: Vec<String>,
}

impl Default for GridProperties {
    fn default() -> Self {
        Self {
            column_sizes: "1fr".to_string(),
            row_sizes: "auto".to_string(),
            template_areas: vec![String::new()],
        }
    }
}

impl GridProperties {
    /// `grid-template-areas` value: each area quoted and followed by a space.
    /// `None` when no areas are configured.
    pub fn template_areas_value(&self) -> Option<String> {
        if self.template_areas.is_empty() {
            return None;
        }
        Some(
            self.template_areas
                .iter()
                .map(|area| format!("'{}' ", area))
                .collect(),
        )
    }

    /// Declarations for the container element
    pub fn container_style(&self) -> StyleDeclarations {
        let style = StyleDeclarations::new()
            .with("display", "grid")
            .with("position", "relative")
            .with("overflow", "hidden")
            .with("perspective", "1200px")
            .with("grid-template-columns", self.column_sizes.clone())
            .with("grid-template-rows", self.row_sizes.clone());

        match self.template_areas_value() {
            Some(areas) => style.with("grid-template-areas", areas),
            None => style,
        }
    }

    /// Row tracks parsed from `row_sizes`; unparseable tokens become `Auto`
    pub fn row_tracks(&self) -> Vec<TrackSize> {
        self.row_sizes
            .split_whitespace()
            .map(|token| TrackSize::parse(token).unwrap_or(TrackSize::Auto))
            .collect()
    }

    /// Row index of a named area, if the template places it
    pub fn row_of(&self, area: &str) -> Option<usize> {
        self.template_areas
            .iter()
            .position(|row| row.split_whitespace().any(|name| name == area))
    }
}

/// Declarations for a panel element
///
/// Panels are hidden by default; the stylesheet reveals whichever one
/// carries the active marker.
pub fn panel_style(grid_area: &str, is_active: bool) -> StyleDeclarations {
    StyleDeclarations::new()
        .with("grid-area", grid_area)
        .with("overflow", "hidden")
        .with("visibility", "hidden")
        .with("transform-style", "preserve-3d")
        .with("backface-visibility", "hidden")
        .with("will-change", "transform")
        .with("z-index", if is_active { "1" } else { "0" })
}

/// Declarations for the controls region
pub fn controls_style(grid_area: &str) -> StyleDeclarations {
    StyleDeclarations::new()
        .with("position", "relative")
        .with("grid-area", grid_area)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_areas_are_quoted_with_trailing_space() {
        let grid = GridProperties {
            template_areas: vec!["panel".into(), "controls".into()],
            ..GridProperties::default()
        };
        assert_eq!(
            grid.template_areas_value().as_deref(),
            Some("'panel' 'controls' ")
        );
    }

    #[test]
    fn empty_template_areas_omit_property() {
        let grid = GridProperties {
            template_areas: Vec::new(),
            ..GridProperties::default()
        };
        assert_eq!(grid.container_style().get("grid-template-areas"), None);
    }

    #[test]
    fn default_container_style() {
        let style = GridProperties::default().container_style();
        assert_eq!(style.get("display"), Some("grid"));
        assert_eq!(style.get("grid-template-columns"), Some("1fr"));
        assert_eq!(style.get("grid-template-rows"), Some("auto"));
        assert_eq!(style.get("grid-template-areas"), Some("'' "));
    }

    #[test]
    fn panel_z_index_tracks_active() {
        assert_eq!(panel_style("panel", true).get("z-index"), Some("1"));
        assert_eq!(panel_style("panel", false).get("z-index"), Some("0"));
        assert_eq!(controls_style("controls").to_css(), "position: relative; grid-area: controls;");
    }

    #[test]
    fn track_tokens() {
        assert_eq!(TrackSize::parse("auto"), Some(TrackSize::Auto));
        assert_eq!(TrackSize::parse("2fr"), Some(TrackSize::Fraction(2)));
        assert_eq!(TrackSize::parse("40%"), Some(TrackSize::Percent(40)));
        assert_eq!(TrackSize::parse("3px"), Some(TrackSize::Fixed(3)));
        assert_eq!(TrackSize::parse("3"), Some(TrackSize::Fixed(3)));
        assert_eq!(TrackSize::parse("minmax(1fr)"), None);
    }

    #[test]
    fn rows_and_areas() {
        let grid = GridProperties {
            column_sizes: "1fr".into(),
            row_sizes: "1fr 3".into(),
            template_areas: vec!["panel".into(), "controls".into()],
        };
        assert_eq!(
            grid.row_tracks(),
            vec![TrackSize::Fraction(1), TrackSize::Fixed(3)]
        );
        assert_eq!(grid.row_of("controls"), Some(1));
        assert_eq!(grid.row_of("sidebar"), None);
    }
}

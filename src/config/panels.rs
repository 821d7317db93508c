//! Panel content and per-slot presentation settings
//!
//! The container only needs the number of panels; titles and bodies are
//! what the demo draws inside each slot.

use crate::effects::TransitionConfig;
use crate::layout::{DEFAULT_CONTROLS_AREA, DEFAULT_PANEL_AREA};
use crate::presenter::{SlotConfig, StaticClasses};
use serde::{Deserialize, Serialize};

/// One panel's content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelContent {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl PanelContent {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Panels shown when the config file has none
pub fn default_panels() -> Vec<PanelContent> {
    vec![
        PanelContent::new(
            "Title One",
            "Horses can sleep both lying down and standing up. Domestic horses have a \
             lifespan of around 25 years. A 19th century horse named 'Old Billy' is said \
             to have lived 62 years.",
        ),
        PanelContent::new(
            "Title Two",
            "Rhino skin may be thick but it can be quite sensitive to sunburns and insect \
             bites, which is why they like to wallow so much. When the mud dries it acts \
             as protection from the sun and insects.",
        ),
        PanelContent::new(
            "Title Three",
            "If you are looking to hunt a unicorn but do not know where to begin, try Lake \
             Superior State University in Sault Ste. Marie, Michigan. Since 1971 the \
             university has issued permits to unicorn questers.",
        ),
    ]
}

/// How every slot is presented (shared by all panels)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub transition: TransitionConfig,
    pub panel_class: StaticClasses,
    pub panel_area: String,
    pub controls_area: String,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            transition: TransitionConfig::default(),
            panel_class: StaticClasses::from("panel"),
            panel_area: DEFAULT_PANEL_AREA.to_string(),
            controls_area: DEFAULT_CONTROLS_AREA.to_string(),
        }
    }
}

/// Presentation settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FilePresentation {
    pub forward: Option<String>,
    pub backward: Option<String>,
    pub panel_class: Option<StaticClasses>,
    pub panel_area: Option<String>,
    pub controls_area: Option<String>,
}

impl Presentation {
    /// Create from file config with defaults; env overrides win for effect names
    pub fn from_file(
        file: Option<FilePresentation>,
        forward_override: Option<String>,
        backward_override: Option<String>,
    ) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            transition: TransitionConfig {
                forward: forward_override
                    .or(file.forward)
                    .unwrap_or(defaults.transition.forward),
                backward: backward_override
                    .or(file.backward)
                    .unwrap_or(defaults.transition.backward),
            },
            panel_class: file.panel_class.unwrap_or(defaults.panel_class),
            panel_area: file.panel_area.unwrap_or(defaults.panel_area),
            controls_area: file.controls_area.unwrap_or(defaults.controls_area),
        }
    }

    /// Slot configuration handed to each presenter
    pub fn slot_config(&self) -> SlotConfig {
        SlotConfig {
            transition: self.transition.clone(),
            static_classes: self.panel_class.clone(),
            grid_area: self.panel_area.clone(),
        }
    }
}

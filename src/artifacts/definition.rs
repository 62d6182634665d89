use serde::Serialize;

use crate::models::{Dimensions, Offset};
use crate::utils::safe_id;

use super::ArtifactKind;

pub const STROKE_BLUE: &str = "#0066cc";
pub const STROKE_ORANGE: &str = "#ff6600";
pub const STROKE_GREY: &str = "#939699";

/// Position and size of an artifact's outer frame.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SvgFrame {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Stroke {
    pub colour: String,
    /// Dash length; solid when `None`.
    pub dash: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RectStyle {
    pub fill: String,
    pub stroke: Stroke,
    pub width_adjust: i64,
    pub height_adjust: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NameLabel {
    pub show: bool,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DataAttribute {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClickAction {
    /// Load the property sheet of the named artifact.
    OpenProperties { kind: ArtifactKind, id: String },
}

/// Callbacks the renderer attaches to the drawn element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Interaction {
    pub click: Option<ClickAction>,
    /// Element ids filled with the highlight colour while hovered.
    pub highlight: Vec<String>,
}

/// Declarative drawing instructions for one artifact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SvgDefinition {
    pub id: String,
    pub kind: ArtifactKind,
    pub parent_id: Option<String>,
    pub svg: SvgFrame,
    pub rect: RectStyle,
    pub name: NameLabel,
    pub title: String,
    pub data: Vec<DataAttribute>,
    pub interaction: Interaction,
}

impl SvgDefinition {
    /// Icon sized definition with the kind's default colours.
    pub fn new(kind: ArtifactKind, id: &str, display_name: &str, parent_id: Option<&str>, icon: Dimensions) -> Self {
        Self {
            id: id.to_string(),
            kind,
            parent_id: parent_id.map(str::to_string),
            svg: SvgFrame {
                x: 0,
                y: 0,
                width: icon.width,
                height: icon.height,
            },
            rect: RectStyle {
                fill: kind.fill_colour().to_string(),
                stroke: Stroke {
                    colour: STROKE_GREY.to_string(),
                    dash: None,
                },
                width_adjust: 0,
                height_adjust: 0,
            },
            name: NameLabel {
                show: false,
                text: display_name.to_string(),
            },
            title: format!("{}: {}", kind.reference(), display_name),
            data: vec![DataAttribute {
                name: "data-type".into(),
                value: kind.reference().to_string(),
            }],
            interaction: Interaction {
                click: Some(ClickAction::OpenProperties {
                    kind,
                    id: id.to_string(),
                }),
                highlight: vec![],
            },
        }
    }

    pub fn place(&mut self, offset: Offset) {
        self.svg.x = offset.dx;
        self.svg.y = offset.dy;
    }

    pub fn push_data(&mut self, name: &str, value: impl ToString) {
        self.data.push(DataAttribute {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    pub fn data_value(&self, name: &str) -> Option<&str> {
        self.data.iter().find(|d| d.name == name).map(|d| d.value.as_str())
    }

    pub fn element_id(&self) -> String {
        safe_id(&self.id)
    }

    /// The border rect is inset vertically by the (negative) height adjust
    /// so the icon straddles its top edge.
    pub fn rect_y(&self) -> i64 {
        -self.rect.height_adjust
    }

    pub fn rect_width(&self) -> i64 {
        (self.svg.width + self.rect.width_adjust).max(0)
    }

    pub fn rect_height(&self) -> i64 {
        (self.svg.height + self.rect.height_adjust).max(0)
    }

    pub fn dash_array(&self) -> String {
        match self.rect.stroke.dash {
            Some(dash) => format!("{},{}", dash * 5, dash * 5),
            None => String::new(),
        }
    }

    pub fn properties_path(&self) -> String {
        match &self.interaction.click {
            Some(ClickAction::OpenProperties { kind, id }) => format!("{}/{}", kind.slug(), id),
            None => String::new(),
        }
    }

    pub fn properties_kind(&self) -> &'static str {
        match &self.interaction.click {
            Some(ClickAction::OpenProperties { kind, .. }) => kind.slug(),
            None => "",
        }
    }

    pub fn properties_id(&self) -> &str {
        match &self.interaction.click {
            Some(ClickAction::OpenProperties { id, .. }) => id,
            None => "",
        }
    }

    pub fn highlight_ids(&self) -> String {
        self.interaction
            .highlight
            .iter()
            .map(|id| safe_id(id))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn right(&self) -> i64 {
        self.svg.x + self.svg.width
    }

    pub fn bottom(&self) -> i64 {
        self.svg.y + self.svg.height
    }
}

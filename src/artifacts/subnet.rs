use crate::config::LayoutConfig;
use crate::document::Document;
use crate::models::{Dimensions, Offset, SubnetRecord};

use super::definition::STROKE_ORANGE;
use super::{Artifact, ArtifactKind, DirectParent, Instance, ParentRef, SvgDefinition};

/// Subnet node; the drop target for instances, which it lays out in a row.
pub struct Subnet {
    record: SubnetRecord,
    layout: LayoutConfig,
    instances: Vec<Instance>,
}

impl Subnet {
    pub fn new(record: SubnetRecord, document: &Document, layout: LayoutConfig) -> Self {
        let parent = ParentRef {
            kind: ArtifactKind::Subnet,
            id: record.id.clone(),
            display_name: record.display_name.clone(),
        };
        let instances = document
            .instances
            .iter()
            .filter(|instance| instance.parent_id.as_deref() == Some(record.id.as_str()))
            .map(|instance| {
                Instance::new(
                    instance.clone(),
                    document,
                    layout,
                    Box::new(DirectParent(parent.clone())),
                )
            })
            .collect();
        Self {
            record,
            layout,
            instances,
        }
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn first_child_offset(&self) -> Offset {
        Offset {
            dx: self.layout.icon_spacing * 2,
            dy: self.layout.icon_height + self.layout.icon_spacing * 2,
        }
    }

    /// Offsets of each child instance, left to right.
    pub fn child_offsets(&self) -> Vec<Offset> {
        let mut offset = self.first_child_offset();
        let mut offsets = Vec::with_capacity(self.instances.len());
        for instance in &self.instances {
            offsets.push(offset);
            offset.dx += instance.dimensions().width + self.layout.spacing.dx;
        }
        offsets
    }
}

impl Artifact for Subnet {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Subnet
    }

    fn id(&self) -> &str {
        &self.record.id
    }

    fn display_name(&self) -> &str {
        &self.record.display_name
    }

    fn parent_id(&self) -> Option<&str> {
        Some(self.record.vcn_id.as_str()).filter(|id| !id.is_empty())
    }

    fn minimum_dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.layout.icon_width * 5 + self.layout.icon_spacing * 6,
            height: self.layout.icon_height * 3,
        }
    }

    fn dimensions(&self) -> Dimensions {
        let first = self.first_child_offset();
        let mut children = Dimensions {
            width: first.dx,
            height: first.dy,
        };
        let mut tallest = 0;
        for instance in &self.instances {
            let dimensions = instance.dimensions();
            children.width += dimensions.width + self.layout.spacing.dx;
            tallest = tallest.max(dimensions.height);
        }
        children.width += self.layout.icon_spacing;
        children.height += tallest + self.layout.padding.dy;
        self.minimum_dimensions().max(children)
    }

    fn definition(&self, offset: Offset) -> SvgDefinition {
        let mut definition = SvgDefinition::new(
            self.kind(),
            self.id(),
            self.display_name(),
            self.parent_id(),
            self.dimensions(),
        );
        definition.place(offset);
        definition.rect.stroke.colour = STROKE_ORANGE.to_string();
        definition.rect.height_adjust = -self.layout.half_icon_height();
        definition.name.show = true;
        definition.push_data("data-compartment-id", &self.record.compartment_id);
        definition.push_data("data-cidr-block", &self.record.cidr_block);
        definition
    }
}

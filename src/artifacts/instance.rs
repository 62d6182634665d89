use crate::config::{round_div, LayoutConfig};
use crate::document::Document;
use crate::models::{Dimensions, InstanceRecord, Offset};

use super::definition::STROKE_BLUE;
use super::{
    Artifact, ArtifactKind, BlockStorageVolume, ParentRef, ParentResolver, SubnetLookup, SvgDefinition,
    VirtualNetworkInterface,
};

/// Compute instance node. Attached volumes and secondary network
/// interfaces are drawn along its bottom edge, volumes first.
pub struct Instance {
    record: InstanceRecord,
    layout: LayoutConfig,
    parent: Box<dyn ParentResolver>,
    volumes: Vec<BlockStorageVolume>,
    vnics: Vec<VirtualNetworkInterface>,
}

impl Instance {
    /// Builds the node for `record`. Attachments whose ids do not resolve in
    /// `document` are skipped.
    pub fn new(
        record: InstanceRecord,
        document: &Document,
        layout: LayoutConfig,
        parent: Box<dyn ParentResolver>,
    ) -> Self {
        let volumes = record
            .block_storage_volume_ids
            .iter()
            .filter_map(|id| document.get_block_storage_volume(id))
            .map(|volume| BlockStorageVolume::attached_to(volume.clone(), &record.id, layout))
            .collect();
        let vnics = record
            .subnet_ids
            .iter()
            .filter_map(|id| document.get_subnet(id))
            .map(|subnet| VirtualNetworkInterface::from_subnet(subnet, &record.id, layout))
            .collect();
        Self {
            record,
            layout,
            parent,
            volumes,
            vnics,
        }
    }

    /// Node for a stored instance, with its parent looked up by id.
    pub fn from_document(document: &Document, id: &str, layout: LayoutConfig) -> Option<Self> {
        let record = document.get_instance(id)?.clone();
        let parent = Box::new(SubnetLookup::new(record.parent_id.as_deref()));
        Some(Self::new(record, document, layout, parent))
    }

    pub fn record(&self) -> &InstanceRecord {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut InstanceRecord {
        &mut self.record
    }

    pub fn into_record(self) -> InstanceRecord {
        self.record
    }

    pub fn parent(&self, document: &Document) -> Option<ParentRef> {
        self.parent.resolve(document)
    }

    pub fn volumes(&self) -> &[BlockStorageVolume] {
        &self.volumes
    }

    pub fn vnics(&self) -> &[VirtualNetworkInterface] {
        &self.vnics
    }

    pub fn first_bottom_edge_child_offset(&self) -> Offset {
        Offset {
            dx: self.layout.icon_spacing,
            dy: round_div(self.layout.icon_height * 3, 2),
        }
    }

    /// Offset of the next bottom-edge child when `placed` bottom-edge
    /// children have already been positioned.
    pub fn bottom_edge_child_offset(&self, placed: usize) -> Offset {
        let mut offset = self.first_bottom_edge_child_offset();
        let placed = placed as i64;
        offset.dx += self.layout.icon_width * placed + self.layout.spacing.dx * placed;
        offset.dy = self.dimensions().height - self.layout.padding.dy;
        offset
    }

    /// Definitions for every attachment, positioned relative to `origin`,
    /// the instance's own placed offset.
    pub fn attachment_definitions(&self, origin: Offset) -> Vec<SvgDefinition> {
        tracing::debug!(id = %self.record.id, volumes = self.volumes.len(), vnics = self.vnics.len(), "Drawing attachments");
        let attachments = self
            .volumes
            .iter()
            .map(|volume| volume as &dyn Artifact)
            .chain(self.vnics.iter().map(|vnic| vnic as &dyn Artifact));
        attachments
            .enumerate()
            .map(|(placed, attachment)| {
                let offset = origin.translate(self.bottom_edge_child_offset(placed));
                attachment.definition(offset)
            })
            .collect()
    }
}

impl Clone for Instance {
    fn clone(&self) -> Self {
        Self {
            record: self.record.clone(),
            layout: self.layout,
            parent: self.parent.clone_box(),
            volumes: self.volumes.clone(),
            vnics: self.vnics.clone(),
        }
    }
}

impl Artifact for Instance {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Instance
    }

    fn id(&self) -> &str {
        &self.record.id
    }

    fn display_name(&self) -> &str {
        &self.record.display_name
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent.parent_id()
    }

    fn minimum_dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.layout.icon_width * 3 + self.layout.icon_spacing * 4,
            height: round_div(self.layout.icon_height * 5, 2),
        }
    }

    fn dimensions(&self) -> Dimensions {
        let minimum = self.minimum_dimensions();
        let offset = self.first_bottom_edge_child_offset();
        let per_attachment = self.layout.padding.dx + self.layout.spacing.dx;
        let attachments = self.record.bottom_edge_attachment_count() as i64;
        let bottom_edge = Dimensions {
            width: offset.dx + attachments * per_attachment,
            height: offset.dy,
        };
        minimum.max(bottom_edge)
    }

    fn definition(&self, offset: Offset) -> SvgDefinition {
        let dimensions = self.dimensions();
        let mut definition = SvgDefinition::new(
            self.kind(),
            self.id(),
            self.display_name(),
            self.parent_id(),
            dimensions,
        );
        definition.place(offset);
        definition.rect.stroke.colour = STROKE_BLUE.to_string();
        definition.rect.stroke.dash = Some(1);
        definition.rect.height_adjust = -self.layout.half_icon_height();
        definition.name.show = true;

        let connector_x = offset.dx + dimensions.width / 2;
        let connector_y = offset.dy + self.layout.half_icon_height();
        definition.push_data("data-compartment-id", &self.record.compartment_id);
        definition.push_data("data-connector-start-x", connector_x);
        definition.push_data("data-connector-start-y", connector_y);
        definition.push_data("data-connector-end-x", connector_x);
        definition.push_data("data-connector-end-y", connector_y);
        definition.push_data("data-connector-id", &self.record.id);
        definition.push_data("dragable", true);
        definition
    }

    fn delete_children(&self, document: &mut Document) {
        document.remove_load_balancer_member(&self.record.id);
    }
}

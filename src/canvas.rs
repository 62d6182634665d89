//! Canvas redraw: a pure function from document state to draw list.

use askama::Template;
use serde::Serialize;

use crate::artifacts::{Artifact, Instance, ParentResolver, Subnet, SubnetLookup, SvgDefinition};
use crate::config::LayoutConfig;
use crate::document::Document;
use crate::models::{Dimensions, Offset};
use crate::templates::CanvasTemplate;

/// Everything needed to draw one region's diagram, in paint order with
/// absolute coordinates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CanvasView {
    pub title: String,
    pub dimensions: Dimensions,
    pub nodes: Vec<SvgDefinition>,
}

impl CanvasView {
    pub fn node(&self, id: &str) -> Option<&SvgDefinition> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn to_svg(&self) -> Result<String, askama::Error> {
        CanvasTemplate {
            width: self.dimensions.width,
            height: self.dimensions.height,
            title: &self.title,
            nodes: &self.nodes,
        }
        .render()
    }
}

fn push_instance(nodes: &mut Vec<SvgDefinition>, instance: &Instance, origin: Offset) {
    nodes.push(instance.definition(origin));
    nodes.extend(instance.attachment_definitions(origin));
}

/// Lays out subnets top to bottom with their instances inside, then any
/// instance whose parent cannot be resolved in a row beneath them.
///
/// Sizes are computed bottom-up when each node is built; positions are
/// assigned top-down here.
pub fn render_canvas(document: &Document, layout: &LayoutConfig) -> CanvasView {
    let margin = layout.icon_spacing * 2;
    let mut nodes = Vec::new();
    let mut cursor = Offset { dx: margin, dy: margin + layout.half_icon_height() };
    let mut extent = Dimensions::default();

    for record in &document.subnets {
        let subnet = Subnet::new(record.clone(), document, *layout);
        let dimensions = subnet.dimensions();
        nodes.push(subnet.definition(cursor));
        for (instance, offset) in subnet.instances().iter().zip(subnet.child_offsets()) {
            push_instance(&mut nodes, instance, cursor.translate(offset));
        }
        extent = extent.max(Dimensions {
            width: cursor.dx + dimensions.width,
            height: cursor.dy + dimensions.height,
        });
        cursor.dy += dimensions.height + layout.spacing.dy + layout.half_icon_height();
    }

    let mut row = cursor;
    for record in &document.instances {
        let lookup = SubnetLookup::new(record.parent_id.as_deref());
        if lookup.resolve(document).is_some() {
            continue;
        }
        tracing::debug!(id = %record.id, parent = ?record.parent_id, "Instance parent not found; drawing at canvas root");
        let instance = Instance::new(record.clone(), document, *layout, Box::new(lookup));
        let dimensions = instance.dimensions();
        push_instance(&mut nodes, &instance, row);
        extent = extent.max(Dimensions {
            width: row.dx + dimensions.width,
            height: row.dy + dimensions.height,
        });
        row.dx += dimensions.width + layout.spacing.dx;
    }

    CanvasView {
        title: document.title.clone(),
        dimensions: Dimensions {
            width: extent.width + margin,
            height: extent.height + margin,
        },
        nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::ArtifactKind;
    use crate::models::{BlockStorageVolumeRecord, InstancePatch, SubnetRecord};

    fn sample() -> (Document, String) {
        let mut document = Document::new("sample");
        document.subnets.push(SubnetRecord {
            id: "sn-1".into(),
            display_name: "Public".into(),
            ..SubnetRecord::default()
        });
        document.subnets.push(SubnetRecord {
            id: "sn-2".into(),
            display_name: "Private".into(),
            ..SubnetRecord::default()
        });
        document.block_storage_volumes.push(BlockStorageVolumeRecord {
            id: "bsv-1".into(),
            ..BlockStorageVolumeRecord::default()
        });
        let id = document.new_instance(InstancePatch {
            block_storage_volume_ids: Some(vec!["bsv-1".into()]),
            subnet_ids: Some(vec!["sn-2".into()]),
            ..InstancePatch::with_parent("sn-1")
        });
        (document, id)
    }

    #[test]
    fn instance_is_placed_inside_its_subnet() {
        let (document, id) = sample();
        let canvas = render_canvas(&document, &LayoutConfig::default());
        let subnet = canvas.node("sn-1").unwrap();
        let instance = canvas.node(&id).unwrap();
        assert_eq!((subnet.svg.x, subnet.svg.y), (20, 43));
        assert_eq!((instance.svg.x, instance.svg.y), (40, 108));
        assert!(instance.right() <= subnet.right());
        assert!(instance.bottom() <= subnet.bottom());
    }

    #[test]
    fn paint_order_is_parent_then_children() {
        let (document, id) = sample();
        let canvas = render_canvas(&document, &LayoutConfig::default());
        let order: Vec<_> = canvas.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(order, vec!["sn-1", id.as_str(), "bsv-1", "sn-2-vnic", "sn-2"]);
        let vnic = canvas.node("sn-2-vnic").unwrap();
        assert_eq!(vnic.kind, ArtifactKind::VirtualNetworkInterface);
    }

    #[test]
    fn orphans_are_drawn_at_the_root() {
        let mut document = Document::default();
        let id = document.new_instance(InstancePatch::with_parent("missing-subnet"));
        let canvas = render_canvas(&document, &LayoutConfig::default());
        let instance = canvas.node(&id).unwrap();
        assert_eq!((instance.svg.x, instance.svg.y), (20, 43));
        assert_eq!(canvas.dimensions, Dimensions { width: 215, height: 176 });
    }

    #[test]
    fn redraw_reflects_current_state() {
        let (mut document, id) = sample();
        let layout = LayoutConfig::default();
        let before = render_canvas(&document, &layout);
        document.delete_instance(&id).unwrap();
        let after = render_canvas(&document, &layout);
        assert!(before.node(&id).is_some());
        assert!(after.node(&id).is_none());
        assert!(after.node("bsv-1").is_none());
        assert_eq!(render_canvas(&document, &layout), after);
    }

    #[test]
    fn svg_output_contains_every_node() {
        let (document, id) = sample();
        let svg = render_canvas(&document, &LayoutConfig::default()).to_svg().unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(&format!("id=\"{}-svg\"", id)));
        assert!(svg.contains("data-highlight=\"sn-2-vnic sn-2\""));
        assert!(svg.contains("data-properties-kind=\"instances\""));
    }
}

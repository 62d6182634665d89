use crate::config::LayoutConfig;
use crate::models::{Dimensions, Offset, SubnetRecord};

use super::definition::STROKE_ORANGE;
use super::{Artifact, ArtifactKind, ClickAction, SvgDefinition};

/// Secondary network interface an instance holds in an additional subnet.
/// Has no record of its own: it is derived from the subnet and exists
/// only for drawing.
#[derive(Clone, Debug)]
pub struct VirtualNetworkInterface {
    id: String,
    subnet_id: String,
    display_name: String,
    instance_id: String,
    layout: LayoutConfig,
}

impl VirtualNetworkInterface {
    pub fn from_subnet(subnet: &SubnetRecord, instance_id: &str, layout: LayoutConfig) -> Self {
        Self {
            // Suffixed so the element never collides with the subnet itself.
            id: format!("{}-vnic", subnet.id),
            subnet_id: subnet.id.clone(),
            display_name: subnet.display_name.clone(),
            instance_id: instance_id.to_string(),
            layout,
        }
    }

    pub fn subnet_id(&self) -> &str {
        &self.subnet_id
    }
}

impl Artifact for VirtualNetworkInterface {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::VirtualNetworkInterface
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn parent_id(&self) -> Option<&str> {
        Some(&self.instance_id)
    }

    fn minimum_dimensions(&self) -> Dimensions {
        self.layout.icon_dimensions()
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
        definition.push_data("data-subnet-id", &self.subnet_id);
        definition.interaction.click = Some(ClickAction::OpenProperties {
            kind: ArtifactKind::Subnet,
            id: self.subnet_id.clone(),
        });
        definition.interaction.highlight = vec![self.id.clone(), self.subnet_id.clone()];
        definition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vnic_highlights_itself_and_its_subnet() {
        let subnet = SubnetRecord {
            id: "sn-2".into(),
            display_name: "Private".into(),
            ..SubnetRecord::default()
        };
        let vnic = VirtualNetworkInterface::from_subnet(&subnet, "in-1", LayoutConfig::default());
        assert_eq!(vnic.id(), "sn-2-vnic");
        assert_eq!(vnic.parent_id(), Some("in-1"));
        assert_eq!(vnic.subnet_id(), "sn-2");

        let def = vnic.definition(Offset { dx: 10, dy: 68 });
        assert_eq!(def.interaction.highlight, vec!["sn-2-vnic".to_string(), "sn-2".to_string()]);
        assert_eq!(def.properties_path(), "subnets/sn-2");
        assert_eq!(def.rect.stroke.colour, STROKE_ORANGE);
        assert_eq!((def.svg.x, def.svg.y), (10, 68));
    }
}

//! Diagram artifacts: the node types drawn on the canvas.
//!
//! Every resource type implements [`Artifact`]. Nodes are built from the
//! current document state and own copies of the data they draw, so a
//! render pass never mutates the document.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::models::{Dimensions, Offset};

pub mod definition;
pub mod instance;
pub mod subnet;
pub mod block_storage_volume;
pub mod virtual_network_interface;

pub use definition::{ClickAction, DataAttribute, Interaction, SvgDefinition};
pub use instance::Instance;
pub use subnet::Subnet;
pub use block_storage_volume::BlockStorageVolume;
pub use virtual_network_interface::VirtualNetworkInterface;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Compartment,
    Subnet,
    Instance,
    BlockStorageVolume,
    VirtualNetworkInterface,
    LoadBalancer,
    AutonomousDatabase,
    ObjectStorageBucket,
}

impl ArtifactKind {
    /// Name the artifact is known by in the editor.
    pub fn reference(&self) -> &'static str {
        match self {
            ArtifactKind::Compartment => "Compartment",
            ArtifactKind::Subnet => "Subnet",
            ArtifactKind::Instance => "Instance",
            ArtifactKind::BlockStorageVolume => "Block Storage Volume",
            ArtifactKind::VirtualNetworkInterface => "Virtual Network Interface",
            ArtifactKind::LoadBalancer => "Load Balancer",
            ArtifactKind::AutonomousDatabase => "Autonomous Database",
            ArtifactKind::ObjectStorageBucket => "Object Storage Bucket",
        }
    }

    /// Short prefix used in generated ids and default names.
    pub fn prefix(&self) -> &'static str {
        match self {
            ArtifactKind::Compartment => "comp",
            ArtifactKind::Subnet => "sn",
            ArtifactKind::Instance => "in",
            ArtifactKind::BlockStorageVolume => "bsv",
            ArtifactKind::VirtualNetworkInterface => "vnic",
            ArtifactKind::LoadBalancer => "lb",
            ArtifactKind::AutonomousDatabase => "adb",
            ArtifactKind::ObjectStorageBucket => "osb",
        }
    }

    /// Collection key in the document JSON.
    pub fn slug(&self) -> &'static str {
        match self {
            ArtifactKind::Compartment => "compartments",
            ArtifactKind::Subnet => "subnets",
            ArtifactKind::Instance => "instances",
            ArtifactKind::BlockStorageVolume => "block_storage_volumes",
            ArtifactKind::VirtualNetworkInterface => "virtual_network_interfaces",
            ArtifactKind::LoadBalancer => "load_balancers",
            ArtifactKind::AutonomousDatabase => "autonomous_databases",
            ArtifactKind::ObjectStorageBucket => "object_storage_buckets",
        }
    }

    /// Artifacts this kind may be dropped onto.
    pub fn drop_targets(&self) -> &'static [ArtifactKind] {
        match self {
            ArtifactKind::Instance => &[ArtifactKind::Subnet],
            ArtifactKind::LoadBalancer => &[ArtifactKind::Subnet],
            ArtifactKind::Subnet => &[ArtifactKind::Compartment],
            ArtifactKind::BlockStorageVolume
            | ArtifactKind::AutonomousDatabase
            | ArtifactKind::ObjectStorageBucket => &[ArtifactKind::Compartment],
            ArtifactKind::Compartment | ArtifactKind::VirtualNetworkInterface => &[],
        }
    }

    /// Artifacts this kind may be wired to with a connector.
    pub fn connect_targets(&self) -> &'static [ArtifactKind] {
        match self {
            ArtifactKind::Instance => &[ArtifactKind::LoadBalancer],
            _ => &[],
        }
    }

    pub fn fill_colour(&self) -> &'static str {
        match self {
            ArtifactKind::Compartment => "#ffffff",
            ArtifactKind::Subnet => "#f5fbff",
            ArtifactKind::Instance => "#ffffff",
            ArtifactKind::BlockStorageVolume => "#f8f4e9",
            ArtifactKind::VirtualNetworkInterface => "#fff5ec",
            ArtifactKind::LoadBalancer => "#f0f0f0",
            ArtifactKind::AutonomousDatabase => "#eef7ee",
            ArtifactKind::ObjectStorageBucket => "#f8f4e9",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reference())
    }
}

/// The common contract every diagram node implements.
pub trait Artifact {
    fn kind(&self) -> ArtifactKind;

    fn id(&self) -> &str;

    fn display_name(&self) -> &str;

    fn parent_id(&self) -> Option<&str>;

    fn minimum_dimensions(&self) -> Dimensions;

    /// Footprint including children; recomputed on every call because
    /// attachment counts change between renders.
    fn dimensions(&self) -> Dimensions {
        self.minimum_dimensions()
    }

    /// Drawing instructions with the frame placed at `offset`.
    fn definition(&self, offset: Offset) -> SvgDefinition;

    /// Scrubs references other records hold to this artifact.
    fn delete_children(&self, _document: &mut Document) {}

    /// Removes the artifact's own record, then its dependent references.
    fn delete(&self, document: &mut Document) {
        tracing::debug!(kind = %self.kind(), id = self.id(), "Delete");
        self.delete_children(document);
        document.remove_record(self.kind(), self.id());
    }
}

/// Lightweight description of a resolved parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParentRef {
    pub kind: ArtifactKind,
    pub id: String,
    pub display_name: String,
}

/// Finds the artifact a node is drawn inside.
pub trait ParentResolver: Send + Sync {
    fn parent_id(&self) -> Option<&str>;

    fn resolve(&self, document: &Document) -> Option<ParentRef>;

    fn clone_box(&self) -> Box<dyn ParentResolver>;
}

/// Parent handed in by whoever built the node.
#[derive(Clone, Debug)]
pub struct DirectParent(pub ParentRef);

impl ParentResolver for DirectParent {
    fn parent_id(&self) -> Option<&str> {
        Some(&self.0.id)
    }

    fn resolve(&self, _document: &Document) -> Option<ParentRef> {
        Some(self.0.clone())
    }

    fn clone_box(&self) -> Box<dyn ParentResolver> {
        Box::new(self.clone())
    }
}

/// Parent looked up by id in the document's subnet collection.
#[derive(Clone, Debug, Default)]
pub struct SubnetLookup {
    parent_id: Option<String>,
}

impl SubnetLookup {
    pub fn new(parent_id: Option<&str>) -> Self {
        Self {
            parent_id: parent_id.map(str::to_string),
        }
    }
}

impl ParentResolver for SubnetLookup {
    fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    fn resolve(&self, document: &Document) -> Option<ParentRef> {
        let id = self.parent_id.as_deref()?;
        document.get_subnet(id).map(|subnet| ParentRef {
            kind: ArtifactKind::Subnet,
            id: subnet.id.clone(),
            display_name: subnet.display_name.clone(),
        })
    }

    fn clone_box(&self) -> Box<dyn ParentResolver> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubnetRecord;

    #[test]
    fn instance_drops_onto_subnets_and_connects_to_load_balancers() {
        assert_eq!(ArtifactKind::Instance.drop_targets(), &[ArtifactKind::Subnet]);
        assert_eq!(ArtifactKind::Instance.connect_targets(), &[ArtifactKind::LoadBalancer]);
        assert_eq!(ArtifactKind::Instance.reference(), "Instance");
    }

    #[test]
    fn subnet_lookup_resolves_by_id_or_yields_none() {
        let mut document = Document::default();
        document.subnets.push(SubnetRecord {
            id: "sn-1".into(),
            display_name: "Public".into(),
            ..SubnetRecord::default()
        });
        let found = SubnetLookup::new(Some("sn-1")).resolve(&document);
        assert_eq!(found.map(|p| p.display_name), Some("Public".to_string()));
        assert!(SubnetLookup::new(Some("missing")).resolve(&document).is_none());
        assert!(SubnetLookup::new(None).resolve(&document).is_none());
    }

    #[test]
    fn direct_parent_ignores_document() {
        let parent = DirectParent(ParentRef {
            kind: ArtifactKind::Subnet,
            id: "injected".into(),
            display_name: "Injected".into(),
        });
        let resolved = parent.resolve(&Document::default());
        assert_eq!(resolved.map(|p| p.id), Some("injected".to_string()));
        assert_eq!(parent.parent_id(), Some("injected"));
    }
}

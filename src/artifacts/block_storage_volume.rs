use crate::config::LayoutConfig;
use crate::models::{BlockStorageVolumeRecord, Dimensions, Offset};

use super::{Artifact, ArtifactKind, SvgDefinition};

/// A block storage volume, drawn as an icon. When built as an attachment
/// the parent is the instance it hangs from rather than its compartment.
#[derive(Clone, Debug)]
pub struct BlockStorageVolume {
    record: BlockStorageVolumeRecord,
    parent_id: Option<String>,
    layout: LayoutConfig,
}

impl BlockStorageVolume {
    pub fn attached_to(record: BlockStorageVolumeRecord, instance_id: &str, layout: LayoutConfig) -> Self {
        Self {
            record,
            parent_id: Some(instance_id.to_string()),
            layout,
        }
    }

    pub fn record(&self) -> &BlockStorageVolumeRecord {
        &self.record
    }
}

impl Artifact for BlockStorageVolume {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::BlockStorageVolume
    }

    fn id(&self) -> &str {
        &self.record.id
    }

    fn display_name(&self) -> &str {
        &self.record.display_name
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
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
        definition.push_data("data-size-in-gbs", &self.record.size_in_gbs);
        definition
    }
}

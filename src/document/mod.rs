//! The diagram document: one JSON tree of typed resource collections.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::artifacts::{Artifact, ArtifactKind, Instance};
use crate::config::LayoutConfig;
use crate::error::DocumentError;
use crate::models::{
    AutonomousDatabaseRecord, BlockStorageVolumeRecord, CompartmentRecord, Identified, InstancePatch,
    InstanceRecord, LoadBalancerRecord, ObjectStorageBucketRecord, SubnetRecord,
};
use crate::utils::generate_artifact_id;

pub mod persist;
pub mod store;

pub use persist::{read_document, write_document};
pub use store::{DocumentStore, Regions};

/// Prefix shared by every generated display name.
pub const NAME_PREFIX: &str = "okit";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub title: String,
    pub description: String,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub compartments: Vec<CompartmentRecord>,
    pub subnets: Vec<SubnetRecord>,
    pub instances: Vec<InstanceRecord>,
    pub block_storage_volumes: Vec<BlockStorageVolumeRecord>,
    pub load_balancers: Vec<LoadBalancerRecord>,
    pub autonomous_databases: Vec<AutonomousDatabaseRecord>,
    pub object_storage_buckets: Vec<ObjectStorageBucketRecord>,
    /// Collections this build does not model, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partial document merged into an existing one, e.g. a query response.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DocumentPatch {
    pub compartments: Vec<CompartmentRecord>,
    pub subnets: Vec<SubnetRecord>,
    pub instances: Vec<InstancePatch>,
    pub block_storage_volumes: Vec<BlockStorageVolumeRecord>,
    pub load_balancers: Vec<LoadBalancerRecord>,
    pub autonomous_databases: Vec<AutonomousDatabaseRecord>,
    pub object_storage_buckets: Vec<ObjectStorageBucketRecord>,
}

impl DocumentPatch {
    pub fn instances(instances: Vec<InstancePatch>) -> Self {
        Self {
            instances,
            ..Self::default()
        }
    }
}

fn find<'a, T: Identified>(records: &'a [T], id: &str) -> Option<&'a T> {
    records.iter().find(|r| r.id() == id)
}

/// Replaces the record with the same id in place, or appends.
fn upsert<T: Identified>(records: &mut Vec<T>, record: T) {
    match records.iter().position(|r| r.id() == record.id()) {
        Some(index) => records[index] = record,
        None => records.push(record),
    }
}

fn remove<T: Identified>(records: &mut Vec<T>, id: &str) -> bool {
    let before = records.len();
    records.retain(|r| r.id() != id);
    records.len() != before
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            title: title.into(),
            created: Some(now),
            updated: Some(now),
            ..Self::default()
        }
    }

    pub fn touch(&mut self) {
        self.updated = Some(Utc::now());
    }

    pub fn get_instance(&self, id: &str) -> Option<&InstanceRecord> {
        find(&self.instances, id)
    }

    pub fn get_instance_mut(&mut self, id: &str) -> Option<&mut InstanceRecord> {
        self.instances.iter_mut().find(|r| r.id == id)
    }

    pub fn get_subnet(&self, id: &str) -> Option<&SubnetRecord> {
        find(&self.subnets, id)
    }

    pub fn get_block_storage_volume(&self, id: &str) -> Option<&BlockStorageVolumeRecord> {
        find(&self.block_storage_volumes, id)
    }

    pub fn get_load_balancer(&self, id: &str) -> Option<&LoadBalancerRecord> {
        find(&self.load_balancers, id)
    }

    pub fn get_compartment(&self, id: &str) -> Option<&CompartmentRecord> {
        find(&self.compartments, id)
    }

    pub fn get_autonomous_database(&self, id: &str) -> Option<&AutonomousDatabaseRecord> {
        find(&self.autonomous_databases, id)
    }

    pub fn contains(&self, kind: ArtifactKind, id: &str) -> bool {
        match kind {
            ArtifactKind::Compartment => self.get_compartment(id).is_some(),
            ArtifactKind::Subnet => self.get_subnet(id).is_some(),
            ArtifactKind::Instance => self.get_instance(id).is_some(),
            ArtifactKind::BlockStorageVolume => self.get_block_storage_volume(id).is_some(),
            ArtifactKind::LoadBalancer => self.get_load_balancer(id).is_some(),
            ArtifactKind::AutonomousDatabase => self.get_autonomous_database(id).is_some(),
            ArtifactKind::ObjectStorageBucket => find(&self.object_storage_buckets, id).is_some(),
            ArtifactKind::VirtualNetworkInterface => false,
        }
    }

    /// Default display name for the next artifact of `kind`, numbered by
    /// its 1-based position in the collection.
    pub fn generate_default_name(&self, kind: ArtifactKind, position: usize) -> String {
        format!("{}-{}{:03}", NAME_PREFIX, kind.prefix(), position)
    }

    /// Creates an instance from a partial payload and appends it.
    pub fn new_instance(&mut self, patch: InstancePatch) -> String {
        let id = generate_artifact_id(ArtifactKind::Instance.prefix());
        let name = self.generate_default_name(ArtifactKind::Instance, self.instances.len() + 1);
        let record = InstanceRecord::from_patch(id, name, patch);
        let id = record.id.clone();
        tracing::info!(%id, name = %record.display_name, parent = ?record.parent_id, "New instance");
        self.instances.push(record);
        self.touch();
        id
    }

    /// Drops a new instance onto `parent_id`, which must be a subnet.
    pub fn drop_instance(&mut self, parent_id: &str, mut patch: InstancePatch) -> Result<String, DocumentError> {
        let valid = ArtifactKind::Instance
            .drop_targets()
            .iter()
            .any(|target| self.contains(*target, parent_id));
        if !valid {
            return Err(DocumentError::InvalidDropTarget {
                child: ArtifactKind::Instance,
                target: parent_id.to_string(),
            });
        }
        patch.parent_id = Some(parent_id.to_string());
        Ok(self.new_instance(patch))
    }

    pub fn update_instance(&mut self, id: &str, patch: InstancePatch) -> Result<&InstanceRecord, DocumentError> {
        let record = self.get_instance_mut(id).ok_or_else(|| DocumentError::NotFound {
            kind: ArtifactKind::Instance,
            id: id.to_string(),
        })?;
        record.merge(patch);
        self.touch();
        self.get_instance(id).ok_or_else(|| DocumentError::NotFound {
            kind: ArtifactKind::Instance,
            id: id.to_string(),
        })
    }

    /// Removes the instance and scrubs its id from every load balancer's
    /// member list. Attached volumes and subnets are referenced, not owned,
    /// and stay in the document.
    pub fn delete_instance(&mut self, id: &str) -> Result<InstanceRecord, DocumentError> {
        let instance = Instance::from_document(self, id, LayoutConfig::default()).ok_or_else(|| {
            DocumentError::NotFound {
                kind: ArtifactKind::Instance,
                id: id.to_string(),
            }
        })?;
        instance.delete(self);
        tracing::info!(%id, "Deleted instance");
        Ok(instance.into_record())
    }

    pub fn remove_load_balancer_member(&mut self, instance_id: &str) {
        for load_balancer in &mut self.load_balancers {
            load_balancer.instance_ids.retain(|id| id != instance_id);
        }
    }

    /// Removes the record of `kind` with `id`; returns whether one existed.
    pub fn remove_record(&mut self, kind: ArtifactKind, id: &str) -> bool {
        let removed = match kind {
            ArtifactKind::Compartment => remove(&mut self.compartments, id),
            ArtifactKind::Subnet => remove(&mut self.subnets, id),
            ArtifactKind::Instance => remove(&mut self.instances, id),
            ArtifactKind::BlockStorageVolume => remove(&mut self.block_storage_volumes, id),
            ArtifactKind::LoadBalancer => remove(&mut self.load_balancers, id),
            ArtifactKind::AutonomousDatabase => remove(&mut self.autonomous_databases, id),
            ArtifactKind::ObjectStorageBucket => remove(&mut self.object_storage_buckets, id),
            ArtifactKind::VirtualNetworkInterface => false,
        };
        if removed {
            self.touch();
        }
        removed
    }

    /// Brings records read as a whole document up to the invariants the
    /// editor relies on: every instance has a unique id, a name, a hostname
    /// and a primary subnet taken from its parent.
    pub fn normalize(&mut self) {
        let mut seen = HashSet::new();
        for index in 0..self.instances.len() {
            let id = self.instances[index].id.clone();
            if id.is_empty() || !seen.insert(id.clone()) {
                let generated = generate_artifact_id(ArtifactKind::Instance.prefix());
                tracing::warn!(old = %id, new = %generated, "Instance id missing or duplicated; assigning a new one");
                seen.insert(generated.clone());
                self.instances[index].id = generated;
            }
            if self.instances[index].display_name.is_empty() {
                let name = self.generate_default_name(ArtifactKind::Instance, index + 1);
                self.instances[index].display_name = name;
            }
            self.instances[index].fill_derived_defaults();
        }
    }

    /// Merges a partial document. Records whose id is already present are
    /// updated in place; the rest are appended. Instances missing an id are
    /// created with generated defaults.
    pub fn load(&mut self, patch: DocumentPatch) {
        let DocumentPatch {
            compartments,
            subnets,
            instances,
            block_storage_volumes,
            load_balancers,
            autonomous_databases,
            object_storage_buckets,
        } = patch;

        for record in compartments {
            upsert(&mut self.compartments, record);
        }
        for record in subnets {
            upsert(&mut self.subnets, record);
        }
        for record in block_storage_volumes {
            upsert(&mut self.block_storage_volumes, record);
        }
        for record in load_balancers {
            upsert(&mut self.load_balancers, record);
        }
        for record in autonomous_databases {
            upsert(&mut self.autonomous_databases, record);
        }
        for record in object_storage_buckets {
            upsert(&mut self.object_storage_buckets, record);
        }
        for instance in instances {
            let existing = instance.id.as_deref().and_then(|id| self.get_instance_mut(id));
            match existing {
                Some(record) => record.merge(instance),
                None => {
                    self.new_instance(instance);
                }
            }
        }
        self.touch();
    }
}

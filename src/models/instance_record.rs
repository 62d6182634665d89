use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::{optional_string_or_number, string_or_number};

pub const DEFAULT_AVAILABILITY_DOMAIN: &str = "1";
pub const DEFAULT_OS: &str = "Oracle Linux";
pub const DEFAULT_OS_VERSION: &str = "7.7";
pub const DEFAULT_SHAPE: &str = "VM.Standard2.1";
pub const DEFAULT_BOOT_VOLUME_SIZE_IN_GBS: &str = "50";

/// A compute instance as stored in the diagram document.
///
/// Fields the schema does not know about are kept in `extra` and written
/// back out unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceRecord {
    pub id: String,
    pub display_name: String,
    pub parent_id: Option<String>,
    pub compartment_id: String,
    pub subnet_id: String,
    pub availability_domain: String,
    pub hostname_label: String,
    pub os: String,
    pub version: String,
    pub shape: String,
    #[serde(deserialize_with = "string_or_number")]
    pub boot_volume_size_in_gbs: String,
    pub authorized_keys: String,
    pub cloud_init_yaml: String,
    pub block_storage_volume_ids: Vec<String>,
    pub object_storage_bucket_ids: Vec<String>,
    pub autonomous_database_ids: Vec<String>,
    /// Additional subnets, each drawn as a secondary network interface.
    pub subnet_ids: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for InstanceRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            display_name: String::new(),
            parent_id: None,
            compartment_id: String::new(),
            subnet_id: String::new(),
            availability_domain: DEFAULT_AVAILABILITY_DOMAIN.into(),
            hostname_label: String::new(),
            os: DEFAULT_OS.into(),
            version: DEFAULT_OS_VERSION.into(),
            shape: DEFAULT_SHAPE.into(),
            boot_volume_size_in_gbs: DEFAULT_BOOT_VOLUME_SIZE_IN_GBS.into(),
            authorized_keys: String::new(),
            cloud_init_yaml: String::new(),
            block_storage_volume_ids: vec![],
            object_storage_bucket_ids: vec![],
            autonomous_database_ids: vec![],
            subnet_ids: vec![],
            extra: Map::new(),
        }
    }
}

impl InstanceRecord {
    /// Builds a record from a partial payload. The generated id and name are
    /// used unless the payload carries its own; every other absent field
    /// takes its documented default.
    pub fn from_patch(id: String, display_name: String, patch: InstancePatch) -> Self {
        let mut record = Self {
            id,
            hostname_label: display_name.to_lowercase(),
            display_name,
            subnet_id: patch.parent_id.clone().unwrap_or_default(),
            parent_id: patch.parent_id.clone(),
            ..Self::default()
        };
        record.merge(patch);
        record.fill_derived_defaults();
        record
    }

    /// Fills fields whose default is derived from other fields: the primary
    /// subnet from the parent and the hostname from the display name.
    pub fn fill_derived_defaults(&mut self) {
        if self.subnet_id.is_empty() {
            if let Some(parent_id) = &self.parent_id {
                self.subnet_id = parent_id.clone();
            }
        }
        if self.hostname_label.is_empty() {
            self.hostname_label = self.display_name.to_lowercase();
        }
        self.exclude_primary_subnet();
    }

    /// The primary subnet is never also an additional subnet.
    pub fn exclude_primary_subnet(&mut self) {
        if self.subnet_id.is_empty() {
            return;
        }
        let primary = self.subnet_id.as_str();
        self.subnet_ids.retain(|id| id != primary);
    }

    /// Overwrites the fields present in `patch`, leaving the rest untouched.
    pub fn merge(&mut self, patch: InstancePatch) {
        let InstancePatch {
            id,
            display_name,
            parent_id,
            compartment_id,
            subnet_id,
            availability_domain,
            hostname_label,
            os,
            version,
            shape,
            boot_volume_size_in_gbs,
            authorized_keys,
            cloud_init_yaml,
            block_storage_volume_ids,
            object_storage_bucket_ids,
            autonomous_database_ids,
            subnet_ids,
            extra,
        } = patch;

        if let Some(v) = id { self.id = v; }
        if let Some(v) = display_name { self.display_name = v; }
        if let Some(v) = parent_id { self.parent_id = Some(v); }
        if let Some(v) = compartment_id { self.compartment_id = v; }
        if let Some(v) = subnet_id { self.subnet_id = v; }
        if let Some(v) = availability_domain { self.availability_domain = v; }
        if let Some(v) = hostname_label { self.hostname_label = v; }
        if let Some(v) = os { self.os = v; }
        if let Some(v) = version { self.version = v; }
        if let Some(v) = shape { self.shape = v; }
        if let Some(v) = boot_volume_size_in_gbs { self.boot_volume_size_in_gbs = v; }
        if let Some(v) = authorized_keys { self.authorized_keys = v; }
        if let Some(v) = cloud_init_yaml { self.cloud_init_yaml = v; }
        if let Some(v) = block_storage_volume_ids { self.block_storage_volume_ids = v; }
        if let Some(v) = object_storage_bucket_ids { self.object_storage_bucket_ids = v; }
        if let Some(v) = autonomous_database_ids { self.autonomous_database_ids = v; }
        if let Some(v) = subnet_ids { self.subnet_ids = v; }
        for (key, value) in extra {
            self.extra.insert(key, value);
        }
        self.exclude_primary_subnet();
    }

    /// Number of children drawn along the bottom edge.
    pub fn bottom_edge_attachment_count(&self) -> usize {
        self.block_storage_volume_ids.len() + self.subnet_ids.len()
    }
}

/// Partial instance payload: every field optional, unknown keys retained.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstancePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compartment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_string_or_number"
    )]
    pub boot_volume_size_in_gbs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorized_keys: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_init_yaml: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_storage_volume_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_storage_bucket_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autonomous_database_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_ids: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InstancePatch {
    pub fn with_parent(parent_id: impl Into<String>) -> Self {
        Self {
            parent_id: Some(parent_id.into()),
            ..Self::default()
        }
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::string_or_number;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockStorageVolumeRecord {
    pub id: String,
    pub display_name: String,
    pub compartment_id: String,
    pub availability_domain: String,
    #[serde(deserialize_with = "string_or_number")]
    pub size_in_gbs: String,
    pub backup_policy: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for BlockStorageVolumeRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            display_name: String::new(),
            compartment_id: String::new(),
            availability_domain: "1".into(),
            size_in_gbs: "1024".into(),
            backup_policy: "bronze".into(),
            extra: Map::new(),
        }
    }
}

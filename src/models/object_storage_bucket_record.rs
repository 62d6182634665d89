use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectStorageBucketRecord {
    pub id: String,
    pub display_name: String,
    pub compartment_id: String,
    pub name: String,
    pub namespace: String,
    pub storage_tier: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

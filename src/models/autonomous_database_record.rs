use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutonomousDatabaseRecord {
    pub id: String,
    pub display_name: String,
    pub compartment_id: String,
    pub db_name: String,
    pub db_workload: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadBalancerRecord {
    pub id: String,
    pub display_name: String,
    pub compartment_id: String,
    pub subnet_ids: Vec<String>,
    /// Backend members; instance ids connected to this load balancer.
    pub instance_ids: Vec<String>,
    pub is_private: bool,
    pub shape: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

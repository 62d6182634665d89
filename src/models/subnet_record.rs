use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubnetRecord {
    pub id: String,
    pub display_name: String,
    pub compartment_id: String,
    pub vcn_id: String,
    pub cidr_block: String,
    pub dns_label: String,
    pub prohibit_public_ip_on_vnic: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

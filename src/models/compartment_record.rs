use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompartmentRecord {
    pub id: String,
    pub display_name: String,
    /// Enclosing compartment; `None` for the root.
    pub parent_id: Option<String>,
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::models::InstancePatch;
use super::client::api_call;

pub const INSTANCE_ARTIFACTS_ENDPOINT: &str = "/oci/artifacts/Instance";

/// Filter sent with an instance listing request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceQuery {
    pub compartment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
}

/// List instances from the backend. Records come back in the document's
/// own schema and are returned as patches for merging.
pub async fn query_instances(
    client: &reqwest::Client,
    api_base_url: &str,
    query: &InstanceQuery,
) -> Result<Vec<InstancePatch>, QueryError> {
    tracing::info!(compartment = %query.compartment_id, subnet = ?query.subnet_id, "Instance Query");
    let body = serde_json::to_value(query).map_err(|e| QueryError::Decode(e.to_string()))?;
    let payload = api_call(client, api_base_url, "GET", INSTANCE_ARTIFACTS_ENDPOINT, Some(body)).await?;
    if !payload.is_array() {
        return Err(QueryError::Decode("expected a JSON list of instances".into()));
    }
    serde_json::from_value(payload).map_err(|e| QueryError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_body_omits_missing_subnet() {
        let query = InstanceQuery {
            compartment_id: "ocid1.compartment.x".into(),
            subnet_id: None,
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({"compartment_id": "ocid1.compartment.x"})
        );
    }
}

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use skyplan::api::{query_instances, set_silent, InstanceQuery, INSTANCE_ARTIFACTS_ENDPOINT};
use skyplan::error::QueryError;
use skyplan::models::{AppState, SubnetRecord};
use skyplan::services::{run_instance_query, INSTANCE_QUERY_CB};

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn list_instances(Json(filter): Json<Value>) -> Json<Value> {
    let subnet = filter["subnet_id"].as_str().unwrap_or("sn-1").to_string();
    Json(json!([
        {
            "id": "ocid1.instance.oc1..web",
            "display_name": "web-1",
            "parent_id": subnet,
            "subnet_id": subnet,
            "compartment_id": filter["compartment_id"],
            "boot_volume_size_in_gbs": 100,
            "lifecycle_state": "RUNNING"
        },
        {
            "id": "ocid1.instance.oc1..db",
            "display_name": "db-1",
            "parent_id": subnet,
            "subnet_id": subnet
        }
    ]))
}

fn state(base_url: String) -> AppState {
    set_silent(true);
    AppState::new(base_url, reqwest::Client::new())
}

#[tokio::test]
async fn query_sends_filter_and_decodes_records() {
    let base = spawn_backend(Router::new().route(INSTANCE_ARTIFACTS_ENDPOINT, get(list_instances))).await;
    set_silent(true);
    let query = InstanceQuery {
        compartment_id: "ocid1.compartment.oc1..c".into(),
        subnet_id: Some("sn-9".into()),
    };
    let patches = query_instances(&reqwest::Client::new(), &base, &query).await.unwrap();
    assert_eq!(patches.len(), 2);
    assert_eq!(patches[0].subnet_id.as_deref(), Some("sn-9"));
    assert_eq!(patches[0].compartment_id.as_deref(), Some("ocid1.compartment.oc1..c"));
    assert_eq!(patches[0].boot_volume_size_in_gbs.as_deref(), Some("100"));
}

#[tokio::test]
async fn successful_query_merges_redraws_and_ticks_progress() {
    let base = spawn_backend(Router::new().route(INSTANCE_ARTIFACTS_ENDPOINT, get(list_instances))).await;
    let state = state(base);
    state.document("eu-frankfurt-1").update(|doc| {
        doc.subnets.push(SubnetRecord {
            id: "sn-1".into(),
            display_name: "app".into(),
            ..SubnetRecord::default()
        })
    });

    let query = InstanceQuery {
        compartment_id: "ocid1.compartment.oc1..c".into(),
        subnet_id: None,
    };
    assert!(run_instance_query(&state, "eu-frankfurt-1", query.clone()).await);
    // A repeated query updates the same records.
    run_instance_query(&state, "eu-frankfurt-1", query).await;

    let document = state.document("eu-frankfurt-1").snapshot();
    assert_eq!(document.instances.len(), 2);
    let web = document.get_instance("ocid1.instance.oc1..web").unwrap();
    assert_eq!(web.display_name, "web-1");
    assert_eq!(web.os, "Oracle Linux");
    assert_eq!(web.extra["lifecycle_state"], "RUNNING");

    let canvas = state.last_canvas("eu-frankfurt-1").unwrap();
    assert!(canvas.node("ocid1.instance.oc1..web").is_some());
    assert!(canvas.node("ocid1.instance.oc1..db").is_some());
    assert!(state.progress.is_checked(INSTANCE_QUERY_CB));
}

#[tokio::test]
async fn backend_error_leaves_document_alone_but_completes_progress() {
    let router = Router::new().route(
        INSTANCE_ARTIFACTS_ENDPOINT,
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn_backend(router).await;
    let state = state(base.clone());

    let query = InstanceQuery {
        compartment_id: "c".into(),
        subnet_id: None,
    };
    let result = query_instances(&state.client, &base, &query).await;
    assert!(matches!(result, Err(QueryError::Status { status: 500, .. })));

    assert!(run_instance_query(&state, "us-ashburn-1", query).await);
    assert!(state.document("us-ashburn-1").snapshot().instances.is_empty());
    assert!(state.last_canvas("us-ashburn-1").is_none());
    assert!(state.progress.is_checked(INSTANCE_QUERY_CB));
    assert!(state.progress.is_complete());
}

#[tokio::test]
async fn unreachable_backend_still_completes_progress() {
    // Bind then drop to get a port nothing is listening on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let state = state(format!("http://{}", addr));
    let query = InstanceQuery {
        compartment_id: "c".into(),
        subnet_id: None,
    };
    run_instance_query(&state, "default", query).await;
    assert!(state.progress.is_checked(INSTANCE_QUERY_CB));
    assert!(state.document("default").snapshot().instances.is_empty());
}

#[tokio::test]
async fn non_list_payload_is_a_decode_error() {
    let router = Router::new().route(
        INSTANCE_ARTIFACTS_ENDPOINT,
        get(|| async { Json(json!({"error": "not a list"})) }),
    );
    let base = spawn_backend(router).await;
    set_silent(true);
    let query = InstanceQuery {
        compartment_id: "c".into(),
        subnet_id: None,
    };
    let result = query_instances(&reqwest::Client::new(), &base, &query).await;
    assert!(matches!(result, Err(QueryError::Decode(_))));
}

use serde_json::{json, Value};

use skyplan::models::{AppState, LoadBalancerRecord, SubnetRecord};
use skyplan::routes::build_router;

async fn spawn_app() -> (String, AppState) {
    let state = AppState::new("http://127.0.0.1:9".into(), reqwest::Client::new());
    state.document("uk-london-1").update(|doc| {
        for (id, name) in [("sn-1", "Public"), ("sn-2", "Private")] {
            doc.subnets.push(SubnetRecord {
                id: id.into(),
                display_name: name.into(),
                ..SubnetRecord::default()
            });
        }
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}/regions/uk-london-1", addr), state)
}

async fn drop_instance(client: &reqwest::Client, base: &str, body: Value) -> String {
    let resp = client.post(format!("{}/instances", base)).json(&body).send().await.unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    created["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn drop_edit_and_delete_an_instance() {
    let (base, state) = spawn_app().await;
    let client = reqwest::Client::new();

    let id = drop_instance(&client, &base, json!({"parent_id": "sn-1", "shape": "VM.Standard.E4.Flex"})).await;
    let record: Value = client.get(format!("{}/instances/{}", base, id)).send().await.unwrap().json().await.unwrap();
    assert_eq!(record["display_name"], "okit-in001");
    assert_eq!(record["shape"], "VM.Standard.E4.Flex");

    let resp = client
        .patch(format!("{}/instances/{}", base, id))
        .json(&json!({"subnet_ids": ["sn-2"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let canvas: Value = client.get(format!("{}/canvas", base)).send().await.unwrap().json().await.unwrap();
    let ids: Vec<&str> = canvas["nodes"].as_array().unwrap().iter().filter_map(|n| n["id"].as_str()).collect();
    assert!(ids.contains(&"sn-2-vnic"));

    state.document("uk-london-1").update(|doc| {
        doc.load_balancers.push(LoadBalancerRecord {
            id: "lb-1".into(),
            instance_ids: vec![id.clone()],
            ..LoadBalancerRecord::default()
        })
    });
    let resp = client.delete(format!("{}/instances/{}", base, id)).send().await.unwrap();
    assert_eq!(resp.status(), 204);
    let document = state.document("uk-london-1").snapshot();
    assert!(document.instances.is_empty());
    assert!(document.load_balancers[0].instance_ids.is_empty());

    let resp = client.delete(format!("{}/instances/{}", base, id)).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn dropping_outside_a_subnet_is_rejected() {
    let (base, _) = spawn_app().await;
    let resp = reqwest::Client::new()
        .post(format!("{}/instances", base))
        .json(&json!({"parent_id": "nowhere"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
}

#[tokio::test]
async fn property_sheet_hides_primary_subnet_and_writes_back() {
    let (base, state) = spawn_app().await;
    let client = reqwest::Client::new();
    let id = drop_instance(&client, &base, json!({"parent_id": "sn-1"})).await;

    let html = client
        .get(format!("{}/instances/{}/properties", base, id))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("<option value=\"sn-2\">Private</option>"));
    assert!(!html.contains("<option value=\"sn-1\""));
    assert!(html.contains("<span id=\"subnet_id\">Public</span>"));

    let resp = client
        .post(format!("{}/instances/{}/properties", base, id))
        .form(&[("field", "display_name"), ("value", "web-1")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);
    let resp = client
        .post(format!("{}/instances/{}/properties", base, id))
        .form(&[("field", "boot_volume_size_in_gbs"), ("value", "large")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let name = state
        .document("uk-london-1")
        .read(|doc| doc.get_instance(&id).map(|r| r.display_name.clone()));
    assert_eq!(name.as_deref(), Some("web-1"));
}

#[tokio::test]
async fn canvas_svg_is_served_uncached() {
    let (base, _) = spawn_app().await;
    let resp = reqwest::Client::new().get(format!("{}/canvas.svg", base)).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["content-type"], "image/svg+xml");
    assert_eq!(resp.headers()["cache-control"], "no-store");
    let svg = resp.text().await.unwrap();
    assert!(svg.contains("id=\"sn-1-svg\""));
}

#[tokio::test]
async fn replaced_document_is_normalized() {
    let (base, state) = spawn_app().await;
    let resp = reqwest::Client::new()
        .put(format!("{}/document", base))
        .json(&json!({
            "subnets": [{"id": "sn-1"}],
            "instances": [{"parent_id": "sn-1"}, {"parent_id": "sn-1"}]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let document = state.document("uk-london-1").snapshot();
    assert_eq!(document.instances.len(), 2);
    assert_ne!(document.instances[0].id, document.instances[1].id);
    assert!(document.instances.iter().all(|r| !r.id.is_empty() && r.subnet_id == "sn-1"));
}

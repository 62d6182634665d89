use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::error::{DocumentError, PropertyError};
use crate::handlers::helpers::{document_error_response, property_error_response, render_template};
use crate::models::{AppState, InstancePatch};
use crate::properties::{apply_property_edit, is_list_field, InstancePropertySheet, PropertyValue};
use crate::templates::InstancePropertiesTemplate;

#[derive(Deserialize)]
pub struct DropRequest {
    pub parent_id: String,
    #[serde(flatten)]
    pub data: InstancePatch,
}

/// Drop a new instance onto a subnet.
pub async fn instance_drop(
    State(state): State<AppState>,
    Path(region): Path<String>,
    Json(request): Json<DropRequest>,
) -> Response {
    let result = state
        .document(&region)
        .update(|document| document.drop_instance(&request.parent_id, request.data));
    match result {
        Ok(id) => {
            state.redraw(&region);
            (StatusCode::CREATED, Json(serde_json::json!({ "id": id }))).into_response()
        }
        Err(e) => document_error_response(e),
    }
}

pub async fn instance_get(
    State(state): State<AppState>,
    Path((region, instance_id)): Path<(String, String)>,
) -> Response {
    match state.document(&region).read(|document| document.get_instance(&instance_id).cloned()) {
        Some(record) => Json(record).into_response(),
        None => document_error_response(DocumentError::NotFound {
            kind: crate::artifacts::ArtifactKind::Instance,
            id: instance_id,
        }),
    }
}

pub async fn instance_patch(
    State(state): State<AppState>,
    Path((region, instance_id)): Path<(String, String)>,
    Json(patch): Json<InstancePatch>,
) -> Response {
    let result = state
        .document(&region)
        .update(|document| document.update_instance(&instance_id, patch).map(|r| r.clone()));
    match result {
        Ok(record) => {
            state.redraw(&region);
            Json(record).into_response()
        }
        Err(e) => document_error_response(e),
    }
}

pub async fn instance_delete(
    State(state): State<AppState>,
    Path((region, instance_id)): Path<(String, String)>,
) -> Response {
    let result = state
        .document(&region)
        .update(|document| document.delete_instance(&instance_id).map(|_| ()));
    match result {
        Ok(()) => {
            state.redraw(&region);
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => document_error_response(e),
    }
}

pub async fn instance_properties_get(
    State(state): State<AppState>,
    Path((region, instance_id)): Path<(String, String)>,
) -> Response {
    match state.document(&region).read(|document| InstancePropertySheet::load(document, &instance_id)) {
        Ok(sheet) => render_template(InstancePropertiesTemplate {
            region: &region,
            sheet: &sheet,
        }),
        Err(e) => document_error_response(e),
    }
}

/// Collects `field=<name>` and any number of `value=` pairs from a form
/// post into one property edit.
pub fn parse_property_form(pairs: Vec<(String, String)>) -> Result<(String, PropertyValue), PropertyError> {
    let mut field = None;
    let mut values = Vec::new();
    for (key, value) in pairs {
        match key.as_str() {
            "field" => field = Some(value),
            "value" => values.push(value),
            _ => {}
        }
    }
    let field = field.ok_or_else(|| PropertyError::UnknownField(String::new()))?;
    let value = match is_list_field(&field) {
        Some(true) => PropertyValue::List(values),
        Some(false) => PropertyValue::Text(values.pop().unwrap_or_default()),
        None => return Err(PropertyError::UnknownField(field)),
    };
    Ok((field, value))
}

pub async fn instance_properties_post(
    State(state): State<AppState>,
    Path((region, instance_id)): Path<(String, String)>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let result = parse_property_form(pairs).and_then(|(field, value)| {
        state
            .document(&region)
            .update(|document| apply_property_edit(document, &instance_id, &field, value))
    });
    match result {
        Ok(()) => {
            state.redraw(&region);
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => property_error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_pairs_become_list_or_text_values() {
        let (field, value) = parse_property_form(vec![
            ("field".into(), "subnet_ids".into()),
            ("value".into(), "sn-1".into()),
            ("value".into(), "sn-2".into()),
        ])
        .unwrap();
        assert_eq!(field, "subnet_ids");
        assert_eq!(value, PropertyValue::List(vec!["sn-1".into(), "sn-2".into()]));

        let (_, value) = parse_property_form(vec![
            ("field".into(), "shape".into()),
            ("value".into(), "VM.Standard2.2".into()),
        ])
        .unwrap();
        assert_eq!(value, PropertyValue::Text("VM.Standard2.2".into()));
    }

    #[test]
    fn form_without_known_field_is_rejected() {
        assert!(parse_property_form(vec![("value".into(), "x".into())]).is_err());
        assert!(parse_property_form(vec![("field".into(), "bogus".into())]).is_err());
    }
}

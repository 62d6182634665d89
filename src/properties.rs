//! Instance property sheet: form values, reference selectors and the
//! field-level write back into the document.

use serde::Serialize;

use crate::artifacts::ArtifactKind;
use crate::document::Document;
use crate::error::{DocumentError, PropertyError};
use crate::models::InstanceRecord;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

const AVAILABILITY_DOMAINS: [&str; 3] = ["1", "2", "3"];

/// Values and selector options for the instance property form.
#[derive(Clone, Debug, Serialize)]
pub struct InstancePropertySheet {
    pub record: InstanceRecord,
    pub availability_domain_options: Vec<SelectOption>,
    pub block_storage_volume_options: Vec<SelectOption>,
    /// Additional subnet choices; never includes the primary subnet.
    pub subnet_options: Vec<SelectOption>,
    pub primary_subnet_name: String,
}

impl InstancePropertySheet {
    pub fn load(document: &Document, id: &str) -> Result<Self, DocumentError> {
        let record = document
            .get_instance(id)
            .ok_or_else(|| DocumentError::NotFound {
                kind: ArtifactKind::Instance,
                id: id.to_string(),
            })?
            .clone();

        let mut availability_domain_options: Vec<SelectOption> = AVAILABILITY_DOMAINS
            .iter()
            .map(|ad| SelectOption {
                value: ad.to_string(),
                label: format!("AD-{}", ad),
                selected: record.availability_domain == *ad,
            })
            .collect();
        // Imported records carry the provider's full domain name.
        if !availability_domain_options.iter().any(|option| option.selected) {
            availability_domain_options.push(SelectOption {
                value: record.availability_domain.clone(),
                label: record.availability_domain.clone(),
                selected: true,
            });
        }
        let block_storage_volume_options = document
            .block_storage_volumes
            .iter()
            .map(|volume| SelectOption {
                value: volume.id.clone(),
                label: volume.display_name.clone(),
                selected: record.block_storage_volume_ids.contains(&volume.id),
            })
            .collect();
        let subnet_options = document
            .subnets
            .iter()
            .filter(|subnet| subnet.id != record.subnet_id)
            .map(|subnet| SelectOption {
                value: subnet.id.clone(),
                label: subnet.display_name.clone(),
                selected: record.subnet_ids.contains(&subnet.id),
            })
            .collect();
        let primary_subnet_name = document
            .get_subnet(&record.subnet_id)
            .map(|subnet| subnet.display_name.clone())
            .unwrap_or_default();

        Ok(Self {
            record,
            availability_domain_options,
            block_storage_volume_options,
            subnet_options,
            primary_subnet_name,
        })
    }
}

/// Value posted by a single form control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyValue {
    Text(String),
    List(Vec<String>),
}

impl PropertyValue {
    fn into_text(self, field: &str) -> Result<String, PropertyError> {
        match self {
            PropertyValue::Text(text) => Ok(text),
            PropertyValue::List(mut values) if values.len() <= 1 => Ok(values.pop().unwrap_or_default()),
            PropertyValue::List(_) => Err(PropertyError::InvalidValue {
                field: field.to_string(),
                expected: "a single value",
            }),
        }
    }

    fn into_list(self) -> Vec<String> {
        match self {
            PropertyValue::Text(text) if text.is_empty() => vec![],
            PropertyValue::Text(text) => vec![text],
            PropertyValue::List(values) => values.into_iter().filter(|v| !v.is_empty()).collect(),
        }
    }
}

/// Fields the instance form binds, with whether each takes a list.
pub const INSTANCE_FIELDS: &[(&str, bool)] = &[
    ("display_name", false),
    ("hostname_label", false),
    ("compartment_id", false),
    ("availability_domain", false),
    ("os", false),
    ("version", false),
    ("shape", false),
    ("boot_volume_size_in_gbs", false),
    ("authorized_keys", false),
    ("cloud_init_yaml", false),
    ("block_storage_volume_ids", true),
    ("subnet_ids", true),
    ("object_storage_bucket_ids", true),
    ("autonomous_database_ids", true),
];

pub fn is_list_field(field: &str) -> Option<bool> {
    INSTANCE_FIELDS.iter().find(|(name, _)| *name == field).map(|(_, list)| *list)
}

/// Writes one edited form field back into the instance record in place.
pub fn apply_property_edit(
    document: &mut Document,
    id: &str,
    field: &str,
    value: PropertyValue,
) -> Result<(), PropertyError> {
    let record = document.get_instance_mut(id).ok_or_else(|| DocumentError::NotFound {
        kind: ArtifactKind::Instance,
        id: id.to_string(),
    })?;

    match field {
        "display_name" => record.display_name = value.into_text(field)?,
        "hostname_label" => record.hostname_label = value.into_text(field)?,
        "compartment_id" => record.compartment_id = value.into_text(field)?,
        "availability_domain" => record.availability_domain = value.into_text(field)?,
        "os" => record.os = value.into_text(field)?,
        "version" => record.version = value.into_text(field)?,
        "shape" => record.shape = value.into_text(field)?,
        "boot_volume_size_in_gbs" => {
            let size = value.into_text(field)?;
            if size.trim().parse::<u64>().is_err() {
                return Err(PropertyError::InvalidValue {
                    field: field.to_string(),
                    expected: "a whole number of gigabytes",
                });
            }
            record.boot_volume_size_in_gbs = size.trim().to_string();
        }
        "authorized_keys" => record.authorized_keys = value.into_text(field)?,
        "cloud_init_yaml" => record.cloud_init_yaml = value.into_text(field)?,
        "block_storage_volume_ids" => record.block_storage_volume_ids = value.into_list(),
        "subnet_ids" => {
            record.subnet_ids = value.into_list();
            record.exclude_primary_subnet();
        }
        "object_storage_bucket_ids" => record.object_storage_bucket_ids = value.into_list(),
        "autonomous_database_ids" => record.autonomous_database_ids = value.into_list(),
        other => return Err(PropertyError::UnknownField(other.to_string())),
    }
    tracing::debug!(%id, field, "Property updated");
    document.touch();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InstancePatch, SubnetRecord};

    fn document() -> (Document, String) {
        let mut document = Document::default();
        for (id, name) in [("sn-1", "Public"), ("sn-2", "Private"), ("sn-3", "Data")] {
            document.subnets.push(SubnetRecord {
                id: id.into(),
                display_name: name.into(),
                ..SubnetRecord::default()
            });
        }
        let id = document.new_instance(InstancePatch::with_parent("sn-1"));
        (document, id)
    }

    #[test]
    fn text_edit_assigns_the_field() {
        let (mut document, id) = document();
        apply_property_edit(&mut document, &id, "shape", PropertyValue::Text("VM.Standard.E4.Flex".into())).unwrap();
        assert_eq!(document.get_instance(&id).unwrap().shape, "VM.Standard.E4.Flex");
    }

    #[test]
    fn subnet_list_drops_the_primary_subnet() {
        let (mut document, id) = document();
        apply_property_edit(
            &mut document,
            &id,
            "subnet_ids",
            PropertyValue::List(vec!["sn-1".into(), "sn-3".into()]),
        )
        .unwrap();
        assert_eq!(document.get_instance(&id).unwrap().subnet_ids, vec!["sn-3".to_string()]);
    }

    #[test]
    fn bad_values_and_fields_are_rejected() {
        let (mut document, id) = document();
        assert!(matches!(
            apply_property_edit(&mut document, &id, "boot_volume_size_in_gbs", PropertyValue::Text("big".into())),
            Err(PropertyError::InvalidValue { .. })
        ));
        assert!(matches!(
            apply_property_edit(&mut document, &id, "lifecycle_state", PropertyValue::Text("x".into())),
            Err(PropertyError::UnknownField(_))
        ));
        assert!(matches!(
            apply_property_edit(&mut document, "missing", "os", PropertyValue::Text("x".into())),
            Err(PropertyError::Document(DocumentError::NotFound { .. }))
        ));
    }

    #[test]
    fn unknown_availability_domain_stays_selected() {
        let (mut document, id) = document();
        document.get_instance_mut(&id).unwrap().availability_domain = "Uocm:PHX-AD-2".into();
        let sheet = InstancePropertySheet::load(&document, &id).unwrap();
        let selected: Vec<_> = sheet
            .availability_domain_options
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.value.as_str())
            .collect();
        assert_eq!(selected, vec!["Uocm:PHX-AD-2"]);
        assert_eq!(sheet.availability_domain_options.len(), 4);

        document.get_instance_mut(&id).unwrap().availability_domain = "2".into();
        let sheet = InstancePropertySheet::load(&document, &id).unwrap();
        assert_eq!(sheet.availability_domain_options.len(), 3);
        assert!(sheet.availability_domain_options[1].selected);
    }

    #[test]
    fn field_table_knows_list_fields() {
        assert_eq!(is_list_field("subnet_ids"), Some(true));
        assert_eq!(is_list_field("shape"), Some(false));
        assert_eq!(is_list_field("nope"), None);
    }
}

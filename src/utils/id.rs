use uuid::Uuid;

/// Generates `okit-<prefix>-<uuid v4>`.
pub fn generate_artifact_id(prefix: &str) -> String {
    format!("okit-{}-{}", prefix, Uuid::new_v4())
}

/// Makes an id usable inside CSS selectors and SVG element ids.
pub fn safe_id(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_uuid_shaped_and_unique() {
        let a = generate_artifact_id("in");
        let b = generate_artifact_id("in");
        assert_ne!(a, b);
        assert!(a.starts_with("okit-in-"));
        let body = a.trim_start_matches("okit-in-");
        assert_eq!(body.len(), 36);
        assert_eq!(body.chars().nth(14), Some('4'));
    }

    #[test]
    fn safe_id_replaces_selector_characters() {
        assert_eq!(safe_id("ocid1.instance.oc1..aaa"), "ocid1-instance-oc1--aaa");
    }
}

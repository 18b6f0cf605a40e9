//! Schema validation (§4.K): collects every failure rather than
//! stopping at the first; the schema is rejected only if at least one
//! failure was recorded.

use serde_json::Value;

/// The outcome of validating a raw (pre-typed) schema document.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaValidation {
    pub failures: Vec<String>,
}

impl SchemaValidation {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Validate a schema document represented as raw JSON (so validation
/// can run before — and independently of — strict deserialization).
pub fn validate(doc: &Value) -> SchemaValidation {
    let mut failures = Vec::new();

    if doc.get("version").and_then(Value::as_str).is_none() {
        failures.push("missing or non-string 'version'".to_string());
    }

    match doc.get("project") {
        None => failures.push("missing 'project'".to_string()),
        Some(project) => {
            for field in ["width", "height", "fps", "duration"] {
                match project.get(field).and_then(Value::as_f64) {
                    Some(v) if v > 0.0 => {}
                    Some(_) => failures.push(format!("project.{field} must be > 0")),
                    None => failures.push(format!("missing or non-numeric project.{field}")),
                }
            }
        }
    }

    match doc.get("layers") {
        Some(Value::Array(_)) => {}
        Some(_) => failures.push("'layers' must be an array".to_string()),
        None => failures.push("missing 'layers'".to_string()),
    }

    SchemaValidation { failures }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_document_has_no_failures() {
        let doc = json!({
            "version": "1.0",
            "project": {"name": "p", "width": 1920.0, "height": 1080.0, "fps": 30.0, "duration": 10.0},
            "layers": [],
        });
        assert!(validate(&doc).is_valid());
    }

    #[test]
    fn missing_version_is_one_failure_among_several() {
        let doc = json!({"project": {"width": -1.0}, "layers": "nope"});
        let result = validate(&doc);
        assert!(!result.is_valid());
        assert!(result.failures.iter().any(|f| f.contains("version")));
        assert!(result.failures.iter().any(|f| f.contains("width")));
        assert!(result.failures.iter().any(|f| f.contains("layers")));
    }
}

//! Variable substitution (§4.K): a single text-replace pass over the
//! serialised schema, `{{name}}` -> value, schema variables overridden
//! by caller-supplied ones. Missing variables are preserved literally.

use std::collections::HashMap;

use serde_json::Value;

/// Substitute `{{name}}` occurrences in the serialised form of `schema`
/// using `schema_variables` merged with (and overridden by) `caller_variables`.
pub fn substitute_variables(
    serialized: &str,
    schema_variables: &HashMap<String, Value>,
    caller_variables: &HashMap<String, Value>,
) -> String {
    let mut merged = schema_variables.clone();
    for (k, v) in caller_variables {
        merged.insert(k.clone(), v.clone());
    }

    let mut out = String::with_capacity(serialized.len());
    let bytes = serialized.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'{' && i + 1 < bytes.len() && bytes[i + 1] == b'{' {
            if let Some(end) = serialized[i + 2..].find("}}") {
                let name = &serialized[i + 2..i + 2 + end];
                match merged.get(name) {
                    Some(Value::String(s)) => out.push_str(s),
                    Some(other) => out.push_str(&other.to_string()),
                    None => out.push_str(&serialized[i..i + 2 + end + 2]),
                }
                i += 2 + end + 2;
                continue;
            }
        }
        let ch = serialized[i..].chars().next().expect("i is a char boundary");
        out.push(ch);
        i += ch.len_utf8();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn caller_variables_override_schema_variables() {
        let schema_vars = HashMap::from([("title".to_string(), json!("Schema Title"))]);
        let caller_vars = HashMap::from([("title".to_string(), json!("Caller Title"))]);
        let out = substitute_variables("hello {{title}}", &schema_vars, &caller_vars);
        assert_eq!(out, "hello Caller Title");
    }

    #[test]
    fn missing_variable_is_preserved_literally() {
        let out = substitute_variables("hi {{missing}}", &HashMap::new(), &HashMap::new());
        assert_eq!(out, "hi {{missing}}");
    }

    #[test]
    fn non_string_values_are_json_encoded() {
        let schema_vars = HashMap::from([("count".to_string(), json!(3))]);
        let out = substitute_variables("n={{count}}", &schema_vars, &HashMap::new());
        assert_eq!(out, "n=3");
    }
}

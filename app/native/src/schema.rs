//! JSON Schema for the configuration file.

use crate::config::TilegapsConfig;

/// Identifier written into the generated schema.
const SCHEMA_ID: &str = "tilegaps.schema.json";

/// Generates a JSON Schema for the tilegaps configuration.
///
/// The schema includes all configuration options with their types,
/// descriptions, and default values.
#[must_use]
pub fn generate_schema() -> schemars::Schema {
    let mut schema = schemars::schema_for!(TilegapsConfig);

    if let Some(obj) = schema.as_object_mut() {
        obj.insert("$id".to_string(), serde_json::json!(SCHEMA_ID));
    }

    schema
}

/// Generates a pretty-printed JSON Schema string for the configuration.
#[must_use]
pub fn generate_schema_json() -> String {
    serde_json::to_string_pretty(&generate_schema()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_schema_produces_valid_json() {
        let parsed: serde_json::Value = serde_json::from_str(&generate_schema_json()).unwrap();

        assert_eq!(parsed["$id"], SCHEMA_ID);
        assert_eq!(parsed["$schema"], "https://json-schema.org/draft/2020-12/schema");
        assert_eq!(parsed["title"], "TilegapsConfig");
        assert!(parsed["properties"]["gaps"].is_object());
        assert!(parsed["properties"]["offsets"].is_object());
        assert!(parsed["properties"]["includeMaximized"].is_object());
    }

    #[test]
    fn test_schema_documents_gap_fields() {
        let json = generate_schema_json();
        assert!(json.contains("GapsConfig"));
        assert!(json.contains("Gap between two adjacent windows."));
    }
}

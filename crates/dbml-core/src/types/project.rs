use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::value::Value;

/// The `Project name { key: value ... }` block.
///
/// Properties are open-ended; a `note { ... }` block is stored under `note`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
}

impl Project {
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_lookup_and_serde() {
        let mut properties = BTreeMap::new();
        properties.insert("database_type".to_string(), Value::String("PostgreSQL".into()));
        let project = Project {
            name: Some("shop".into()),
            properties,
        };
        assert_eq!(
            project.property("database_type"),
            Some(&Value::String("PostgreSQL".into()))
        );
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "shop", "properties": {"database_type": "PostgreSQL"}})
        );
    }
}

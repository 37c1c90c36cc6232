use serde::{Deserialize, Serialize};

/// Configuration for a type comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Maximum number of type templates on a single comparison path,
    /// counting the logical-node type itself.
    pub max_depth: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        assert_eq!(DiffConfig::default().max_depth, 64);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let c: DiffConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(c, DiffConfig::default());

        let c: DiffConfig = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
        assert_eq!(c.max_depth, 8);
    }
}

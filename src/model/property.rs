use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// A named value stored by the gateway and referenced by template elsewhere
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResource {
    pub display_name: String,
    /// Always true for the master key property
    pub secret: bool,
    /// Wiped on drop. Secret values are omitted from read responses.
    #[serde(default)]
    pub value: Zeroizing<String>,
}

impl std::fmt::Debug for PropertyResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("PropertyResource");
        debug
            .field("display_name", &self.display_name)
            .field("secret", &self.secret);
        if !self.secret {
            debug.field("value", &self.value.as_str());
        }
        debug.finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_secret_value_read_back_without_value() {
        let property: PropertyResource = serde_json::from_value(json!({
            "displayName": "test-sls-key",
            "secret": true
        }))
        .unwrap();
        assert!(property.value.is_empty());
    }

    #[test]
    fn test_value_serializes_as_plain_string() {
        let property = PropertyResource {
            display_name: "test-sls-key".to_string(),
            secret: true,
            value: Zeroizing::new("ABC123".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&property).unwrap(),
            json!({ "displayName": "test-sls-key", "secret": true, "value": "ABC123" })
        );
        assert_eq!(format!("{property:?}"), "PropertyResource { display_name: \"test-sls-key\", secret: true, .. }");
    }
}

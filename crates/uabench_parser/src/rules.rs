//! Serde schema for uap-core style `regexes.yaml` rule sets.
//!
//! Three independent rule lists, evaluated first-match-wins per category.
//! Replacement strings may reference capture groups as `$1`..`$9`.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub user_agent_parsers: Vec<UserAgentRule>,
    #[serde(default)]
    pub os_parsers: Vec<OsRule>,
    #[serde(default)]
    pub device_parsers: Vec<DeviceRule>,
}

#[derive(Debug, Deserialize)]
pub struct UserAgentRule {
    pub regex: String,
    pub family_replacement: Option<String>,
    pub v1_replacement: Option<String>,
    pub v2_replacement: Option<String>,
    pub v3_replacement: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OsRule {
    pub regex: String,
    pub os_replacement: Option<String>,
    pub os_v1_replacement: Option<String>,
    pub os_v2_replacement: Option<String>,
    pub os_v3_replacement: Option<String>,
    pub os_v4_replacement: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeviceRule {
    pub regex: String,
    /// Only `"i"` (case-insensitive) is meaningful in uap-core data.
    pub regex_flag: Option<String>,
    pub device_replacement: Option<String>,
    pub brand_replacement: Option<String>,
    pub model_replacement: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_sparse_rule_set() {
        let yaml = r#"
user_agent_parsers:
  - regex: '(Firefox)/(\d+)\.(\d+)'
os_parsers:
  - regex: '(Windows NT) (\d+)'
    os_replacement: 'Windows'
"#;
        let rules: RuleSet = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rules.user_agent_parsers.len(), 1);
        assert_eq!(rules.os_parsers.len(), 1);
        assert!(rules.device_parsers.is_empty());
        assert_eq!(rules.os_parsers[0].os_replacement.as_deref(), Some("Windows"));
    }

    #[test]
    fn empty_document_yields_empty_lists() {
        let rules: RuleSet = serde_yaml::from_str("{}").unwrap();
        assert!(rules.user_agent_parsers.is_empty());
        assert!(rules.os_parsers.is_empty());
        assert!(rules.device_parsers.is_empty());
    }
}

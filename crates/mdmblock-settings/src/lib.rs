//! Blocklist config parsing and validation.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod format;
mod model;
mod resolve;

pub use format::ConfigFormat;
pub use model::{BlockListConfigV1, BlockRuleConfig, BlockedFieldConfig};

use mdmblock_domain::BlockList;

/// Parse blocklist JSON (HAPI `BlockListJson` shape) into a typed model.
pub fn parse_blocklist_json(input: &str) -> anyhow::Result<BlockListConfigV1> {
    let cfg: BlockListConfigV1 = serde_json::from_str(input)?;
    Ok(cfg)
}

/// Parse a blocklist TOML document into a typed model.
pub fn parse_blocklist_toml(input: &str) -> anyhow::Result<BlockListConfigV1> {
    let cfg: BlockListConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

pub fn parse_blocklist(input: &str, format: ConfigFormat) -> anyhow::Result<BlockListConfigV1> {
    match format {
        ConfigFormat::Json => parse_blocklist_json(input),
        ConfigFormat::Toml => parse_blocklist_toml(input),
    }
}

/// Validate a parsed config and build the blocklist used by the engine.
pub fn resolve_blocklist(cfg: BlockListConfigV1) -> anyhow::Result<BlockList> {
    resolve::resolve_blocklist(cfg)
}

/// Parse and resolve in one step. Blank input means "no rules configured".
pub fn load_blocklist(input: &str, format: ConfigFormat) -> anyhow::Result<Option<BlockList>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    let cfg = parse_blocklist(input, format)?;
    resolve_blocklist(cfg).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdmblock_domain::{BlockRule, BlockedField};

    const HAPI_JSON: &str = r#"{
        "blocklist": [
            {
                "resourceType": "Patient",
                "fields": [
                    { "fhirPath": "name.family", "value": "Smith" },
                    { "fhirPath": "gender", "value": "male" }
                ]
            },
            {
                "resourceType": "Practitioner",
                "fields": [ { "fhirPath": "active", "value": "false" } ]
            }
        ]
    }"#;

    #[test]
    fn parses_hapi_json_shape() {
        let list = load_blocklist(HAPI_JSON, ConfigFormat::Json)
            .expect("load")
            .expect("configured");

        assert_eq!(
            list.rules,
            vec![
                BlockRule::new(
                    "Patient",
                    vec![
                        BlockedField::new("name.family", "Smith"),
                        BlockedField::new("gender", "male"),
                    ]
                ),
                BlockRule::new("Practitioner", vec![BlockedField::new("active", "false")]),
            ]
        );
    }

    #[test]
    fn parses_toml_equivalent() {
        let input = r#"
schema = "mdmblock.blocklist.v1"

[[blocklist]]
resourceType = "Patient"

[[blocklist.fields]]
fhirPath = "name.family"
value = "Smith"
"#;
        let list = load_blocklist(input, ConfigFormat::Toml)
            .expect("load")
            .expect("configured");

        assert_eq!(list.rules.len(), 1);
        assert_eq!(list.rules[0].fields[0], BlockedField::new("name.family", "Smith"));
    }

    #[test]
    fn accepts_descriptive_field_aliases() {
        let input = r#"{"blocklist":[{"resourceType":"Patient",
            "fields":[{"path":"gender","blockedValue":"male"}]}]}"#;
        let list = load_blocklist(input, ConfigFormat::Json)
            .expect("load")
            .expect("configured");
        assert_eq!(list.rules[0].fields[0], BlockedField::new("gender", "male"));
    }

    #[test]
    fn blank_input_means_no_rules() {
        assert!(load_blocklist("", ConfigFormat::Json).expect("load").is_none());
        assert!(load_blocklist("  \n", ConfigFormat::Toml).expect("load").is_none());
    }

    #[test]
    fn empty_blocklist_is_configured_but_empty() {
        let list = load_blocklist(r#"{"blocklist": []}"#, ConfigFormat::Json)
            .expect("load")
            .expect("configured");
        assert!(list.is_empty());
    }

    #[test]
    fn rule_without_fields_is_kept() {
        let list = load_blocklist(
            r#"{"blocklist":[{"resourceType":"Patient"}]}"#,
            ConfigFormat::Json,
        )
        .expect("load")
        .expect("configured");
        assert!(list.rules[0].is_vacuous());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(load_blocklist("{ not json", ConfigFormat::Json).is_err());
        assert!(load_blocklist(r#"{"blocklist":[{"fields":[]}]}"#, ConfigFormat::Json).is_err());
    }
}

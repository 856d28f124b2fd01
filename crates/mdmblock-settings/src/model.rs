use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Blocklist document schema v1.
///
/// Field names follow the HAPI FHIR `BlockListJson` format so existing blocklist files load
/// unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BlockListConfigV1 {
    /// Optional schema string for tooling (`mdmblock.blocklist.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Rules, OR'd together.
    #[serde(default, rename = "blocklist")]
    pub rules: Vec<BlockRuleConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BlockRuleConfig {
    /// Resource type the rule applies to (exact, case-sensitive match).
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    /// Blocked fields, AND'd together. An empty list blocks every record of the type.
    #[serde(default)]
    pub fields: Vec<BlockedFieldConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BlockedFieldConfig {
    /// Path expression selecting exactly one primitive value.
    #[serde(rename = "fhirPath", alias = "path")]
    pub path: String,

    /// Value that blocks matching (case-insensitive).
    #[serde(rename = "value", alias = "blockedValue")]
    pub blocked_value: String,
}

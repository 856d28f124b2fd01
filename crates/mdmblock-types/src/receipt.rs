use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Stable schema identifiers.
pub const SCHEMA_DECISION_V1: &str = "mdmblock.decision.v1";
pub const SCHEMA_BLOCKLIST_V1: &str = "mdmblock.blocklist.v1";

/// Level at which an outcome is logged. Outcomes never change the decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeLevel {
    Trace,
    Debug,
    Warn,
}

/// One observed step of an evaluation: a condition that did not match, or a rule that blocked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConditionOutcome {
    pub level: OutcomeLevel,
    pub code: String,

    /// Index of the rule in the configured blocklist (not in the applicable subset).
    pub rule_index: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    pub message: String,

    /// Outcome-specific structured payload.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

/// The decision for a single record plus the trace that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct DecisionData {
    pub resource_type: String,
    pub blocked: bool,

    /// `false` when no rule provider is present or the provider has no blocklist.
    pub rules_configured: bool,
    pub rules_total: u32,
    pub rules_applicable: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking_rule: Option<u32>,

    #[serde(default)]
    pub outcomes: Vec<ConditionOutcome>,
}

impl DecisionData {
    /// Outcome codes in evaluation order.
    pub fn outcome_codes(&self) -> Vec<&str> {
        self.outcomes.iter().map(|o| o.code.as_str()).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RunMeta {
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub ended_at: OffsetDateTime,
    pub duration_ms: u64,
}

/// A generic receipt/envelope around the tool-specific decision payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DecisionReport<TData = DecisionData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    pub run: RunMeta,
    pub decision: TData,
}

pub type DecisionReportV1 = DecisionReport<DecisionData>;

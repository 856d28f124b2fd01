//! Stable DTOs and IDs used across the mdmblock workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted decision report
//! - stable string IDs and outcome codes
//! - explain registry for rule-authoring guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod receipt;

pub use explain::{Explanation, ExamplePair, lookup_explanation};
pub use receipt::{
    ConditionOutcome, DecisionData, DecisionReport, DecisionReportV1, OutcomeLevel, RunMeta,
    SCHEMA_BLOCKLIST_V1, SCHEMA_DECISION_V1, ToolMeta,
};

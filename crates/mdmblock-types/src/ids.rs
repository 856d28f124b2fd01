//! Stable identifiers for condition outcome codes.
//!
//! `code` is a short snake_case discriminator carried by every [`crate::ConditionOutcome`].

// Codes: a condition did not match
pub const CODE_PATH_EVALUATION_FAILED: &str = "path_evaluation_failed";
pub const CODE_AMBIGUOUS_RESULT: &str = "ambiguous_result";
pub const CODE_UNSUPPORTED_VALUE_KIND: &str = "unsupported_value_kind";
pub const CODE_VALUE_MISMATCH: &str = "value_mismatch";

// Codes: a rule blocked
pub const CODE_RULE_BLOCKED: &str = "rule_blocked";
pub const CODE_VACUOUS_RULE: &str = "vacuous_rule";

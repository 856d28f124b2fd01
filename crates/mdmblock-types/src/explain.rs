//! Explain registry for outcome codes.
//!
//! Maps outcome codes to human-readable explanations with rule-authoring guidance.

use crate::ids;

/// Explanation entry for an outcome code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the code.
    pub title: &'static str,
    /// When the code is produced and what it means for the decision.
    pub description: &'static str,
    /// How to adjust the rule or the data.
    pub remediation: &'static str,
    /// Before/after rule examples.
    pub examples: ExamplePair,
}

/// Before and after blocklist examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// A rule that produces the code.
    pub before: &'static str,
    /// A rule that evaluates as intended.
    pub after: &'static str,
}

/// Look up an explanation by outcome code.
///
/// Returns `None` if the code is not recognized.
pub fn lookup_explanation(code: &str) -> Option<Explanation> {
    match code {
        ids::CODE_PATH_EVALUATION_FAILED => Some(explain_path_evaluation_failed()),
        ids::CODE_AMBIGUOUS_RESULT => Some(explain_ambiguous_result()),
        ids::CODE_UNSUPPORTED_VALUE_KIND => Some(explain_unsupported_value_kind()),
        ids::CODE_VALUE_MISMATCH => Some(explain_value_mismatch()),
        ids::CODE_RULE_BLOCKED => Some(explain_rule_blocked()),
        ids::CODE_VACUOUS_RULE => Some(explain_vacuous_rule()),
        _ => None,
    }
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_PATH_EVALUATION_FAILED,
        ids::CODE_AMBIGUOUS_RESULT,
        ids::CODE_UNSUPPORTED_VALUE_KIND,
        ids::CODE_VALUE_MISMATCH,
        ids::CODE_RULE_BLOCKED,
        ids::CODE_VACUOUS_RULE,
    ]
}

fn explain_path_evaluation_failed() -> Explanation {
    Explanation {
        title: "Path Evaluation Failed",
        description: "\
The path expression of a blocked field could not be evaluated against the record.

This happens when the expression is malformed, uses a function or operator the
configured evaluator does not support, or fails while executing. The condition is
treated as not matching, so the rule does not block. Other rules are still evaluated.",
        remediation: "\
Simplify the expression to plain member navigation, for example `name.family`
or `Patient.birthDate`. Check the expression against a sample record before
deploying the blocklist.",
        examples: ExamplePair {
            before: r#"{ "fhirPath": "name.where(use = 'official').family", "value": "Smith" }"#,
            after: r#"{ "fhirPath": "name.family", "value": "Smith" }"#,
        },
    }
}

fn explain_ambiguous_result() -> Explanation {
    Explanation {
        title: "Ambiguous Path Result",
        description: "\
The path expression returned zero values or more than one value.

Blocking is only defined for a single, exact field value. A missing field or a
repeating element (several names, several identifiers) never blocks.",
        remediation: "\
Point the expression at a field that occurs exactly once in the records you want
to block, or narrow a repeating element to a single occurrence.",
        examples: ExamplePair {
            before: r#"{ "fhirPath": "identifier.value", "value": "12345" }"#,
            after: r#"{ "fhirPath": "birthDate", "value": "1990-01-01" }"#,
        },
    }
}

fn explain_unsupported_value_kind() -> Explanation {
    Explanation {
        title: "Unsupported Value Kind",
        description: "\
The path expression returned a structured value instead of a primitive one.

Only primitive values (strings, codes, identifiers, URIs, booleans, numbers and
dates/times) can be compared with a blocked value. Structured values such as a
HumanName or an Address never block.",
        remediation: "\
Extend the expression down to a primitive child element of the structured value.",
        examples: ExamplePair {
            before: r#"{ "fhirPath": "name", "value": "Smith" }"#,
            after: r#"{ "fhirPath": "name.family", "value": "Smith" }"#,
        },
    }
}

fn explain_value_mismatch() -> Explanation {
    Explanation {
        title: "Value Mismatch",
        description: "\
The field value differs from the blocked value.

Comparison is case-insensitive and otherwise exact: no trimming, no partial
matching. A single mismatching field prevents the whole rule from blocking.",
        remediation: "\
This is the normal outcome for records that should keep matching. If the record
was expected to be blocked, compare the exact field value with the configured one.",
        examples: ExamplePair {
            before: r#"{ "fhirPath": "name.family", "value": "Smith " }"#,
            after: r#"{ "fhirPath": "name.family", "value": "Smith" }"#,
        },
    }
}

fn explain_rule_blocked() -> Explanation {
    Explanation {
        title: "Rule Blocked Matching",
        description: "\
Every blocked field of the rule matched the record, so MDM matching is suppressed.

Rules are combined with OR: the first rule that blocks decides the outcome and
later rules are not evaluated.",
        remediation: "\
No action is needed when the block is intended. Remove or narrow the rule to let
matching proceed for such records.",
        examples: ExamplePair {
            before: r#"{ "resourceType": "Patient", "fields": [ { "fhirPath": "name.family", "value": "Doe" } ] }"#,
            after: r#"{ "resourceType": "Patient", "fields": [ { "fhirPath": "name.family", "value": "Doe" }, { "fhirPath": "name.given", "value": "John" } ] }"#,
        },
    }
}

fn explain_vacuous_rule() -> Explanation {
    Explanation {
        title: "Rule Without Fields",
        description: "\
A rule with no blocked fields blocks every record of its resource type.

Conditions inside a rule are combined with AND, and an empty AND is true. This is
usually an authoring mistake rather than an intended block of a whole resource type.",
        remediation: "\
Add at least one blocked field to the rule, or remove the rule.",
        examples: ExamplePair {
            before: r#"{ "resourceType": "Patient", "fields": [] }"#,
            after: r#"{ "resourceType": "Patient", "fields": [ { "fhirPath": "name.family", "value": "Doe" } ] }"#,
        },
    }
}

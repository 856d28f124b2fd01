//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - OR across rules and AND across fields
//! - case-insensitive comparison
//! - fail-open handling of errors, ambiguous results and composite values

use crate::model::{BlockList, BlockRule, BlockedField};
use crate::primitive::{PrimitiveKind, is_primitive};
use crate::record::{EvaluationError, FieldValue};
use crate::test_support::{TestRecord, evaluator};
use proptest::prelude::*;

const PATHS: [&str; 3] = ["gender", "birthDate", "name.family"];

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

fn arb_path() -> impl Strategy<Value = String> {
    prop::sample::select(PATHS.to_vec()).prop_map(str::to_string)
}

fn arb_blocked_value() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["smith", "SMITH", "male", "1990-01-01"]).prop_map(str::to_string)
}

/// What the scripted evaluator returns for one path.
#[derive(Clone, Debug)]
enum PathResult {
    Single(String),
    Empty,
    Many(String),
    Composite,
    Failure,
}

fn arb_path_result() -> impl Strategy<Value = PathResult> {
    prop_oneof![
        4 => arb_blocked_value().prop_map(PathResult::Single),
        1 => Just(PathResult::Empty),
        1 => arb_blocked_value().prop_map(PathResult::Many),
        1 => Just(PathResult::Composite),
        1 => Just(PathResult::Failure),
    ]
}

fn arb_record() -> impl Strategy<Value = TestRecord> {
    prop::collection::vec(arb_path_result(), PATHS.len()).prop_map(|results| {
        let mut record = TestRecord::new("Patient");
        for (path, result) in PATHS.iter().zip(results) {
            record = match result {
                PathResult::Single(v) => record.with_string(path, &v),
                PathResult::Empty => record.with_values(path, Vec::new()),
                PathResult::Many(v) => record.with_values(
                    path,
                    vec![
                        FieldValue::primitive("string", v.clone()),
                        FieldValue::primitive("string", v),
                    ],
                ),
                PathResult::Composite => {
                    record.with_value(path, FieldValue::composite("HumanName"))
                }
                PathResult::Failure => {
                    record.with_error(path, EvaluationError::execution(path, "scripted failure"))
                }
            };
        }
        record
    })
}

fn arb_field() -> impl Strategy<Value = BlockedField> {
    (arb_path(), arb_blocked_value()).prop_map(|(p, v)| BlockedField::new(p, v))
}

fn arb_rule(resource_type: &'static str) -> impl Strategy<Value = BlockRule> {
    prop::collection::vec(arb_field(), 1..4)
        .prop_map(move |fields| BlockRule::new(resource_type, fields))
}

fn arb_rules() -> impl Strategy<Value = Vec<BlockRule>> {
    prop::collection::vec(
        prop_oneof![
            4 => arb_rule("Patient"),
            1 => arb_rule("Practitioner"),
        ],
        0..5,
    )
}

fn flip_case(s: &str, mask: &[bool]) -> String {
    s.chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| {
            if *upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

fn single_rule_blocks(rule: &BlockRule, record: &TestRecord) -> bool {
    evaluator(BlockList::new(vec![rule.clone()])).is_mdm_matching_blocked(record)
}

proptest! {
    #[test]
    fn blocked_iff_some_applicable_rule_blocks_alone(rules in arb_rules(), record in arb_record()) {
        let expected = rules.iter().any(|r| single_rule_blocks(r, &record));
        let engine = evaluator(BlockList::new(rules));
        prop_assert_eq!(engine.is_mdm_matching_blocked(&record), expected);
    }

    #[test]
    fn trace_decision_agrees_with_boolean(rules in arb_rules(), record in arb_record()) {
        let engine = evaluator(BlockList::new(rules));
        let decision = engine.evaluate(&record);
        prop_assert_eq!(decision.blocked, engine.is_mdm_matching_blocked(&record));
        prop_assert_eq!(decision.blocked, decision.blocking_rule.is_some());
    }

    #[test]
    fn adding_a_rule_never_unblocks(
        rules in arb_rules(),
        extra in arb_rule("Patient"),
        record in arb_record(),
    ) {
        let before = evaluator(BlockList::new(rules.clone())).is_mdm_matching_blocked(&record);
        let mut extended = rules;
        extended.push(extra);
        let after = evaluator(BlockList::new(extended)).is_mdm_matching_blocked(&record);
        prop_assert!(!before || after);
    }

    #[test]
    fn rule_order_does_not_change_the_decision(rules in arb_rules(), record in arb_record()) {
        let forward = evaluator(BlockList::new(rules.clone())).is_mdm_matching_blocked(&record);
        let mut reversed = rules;
        reversed.reverse();
        let backward = evaluator(BlockList::new(reversed)).is_mdm_matching_blocked(&record);
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn rules_for_other_types_never_block(
        fields in prop::collection::vec(arb_field(), 0..4),
        record in arb_record(),
    ) {
        let engine = evaluator(BlockList::new(vec![BlockRule::new("Practitioner", fields)]));
        prop_assert!(!engine.is_mdm_matching_blocked(&record));
    }

    #[test]
    fn any_case_variant_of_the_value_blocks(
        value in "[a-zA-Z0-9-]{1,16}",
        mask in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let engine = evaluator(BlockList::new(vec![BlockRule::new(
            "Patient",
            vec![BlockedField::new("name.family", flip_case(&value, &mask))],
        )]));
        let record = TestRecord::new("Patient").with_string("name.family", &value);
        prop_assert!(engine.is_mdm_matching_blocked(&record));
    }

    #[test]
    fn unmatched_conditions_never_block(
        value in arb_blocked_value(),
        result in prop_oneof![
            Just(PathResult::Empty),
            Just(PathResult::Composite),
            Just(PathResult::Failure),
            arb_blocked_value().prop_map(PathResult::Many),
        ],
    ) {
        let path = "name.family";
        let record = TestRecord::new("Patient");
        let record = match result {
            PathResult::Empty => record.with_values(path, Vec::new()),
            PathResult::Composite => record.with_value(path, FieldValue::composite("HumanName")),
            PathResult::Failure => record.with_error(path, EvaluationError::syntax(path, "bad")),
            PathResult::Many(v) => record.with_values(
                path,
                vec![
                    FieldValue::primitive("string", v.clone()),
                    FieldValue::primitive("string", v),
                ],
            ),
            PathResult::Single(v) => record.with_string(path, &v),
        };
        let engine = evaluator(BlockList::new(vec![BlockRule::new(
            "Patient",
            vec![BlockedField::new(path, value)],
        )]));
        prop_assert!(!engine.is_mdm_matching_blocked(&record));
    }

    #[test]
    fn classifier_accepts_only_the_closed_tag_set(tag in "[a-zA-Z0-9]{0,16}") {
        let known = PrimitiveKind::ALL.iter().any(|k| k.tag() == tag);
        prop_assert_eq!(is_primitive(&tag), known);
    }
}

//! Fuzz target for path evaluation and the block decision.
//!
//! Goals:
//! - evaluating arbitrary paths against arbitrary resources never panics
//! - the traced decision always agrees with the boolean one
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_path_evaluator
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mdmblock_domain::{
    BlockEvaluator, BlockList, BlockRule, BlockedField, NoopObserver, Record, StaticRuleProvider,
};
use mdmblock_record::DottedPathEvaluator;

#[derive(Arbitrary, Debug)]
struct EvalInput {
    /// Resource JSON text.
    resource: String,
    /// Each rule is a list of (path, value) conditions on the resource's own type.
    rules: Vec<Vec<(String, String)>>,
}

fuzz_target!(|input: EvalInput| {
    if input.resource.len() > 16 * 1024 || input.rules.len() > 8 {
        return;
    }

    let Ok(record) = mdmblock_record::parse_resource(&input.resource) else {
        return;
    };
    let resource_type = record.resource_type().to_string();

    let rules = input
        .rules
        .into_iter()
        .map(|fields| {
            let fields = fields
                .into_iter()
                .take(8)
                .filter(|(path, _)| path.len() <= 256)
                .map(|(path, value)| BlockedField::new(path, value))
                .collect();
            BlockRule::new(resource_type.clone(), fields)
        })
        .collect();

    let evaluator = BlockEvaluator::new(
        Some(StaticRuleProvider::new(BlockList::new(rules))),
        DottedPathEvaluator,
    )
    .with_observer(NoopObserver);

    let blocked = evaluator.is_mdm_matching_blocked(&record);
    assert_eq!(blocked, evaluator.evaluate(&record).blocked);
});

use crate::model::{BlockList, BlockRule, BlockedField};
use crate::observer::{
    ConditionContext, EvaluationObserver, RuleContext, SkipReason, TracingObserver,
    blocked_outcome, report_count, skip_outcome,
};
use crate::primitive::is_primitive;
use crate::provider::{RuleProvider, StaticRuleProvider};
use crate::record::{PathEvaluator, Record};
use mdmblock_types::{ConditionOutcome, DecisionData};

/// Decides whether MDM matching is blocked for a record.
///
/// The evaluator holds no mutable state. It is `Send + Sync` whenever its provider, path
/// evaluator and observer are.
#[derive(Clone, Debug)]
pub struct BlockEvaluator<P, E, O = TracingObserver> {
    provider: Option<P>,
    evaluator: E,
    observer: O,
}

impl<P, E> BlockEvaluator<P, E, TracingObserver>
where
    P: RuleProvider,
    E: PathEvaluator,
{
    pub fn new(provider: Option<P>, evaluator: E) -> Self {
        Self {
            provider,
            evaluator,
            observer: TracingObserver,
        }
    }
}

impl<E> BlockEvaluator<StaticRuleProvider, E, TracingObserver>
where
    E: PathEvaluator,
{
    /// An evaluator without a rule provider. It never blocks.
    pub fn without_rules(evaluator: E) -> Self {
        Self::new(None, evaluator)
    }
}

impl<P, E, O> BlockEvaluator<P, E, O>
where
    P: RuleProvider,
    E: PathEvaluator,
    O: EvaluationObserver,
{
    pub fn with_observer<O2: EvaluationObserver>(self, observer: O2) -> BlockEvaluator<P, E, O2> {
        BlockEvaluator {
            provider: self.provider,
            evaluator: self.evaluator,
            observer,
        }
    }

    /// `true` if any rule for the record's resource type has all of its fields matching.
    pub fn is_mdm_matching_blocked(&self, record: &E::Record) -> bool {
        let Some(block_list) = self.provider.as_ref().and_then(|p| p.block_list()) else {
            return false;
        };
        self.first_blocking_rule(record, &block_list, &mut ()).is_some()
    }

    /// Same decision as [`Self::is_mdm_matching_blocked`], with the trace that produced it.
    pub fn evaluate(&self, record: &E::Record) -> DecisionData {
        let resource_type = record.resource_type().to_string();
        let Some(block_list) = self.provider.as_ref().and_then(|p| p.block_list()) else {
            return DecisionData {
                resource_type,
                ..DecisionData::default()
            };
        };

        let mut outcomes = Vec::new();
        let blocking_rule = self.first_blocking_rule(record, &block_list, &mut outcomes);

        DecisionData {
            rules_configured: true,
            rules_total: report_count(block_list.rules.len()),
            rules_applicable: if resource_type.is_empty() {
                0
            } else {
                report_count(block_list.rules_for(&resource_type).count())
            },
            blocked: blocking_rule.is_some(),
            blocking_rule: blocking_rule.map(report_count),
            resource_type,
            outcomes,
        }
    }

    fn first_blocking_rule<T: Trace>(
        &self,
        record: &E::Record,
        block_list: &BlockList,
        trace: &mut T,
    ) -> Option<usize> {
        let resource_type = record.resource_type();
        if resource_type.is_empty() {
            tracing::debug!("record has no resource type; no blocklist rule applies");
            return None;
        }

        // Rules are OR'd: the first one that blocks decides.
        block_list
            .rules_for(resource_type)
            .find(|(rule_index, rule)| self.rule_blocks(record, *rule_index, rule, trace))
            .map(|(rule_index, _)| rule_index)
    }

    fn rule_blocks<T: Trace>(
        &self,
        record: &E::Record,
        rule_index: usize,
        rule: &BlockRule,
        trace: &mut T,
    ) -> bool {
        // Fields are AND'd: any reason not to block wins.
        for (field_index, field) in rule.fields.iter().enumerate() {
            if let Err(reason) = self.field_matches(record, field) {
                let ctx = ConditionContext {
                    resource_type: &rule.resource_type,
                    rule_index,
                    field_index,
                    field,
                };
                self.observer.condition_skipped(&ctx, &reason);
                trace.record(|| skip_outcome(&ctx, &reason));
                return false;
            }
        }

        let ctx = RuleContext {
            resource_type: &rule.resource_type,
            rule_index,
            rule,
        };
        self.observer.rule_blocked(&ctx);
        trace.record(|| blocked_outcome(&ctx));
        true
    }

    fn field_matches(&self, record: &E::Record, field: &BlockedField) -> Result<(), SkipReason> {
        let values = self
            .evaluator
            .evaluate(record, &field.path)
            .map_err(SkipReason::PathEvaluationFailed)?;

        let [value] = values.as_slice() else {
            return Err(SkipReason::AmbiguousResult {
                count: values.len(),
            });
        };

        if !is_primitive(value.type_tag()) {
            return Err(SkipReason::UnsupportedValueKind {
                type_tag: value.type_tag().to_string(),
            });
        }

        match value.text() {
            Some(text) if eq_ignore_case(text, &field.blocked_value) => Ok(()),
            actual => Err(SkipReason::ValueMismatch {
                actual: actual.map(str::to_string),
            }),
        }
    }
}

/// Per-character case folding in both directions, without any normalization or trimming.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).all(|(x, y)| {
            x == y || x.to_uppercase().eq(y.to_uppercase()) || x.to_lowercase().eq(y.to_lowercase())
        })
}

/// Where evaluation outcomes go. `()` discards them without building anything.
trait Trace {
    fn record(&mut self, build: impl FnOnce() -> ConditionOutcome);
}

impl Trace for () {
    fn record(&mut self, _build: impl FnOnce() -> ConditionOutcome) {}
}

impl Trace for Vec<ConditionOutcome> {
    fn record(&mut self, build: impl FnOnce() -> ConditionOutcome) {
        self.push(build());
    }
}

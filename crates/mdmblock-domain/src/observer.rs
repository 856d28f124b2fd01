//! Observability side channel for evaluations.
//!
//! Observers see every condition that did not match and every rule that blocked. They cannot
//! influence the decision.

use crate::model::{BlockRule, BlockedField};
use crate::record::EvaluationError;
use mdmblock_types::{ConditionOutcome, OutcomeLevel, ids};
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Clone, Copy, Debug)]
pub struct ConditionContext<'a> {
    pub resource_type: &'a str,
    /// Index in the full blocklist.
    pub rule_index: usize,
    pub field_index: usize,
    pub field: &'a BlockedField,
}

#[derive(Clone, Copy, Debug)]
pub struct RuleContext<'a> {
    pub resource_type: &'a str,
    pub rule_index: usize,
    pub rule: &'a BlockRule,
}

/// Why a condition did not match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    PathEvaluationFailed(EvaluationError),
    /// Zero values, or more than one.
    AmbiguousResult { count: usize },
    UnsupportedValueKind { type_tag: String },
    /// `actual` is `None` when the primitive carries no value.
    ValueMismatch { actual: Option<String> },
}

impl SkipReason {
    pub fn code(&self) -> &'static str {
        match self {
            SkipReason::PathEvaluationFailed(_) => ids::CODE_PATH_EVALUATION_FAILED,
            SkipReason::AmbiguousResult { .. } => ids::CODE_AMBIGUOUS_RESULT,
            SkipReason::UnsupportedValueKind { .. } => ids::CODE_UNSUPPORTED_VALUE_KIND,
            SkipReason::ValueMismatch { .. } => ids::CODE_VALUE_MISMATCH,
        }
    }

    pub fn level(&self) -> OutcomeLevel {
        match self {
            SkipReason::PathEvaluationFailed(_) | SkipReason::UnsupportedValueKind { .. } => {
                OutcomeLevel::Warn
            }
            SkipReason::AmbiguousResult { .. } | SkipReason::ValueMismatch { .. } => {
                OutcomeLevel::Trace
            }
        }
    }

    pub fn message(&self, ctx: &ConditionContext<'_>) -> String {
        let path = &ctx.field.path;
        match self {
            SkipReason::PathEvaluationFailed(err) => format!(
                "path evaluation failed; no blocking will be applied and MDM matching continues: {err}"
            ),
            SkipReason::AmbiguousResult { count: 0 } => format!("no value at path {path}"),
            SkipReason::AmbiguousResult { count } => {
                format!("too many values ({count}) at path {path}")
            }
            SkipReason::UnsupportedValueKind { type_tag } => format!(
                "path {path} yields a non-primitive value ({type_tag}); blocking is only supported on primitive field types"
            ),
            SkipReason::ValueMismatch { .. } => {
                format!("value at path {path} does not match; MDM matching will not be blocked")
            }
        }
    }

    fn data(&self) -> Value {
        match self {
            SkipReason::PathEvaluationFailed(err) => {
                json!({ "error": err.to_string(), "expression": err.path() })
            }
            SkipReason::AmbiguousResult { count } => json!({ "count": count }),
            SkipReason::UnsupportedValueKind { type_tag } => json!({ "type_tag": type_tag }),
            SkipReason::ValueMismatch { actual } => json!({ "actual": actual }),
        }
    }
}

/// Report counters are `u32`; larger values saturate.
pub(crate) fn report_count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

pub(crate) fn skip_outcome(ctx: &ConditionContext<'_>, reason: &SkipReason) -> ConditionOutcome {
    ConditionOutcome {
        level: reason.level(),
        code: reason.code().to_string(),
        rule_index: report_count(ctx.rule_index),
        field_index: Some(report_count(ctx.field_index)),
        path: Some(ctx.field.path.clone()),
        message: reason.message(ctx),
        data: reason.data(),
    }
}

pub(crate) fn blocked_outcome(ctx: &RuleContext<'_>) -> ConditionOutcome {
    let (level, code, message) = if ctx.rule.is_vacuous() {
        (
            OutcomeLevel::Warn,
            ids::CODE_VACUOUS_RULE,
            format!(
                "rule {} has no fields and blocks every {} record",
                ctx.rule_index, ctx.resource_type
            ),
        )
    } else {
        (
            OutcomeLevel::Debug,
            ids::CODE_RULE_BLOCKED,
            format!("all fields of rule {} matched; MDM matching is blocked", ctx.rule_index),
        )
    };

    ConditionOutcome {
        level,
        code: code.to_string(),
        rule_index: report_count(ctx.rule_index),
        field_index: None,
        path: None,
        message,
        data: json!({ "fields": ctx.rule.fields.len() }),
    }
}

pub trait EvaluationObserver {
    fn condition_skipped(&self, ctx: &ConditionContext<'_>, reason: &SkipReason);

    fn rule_blocked(&self, _ctx: &RuleContext<'_>) {}
}

/// Emits every event through `tracing` at the level of its outcome.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl EvaluationObserver for TracingObserver {
    fn condition_skipped(&self, ctx: &ConditionContext<'_>, reason: &SkipReason) {
        let message = reason.message(ctx);
        match reason.level() {
            OutcomeLevel::Warn => tracing::warn!(
                resource_type = %ctx.resource_type,
                rule = ctx.rule_index,
                field = ctx.field_index,
                code = reason.code(),
                "{message}"
            ),
            OutcomeLevel::Debug => tracing::debug!(
                resource_type = %ctx.resource_type,
                rule = ctx.rule_index,
                field = ctx.field_index,
                code = reason.code(),
                "{message}"
            ),
            OutcomeLevel::Trace => tracing::trace!(
                resource_type = %ctx.resource_type,
                rule = ctx.rule_index,
                field = ctx.field_index,
                code = reason.code(),
                "{message}"
            ),
        }
    }

    fn rule_blocked(&self, ctx: &RuleContext<'_>) {
        if ctx.rule.is_vacuous() {
            tracing::warn!(
                resource_type = %ctx.resource_type,
                rule = ctx.rule_index,
                code = ids::CODE_VACUOUS_RULE,
                "rule without fields blocks every record of its resource type"
            );
        } else {
            tracing::debug!(
                resource_type = %ctx.resource_type,
                rule = ctx.rule_index,
                code = ids::CODE_RULE_BLOCKED,
                "MDM matching blocked"
            );
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl EvaluationObserver for NoopObserver {
    fn condition_skipped(&self, _ctx: &ConditionContext<'_>, _reason: &SkipReason) {}
}

impl<O: EvaluationObserver + ?Sized> EvaluationObserver for &O {
    fn condition_skipped(&self, ctx: &ConditionContext<'_>, reason: &SkipReason) {
        (**self).condition_skipped(ctx, reason)
    }

    fn rule_blocked(&self, ctx: &RuleContext<'_>) {
        (**self).rule_blocked(ctx)
    }
}

impl<O: EvaluationObserver + ?Sized> EvaluationObserver for Arc<O> {
    fn condition_skipped(&self, ctx: &ConditionContext<'_>, reason: &SkipReason) {
        (**self).condition_skipped(ctx, reason)
    }

    fn rule_blocked(&self, ctx: &RuleContext<'_>) {
        (**self).rule_blocked(ctx)
    }
}

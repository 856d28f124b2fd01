//! Pure blocklist evaluation (no IO).
//!
//! Input: a record, a rule provider and a path evaluator supplied by the caller.
//! Output: whether MDM matching is blocked for the record, optionally with the trace that
//! produced the decision.
//!
//! Every failure inside an evaluation degrades to "this condition does not match". Nothing
//! escapes [`BlockEvaluator::is_mdm_matching_blocked`].

#![forbid(unsafe_code)]

pub mod model;
pub mod observer;
pub mod primitive;
pub mod provider;
pub mod record;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::BlockEvaluator;
pub use model::{BlockList, BlockRule, BlockedField};
pub use observer::{
    ConditionContext, EvaluationObserver, NoopObserver, RuleContext, SkipReason, TracingObserver,
};
pub use primitive::{PrimitiveKind, is_primitive};
pub use provider::{RuleProvider, StaticRuleProvider};
pub use record::{EvaluationError, FieldValue, PathEvaluator, Record};

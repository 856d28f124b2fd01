use crate::engine::BlockEvaluator;
use crate::model::{BlockList, BlockRule, BlockedField};
use crate::observer::{ConditionContext, EvaluationObserver, RuleContext, SkipReason};
use crate::provider::StaticRuleProvider;
use crate::record::{EvaluationError, FieldValue, PathEvaluator, Record};
use mdmblock_types::ids;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// A record whose path results are scripted up front. Unscripted paths yield no values.
#[derive(Clone, Debug, Default)]
pub struct TestRecord {
    resource_type: String,
    results: BTreeMap<String, Result<Vec<FieldValue>, EvaluationError>>,
}

impl TestRecord {
    pub fn new(resource_type: &str) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            results: BTreeMap::new(),
        }
    }

    pub fn with_values(mut self, path: &str, values: Vec<FieldValue>) -> Self {
        self.results.insert(path.to_string(), Ok(values));
        self
    }

    pub fn with_value(self, path: &str, value: FieldValue) -> Self {
        self.with_values(path, vec![value])
    }

    pub fn with_string(self, path: &str, value: &str) -> Self {
        self.with_value(path, FieldValue::primitive("string", value))
    }

    pub fn with_error(mut self, path: &str, err: EvaluationError) -> Self {
        self.results.insert(path.to_string(), Err(err));
        self
    }
}

impl Record for TestRecord {
    fn resource_type(&self) -> &str {
        &self.resource_type
    }
}

pub fn patient() -> TestRecord {
    TestRecord::new("Patient")
}

#[derive(Clone, Debug, Default)]
pub struct CallLog {
    paths: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn push(&self, path: &str) {
        if let Ok(mut paths) = self.paths.lock() {
            paths.push(path.to_string());
        }
    }
}

/// Replays the results scripted on a [`TestRecord`] and logs every evaluated path.
#[derive(Clone, Debug, Default)]
pub struct ScriptedEvaluator {
    calls: CallLog,
}

impl ScriptedEvaluator {
    pub fn calls(&self) -> CallLog {
        self.calls.clone()
    }
}

impl PathEvaluator for ScriptedEvaluator {
    type Record = TestRecord;

    fn evaluate(
        &self,
        record: &TestRecord,
        path: &str,
    ) -> Result<Vec<FieldValue>, EvaluationError> {
        self.calls.push(path);
        record.results.get(path).cloned().unwrap_or(Ok(Vec::new()))
    }
}

/// Collects outcome codes in the order the engine reports them.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    codes: Mutex<Vec<&'static str>>,
}

impl RecordingObserver {
    pub fn codes(&self) -> Vec<&'static str> {
        self.codes.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn push(&self, code: &'static str) {
        if let Ok(mut codes) = self.codes.lock() {
            codes.push(code);
        }
    }
}

impl EvaluationObserver for RecordingObserver {
    fn condition_skipped(&self, _ctx: &ConditionContext<'_>, reason: &SkipReason) {
        self.push(reason.code());
    }

    fn rule_blocked(&self, ctx: &RuleContext<'_>) {
        if ctx.rule.is_vacuous() {
            self.push(ids::CODE_VACUOUS_RULE);
        } else {
            self.push(ids::CODE_RULE_BLOCKED);
        }
    }
}

pub fn field(path: &str, blocked_value: &str) -> BlockedField {
    BlockedField::new(path, blocked_value)
}

pub fn rule(resource_type: &str, fields: Vec<BlockedField>) -> BlockRule {
    BlockRule::new(resource_type, fields)
}

pub fn block_list(rules: Vec<BlockRule>) -> BlockList {
    BlockList::new(rules)
}

pub fn evaluator(list: BlockList) -> BlockEvaluator<StaticRuleProvider, ScriptedEvaluator> {
    BlockEvaluator::new(
        Some(StaticRuleProvider::new(list)),
        ScriptedEvaluator::default(),
    )
}

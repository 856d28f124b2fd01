//! The `check` use case: load the blocklist and the record, decide, produce a report.

use anyhow::Context;
use camino::Utf8Path;
use mdmblock_domain::{BlockEvaluator, StaticRuleProvider};
use mdmblock_record::DottedPathEvaluator;
use mdmblock_settings::ConfigFormat;
use mdmblock_types::{DecisionReport, RunMeta, SCHEMA_DECISION_V1, ToolMeta};
use time::OffsetDateTime;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Blocklist contents. `None` means no rule provider is configured.
    pub rules_text: Option<&'a str>,
    pub rules_format: ConfigFormat,
    /// Resource JSON.
    pub record_text: &'a str,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: DecisionReport,
}

impl CheckOutput {
    pub fn blocked(&self) -> bool {
        self.report.decision.blocked
    }
}

/// Run the check use case: parse rules and record, evaluate, produce report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    let block_list = match input.rules_text {
        Some(text) => mdmblock_settings::load_blocklist(text, input.rules_format)
            .context("load blocklist")?,
        None => None,
    };
    if block_list.is_none() {
        tracing::info!("no blocklist configured; MDM matching is never blocked");
    }

    let record = mdmblock_record::parse_resource(input.record_text).context("load record")?;

    // A missing blocklist maps to an absent provider, not to an empty one.
    let provider = block_list.map(StaticRuleProvider::new);
    let decision = BlockEvaluator::new(provider, DottedPathEvaluator).evaluate(&record);

    let ended_at = OffsetDateTime::now_utc();
    let duration_ms = (ended_at - started_at).whole_milliseconds().max(0) as u64;

    let report = DecisionReport {
        schema: SCHEMA_DECISION_V1.to_string(),
        tool: ToolMeta {
            name: "mdmblock".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        run: RunMeta {
            started_at,
            ended_at,
            duration_ms,
        },
        decision,
    };

    Ok(CheckOutput { report })
}

/// Pick the blocklist format from an explicit override or the file extension (JSON otherwise).
pub fn detect_format(path: &Utf8Path, explicit: Option<ConfigFormat>) -> ConfigFormat {
    explicit
        .or_else(|| path.extension().and_then(ConfigFormat::from_extension))
        .unwrap_or_default()
}

/// Map the decision to an exit code: 0 = matching allowed, 2 = matching blocked.
pub fn decision_exit_code(blocked: bool) -> i32 {
    if blocked { 2 } else { 0 }
}

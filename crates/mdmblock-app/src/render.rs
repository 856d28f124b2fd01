//! Render use cases: JSON and Markdown from in-memory reports.

use anyhow::Context;
use camino::Utf8Path;
use mdmblock_types::{DecisionReport, OutcomeLevel};

/// Pretty JSON with a trailing newline.
pub fn serialize_report(report: &DecisionReport) -> anyhow::Result<String> {
    let mut text = serde_json::to_string_pretty(report).context("serialize report")?;
    text.push('\n');
    Ok(text)
}

pub fn parse_report_json(text: &str) -> anyhow::Result<DecisionReport> {
    serde_json::from_str(text).context("parse report json")
}

pub fn render_markdown(report: &DecisionReport) -> String {
    let decision = &report.decision;
    let mut out = String::new();

    out.push_str("# MDM blocklist decision\n\n");
    out.push_str(&format!(
        "- Resource type: `{}`\n- Matching: **{}**\n",
        decision.resource_type,
        if decision.blocked { "BLOCKED" } else { "ALLOWED" }
    ));

    if !decision.rules_configured {
        out.push_str("- Rules: none configured\n\n");
        return out;
    }

    out.push_str(&format!(
        "- Rules: {} applicable / {} configured\n",
        decision.rules_applicable, decision.rules_total
    ));
    if let Some(rule) = decision.blocking_rule {
        out.push_str(&format!("- Blocking rule: #{}\n", rule));
    }
    out.push('\n');

    if decision.outcomes.is_empty() {
        out.push_str("No outcomes.\n");
        return out;
    }

    out.push_str("## Outcomes\n\n");
    for o in &decision.outcomes {
        let level = match o.level {
            OutcomeLevel::Trace => "TRACE",
            OutcomeLevel::Debug => "DEBUG",
            OutcomeLevel::Warn => "WARN",
        };
        match (&o.path, o.field_index) {
            (Some(path), Some(field)) => out.push_str(&format!(
                "- [{}] `{}` rule #{}, field #{} (`{}`): {}\n",
                level, o.code, o.rule_index, field, path, o.message
            )),
            _ => out.push_str(&format!(
                "- [{}] `{}` rule #{}: {}\n",
                level, o.code, o.rule_index, o.message
            )),
        }
    }

    out
}

pub fn write_report(path: &Utf8Path, report: &DecisionReport) -> anyhow::Result<()> {
    let data = serialize_report(report)?;
    write_text(path, &data)
}

pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write file: {}", path))?;
    Ok(())
}

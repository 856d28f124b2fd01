use crate::model::BlockListConfigV1;
use anyhow::Context;
use mdmblock_domain::{BlockList, BlockRule, BlockedField};
use mdmblock_types::SCHEMA_BLOCKLIST_V1;

pub fn resolve_blocklist(cfg: BlockListConfigV1) -> anyhow::Result<BlockList> {
    if let Some(schema) = cfg.schema.as_deref() {
        validate_schema(schema)?;
    }

    let mut rules = Vec::with_capacity(cfg.rules.len());
    for (index, rule) in cfg.rules.into_iter().enumerate() {
        if rule.resource_type.trim().is_empty() {
            anyhow::bail!("blocklist rule {index}: resourceType must not be empty");
        }

        if rule.fields.is_empty() {
            tracing::warn!(
                rule = index,
                resource_type = %rule.resource_type,
                "blocklist rule has no fields and will block MDM matching for every record of its resource type"
            );
        }

        let mut fields = Vec::with_capacity(rule.fields.len());
        for (field_index, field) in rule.fields.into_iter().enumerate() {
            validate_path(&field.path)
                .with_context(|| format!("blocklist rule {index}, field {field_index}"))?;
            fields.push(BlockedField::new(field.path, field.blocked_value));
        }

        rules.push(BlockRule::new(rule.resource_type, fields));
    }

    Ok(BlockList::new(rules))
}

fn validate_schema(schema: &str) -> anyhow::Result<()> {
    if schema != SCHEMA_BLOCKLIST_V1 {
        anyhow::bail!("unknown blocklist schema: {schema} (expected {SCHEMA_BLOCKLIST_V1})");
    }
    Ok(())
}

// Expression syntax is left to the path evaluator; only blank paths are rejected here.
fn validate_path(path: &str) -> anyhow::Result<()> {
    if path.trim().is_empty() {
        anyhow::bail!("fhirPath must not be empty");
    }
    Ok(())
}

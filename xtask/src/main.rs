//! Developer tasks (schema generation, fixture conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use mdmblock_settings::ConfigFormat;
use schemars::schema_for;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("Cannot determine current directory")?,
    };

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .context("xtask has no parent")
    } else {
        Ok(manifest_dir)
    }
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

fn fixtures_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("tests").join("fixtures"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_blocklist_schema() -> schemars::Schema {
    schema_for!(mdmblock_settings::BlockListConfigV1)
}

fn generate_decision_schema() -> schemars::Schema {
    schema_for!(mdmblock_types::DecisionReportV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "mdmblock.blocklist.v1.json",
            generate: generate_blocklist_schema,
        },
        SchemaSpec {
            filename: "mdmblock.decision.v1.json",
            generate: generate_decision_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);

        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;

        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        let Ok(actual) = fs::read_to_string(&path) else {
            missing.push(spec.filename);
            continue;
        };

        if serialize_schema(&(spec.generate)())? != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn compile(spec_generate: fn() -> schemars::Schema) -> anyhow::Result<jsonschema::Validator> {
    let schema = serde_json::to_value(spec_generate()).context("schema to json")?;
    jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile schema: {}", e))
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

/// A fixture directory: its blocklist file (if any) and format.
struct Fixture {
    name: String,
    dir: PathBuf,
    rules: Option<(PathBuf, ConfigFormat)>,
}

fn fixtures() -> anyhow::Result<Vec<Fixture>> {
    let root = fixtures_dir()?;
    let mut out = Vec::new();

    for entry in fs::read_dir(&root).with_context(|| format!("read {}", root.display()))? {
        let dir = entry?.path();
        if !dir.is_dir() {
            continue;
        }
        let name = dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();
        let rules = [("blocklist.json", ConfigFormat::Json), ("blocklist.toml", ConfigFormat::Toml)]
            .into_iter()
            .map(|(file, format)| (dir.join(file), format))
            .find(|(path, _)| path.exists());
        out.push(Fixture { name, dir, rules });
    }

    out.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(out)
}

/// Validate fixture blocklists against the blocklist schema, and golden reports against the
/// decision schema.
fn conform() -> anyhow::Result<()> {
    let blocklist_schema = compile(generate_blocklist_schema)?;
    let decision_schema = compile(generate_decision_schema)?;
    let mut errors = Vec::new();
    let mut count = 0;

    for fixture in fixtures()? {
        count += 1;

        if let Some((path, format)) = &fixture.rules {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            // TOML is checked through its JSON rendering.
            let value: Value = match format {
                ConfigFormat::Json => serde_json::from_str(&text)
                    .with_context(|| format!("{}: parse blocklist", fixture.name))?,
                ConfigFormat::Toml => {
                    let cfg = mdmblock_settings::parse_blocklist_toml(&text)
                        .with_context(|| format!("{}: parse blocklist", fixture.name))?;
                    serde_json::to_value(cfg).context("blocklist to json")?
                }
            };
            for err in blocklist_schema.iter_errors(&value) {
                errors.push(format!("{}: blocklist schema: {}", fixture.name, err));
            }
        }

        let golden = fixture.dir.join("expected.report.json");
        if golden.exists() {
            let value = read_json(&golden)?;
            for err in decision_schema.iter_errors(&value) {
                errors.push(format!("{}: decision schema: {}", fixture.name, err));
            }
        }
    }

    report_errors(&errors, &format!("{} fixtures conform", count))
}

/// Run every fixture through the check use case and compare with its expected decision.
fn conform_full() -> anyhow::Result<()> {
    let decision_schema = compile(generate_decision_schema)?;
    let mut errors = Vec::new();
    let mut count = 0;

    for fixture in fixtures()? {
        count += 1;

        let rules_text = match &fixture.rules {
            Some((path, _)) => Some(
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
            ),
            None => None,
        };
        let rules_format = fixture.rules.as_ref().map(|(_, f)| *f).unwrap_or_default();
        let record_path = fixture.dir.join("record.json");
        let record_text = fs::read_to_string(&record_path)
            .with_context(|| format!("Failed to read {}", record_path.display()))?;

        let output = mdmblock_app::run_check(mdmblock_app::CheckInput {
            rules_text: rules_text.as_deref(),
            rules_format,
            record_text: &record_text,
        })
        .with_context(|| format!("{}: check", fixture.name))?;

        let report = serde_json::to_value(&output.report).context("report to json")?;
        for err in decision_schema.iter_errors(&report) {
            errors.push(format!("{}: decision schema: {}", fixture.name, err));
        }

        let expected = read_json(&fixture.dir.join("expected.json"))?;
        let actual = mdmblock_test_util::decision_summary(&report);
        if actual != expected {
            errors.push(format!(
                "{}: expected {} but got {}",
                fixture.name, expected, actual
            ));
        }

        let golden = fixture.dir.join("expected.report.json");
        if golden.exists()
            && mdmblock_test_util::normalize_nondeterministic(report) != read_json(&golden)?
        {
            errors.push(format!("{}: report differs from expected.report.json", fixture.name));
        }
    }

    report_errors(&errors, &format!("{} fixtures evaluate as expected", count))
}

/// Validate that all outcome codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let codes = mdmblock_types::explain::all_codes();
    let mut errors = Vec::new();

    for code in codes {
        match mdmblock_types::explain::lookup_explanation(code) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("Code '{}' has empty title", code));
                }
                if exp.description.is_empty() {
                    errors.push(format!("Code '{}' has empty description", code));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("Code '{}' has empty remediation", code));
                }
            }
            None => errors.push(format!("Code '{}' has no explanation", code)),
        }
    }

    report_errors(&errors, &format!("{} codes have explanations", codes.len()))
}

fn report_errors(errors: &[String], success: &str) -> anyhow::Result<()> {
    if errors.is_empty() {
        println!("✓ {}", success);
        return Ok(());
    }
    for error in errors {
        eprintln!("  - {}", error);
    }
    bail!("{} errors", errors.len())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate fixture blocklists and golden reports against schemas");
    eprintln!("  conform-full      Evaluate every fixture and compare with expected decisions");
    eprintln!("  explain-coverage  Validate all outcome codes have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "conform-full" => conform_full(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            println!("{}", mdmblock_types::SCHEMA_BLOCKLIST_V1);
            println!("{}", mdmblock_types::SCHEMA_DECISION_V1);
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}

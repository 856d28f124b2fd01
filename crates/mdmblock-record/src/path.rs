use crate::resource::JsonResource;
use mdmblock_domain::{EvaluationError, FieldValue, PathEvaluator, Record};
use serde_json::Value;

/// A validated dotted member path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathSegments<'a> {
    segments: Vec<&'a str>,
}

impl<'a> PathSegments<'a> {
    pub fn parse(path: &'a str) -> Result<Self, EvaluationError> {
        if path.trim().is_empty() {
            return Err(EvaluationError::syntax(path, "empty expression"));
        }

        if let Some(c) = path
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '.'))
        {
            return Err(EvaluationError::unsupported(
                path,
                format!("only member navigation is supported (found '{c}')"),
            ));
        }

        let mut segments = Vec::new();
        for segment in path.split('.') {
            let Some(first) = segment.chars().next() else {
                return Err(EvaluationError::syntax(path, "empty path segment"));
            };
            if first.is_ascii_digit() {
                return Err(EvaluationError::syntax(
                    path,
                    format!("segment '{segment}' must start with a letter or underscore"),
                ));
            }
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.segments
    }
}

/// Member navigation over FHIR JSON with implicit flattening of repeating elements.
#[derive(Clone, Copy, Debug, Default)]
pub struct DottedPathEvaluator;

impl PathEvaluator for DottedPathEvaluator {
    type Record = JsonResource;

    fn evaluate(
        &self,
        record: &JsonResource,
        path: &str,
    ) -> Result<Vec<FieldValue>, EvaluationError> {
        let segments = PathSegments::parse(path)?;
        let mut members = segments.as_slice();

        // A leading type name selects the resource itself, or nothing for another type.
        if let [first, rest @ ..] = members
            && first.starts_with(|c: char| c.is_ascii_uppercase())
        {
            if *first != record.resource_type() {
                return Ok(Vec::new());
            }
            members = rest;
        }

        if members.is_empty() {
            return Ok(vec![FieldValue::composite(record.resource_type())]);
        }

        let mut nodes = vec![record.body()];
        for member in members {
            let mut next = Vec::new();
            for node in nodes {
                if let Some(child) = node.as_object().and_then(|o| o.get(*member)) {
                    flatten(child, &mut next);
                }
            }
            nodes = next;
        }

        Ok(nodes.into_iter().map(to_field_value).collect())
    }
}

fn flatten<'v>(value: &'v Value, out: &mut Vec<&'v Value>) {
    match value {
        Value::Null => {}
        Value::Array(items) => {
            for item in items {
                flatten(item, out);
            }
        }
        other => out.push(other),
    }
}

// JSON carries no FHIR type information; tags are inferred from the JSON kind.
fn to_field_value(value: &Value) -> FieldValue {
    match value {
        Value::String(s) => FieldValue::primitive("string", s.clone()),
        Value::Bool(b) => FieldValue::primitive("boolean", b.to_string()),
        Value::Number(n) => {
            // Source text, as written in the resource.
            let text = n.to_string();
            let tag = if is_integer_text(&text) { "integer" } else { "decimal" };
            FieldValue::primitive(tag, text)
        }
        Value::Object(_) | Value::Array(_) | Value::Null => FieldValue::composite("Element"),
    }
}

fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

use anyhow::Context;
use mdmblock_domain::Record;
use serde_json::Value;

/// A FHIR resource in JSON form, keyed by its `resourceType`.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonResource {
    resource_type: String,
    body: Value,
}

impl JsonResource {
    /// Wrap a JSON object. The object must carry a non-empty string `resourceType`.
    pub fn from_value(body: Value) -> anyhow::Result<Self> {
        let Some(object) = body.as_object() else {
            anyhow::bail!("resource must be a JSON object");
        };
        let resource_type = object
            .get("resourceType")
            .and_then(Value::as_str)
            .context("resource has no string resourceType")?;
        if resource_type.is_empty() {
            anyhow::bail!("resource has an empty resourceType");
        }

        Ok(Self {
            resource_type: resource_type.to_string(),
            body,
        })
    }

    pub fn body(&self) -> &Value {
        &self.body
    }
}

impl Record for JsonResource {
    fn resource_type(&self) -> &str {
        &self.resource_type
    }
}

/// Parse resource JSON text.
pub fn parse_resource(text: &str) -> anyhow::Result<JsonResource> {
    let body: Value = serde_json::from_str(text).context("parse resource json")?;
    JsonResource::from_value(body)
}

/// Ordered collection of rules. Rules are OR'd: any blocking rule blocks the record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockList {
    pub rules: Vec<BlockRule>,
}

/// Conditions for one resource type. Fields are AND'd.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockRule {
    pub resource_type: String,
    pub fields: Vec<BlockedField>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockedField {
    /// Path expression handed verbatim to the path evaluator.
    pub path: String,
    pub blocked_value: String,
}

impl BlockList {
    pub fn new(rules: Vec<BlockRule>) -> Self {
        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules for `resource_type` with their index in the full list, in configured order.
    pub fn rules_for<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = (usize, &'a BlockRule)> + 'a {
        self.rules
            .iter()
            .enumerate()
            .filter(move |(_, rule)| rule.resource_type == resource_type)
    }
}

impl BlockRule {
    pub fn new(resource_type: impl Into<String>, fields: Vec<BlockedField>) -> Self {
        Self {
            resource_type: resource_type.into(),
            fields,
        }
    }

    /// A rule without fields blocks every record of its type.
    pub fn is_vacuous(&self) -> bool {
        self.fields.is_empty()
    }
}

impl BlockedField {
    pub fn new(path: impl Into<String>, blocked_value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            blocked_value: blocked_value.into(),
        }
    }
}

//! Seams to the record model and the path expression engine.

/// A structured record. Everything beyond the type discriminator is reached through a
/// [`PathEvaluator`].
pub trait Record {
    /// Type discriminator used to select applicable rules (e.g. `Patient`).
    fn resource_type(&self) -> &str;
}

/// One value selected by a path expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldValue {
    type_tag: String,
    text: Option<String>,
}

impl FieldValue {
    pub fn new(type_tag: impl Into<String>, text: Option<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            text,
        }
    }

    pub fn primitive(type_tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(type_tag, Some(text.into()))
    }

    pub fn composite(type_tag: impl Into<String>) -> Self {
        Self::new(type_tag, None)
    }

    /// Runtime type tag of the value (`string`, `dateTime`, `HumanName`, ...).
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// String representation. `None` for composites and for primitives without a value.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("malformed path expression '{path}': {reason}")]
    Syntax { path: String, reason: String },

    #[error("unsupported path expression '{path}': {reason}")]
    Unsupported { path: String, reason: String },

    #[error("evaluation of '{path}' failed: {reason}")]
    Execution { path: String, reason: String },
}

impl EvaluationError {
    pub fn syntax(path: &str, reason: impl Into<String>) -> Self {
        Self::Syntax {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub fn unsupported(path: &str, reason: impl Into<String>) -> Self {
        Self::Unsupported {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub fn execution(path: &str, reason: impl Into<String>) -> Self {
        Self::Execution {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Syntax { path, .. }
            | Self::Unsupported { path, .. }
            | Self::Execution { path, .. } => path,
        }
    }
}

/// Evaluates a path expression against a record.
///
/// Implementations must not panic on malformed expressions; they report them as
/// [`EvaluationError`] instead.
pub trait PathEvaluator {
    type Record: Record + ?Sized;

    fn evaluate(
        &self,
        record: &Self::Record,
        path: &str,
    ) -> Result<Vec<FieldValue>, EvaluationError>;
}

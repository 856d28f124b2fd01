//! Closed set of scalar type tags that support direct equality comparison.

/// Primitive FHIR data types. Tags are case-sensitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimitiveKind {
    String,
    Code,
    Markdown,
    Id,
    Uri,
    Url,
    Canonical,
    Oid,
    Uuid,
    Boolean,
    UnsignedInt,
    PositiveInt,
    Integer,
    Integer64,
    Decimal,
    Date,
    DateTime,
    Time,
    Instant,
    Base64Binary,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 20] = [
        PrimitiveKind::String,
        PrimitiveKind::Code,
        PrimitiveKind::Markdown,
        PrimitiveKind::Id,
        PrimitiveKind::Uri,
        PrimitiveKind::Url,
        PrimitiveKind::Canonical,
        PrimitiveKind::Oid,
        PrimitiveKind::Uuid,
        PrimitiveKind::Boolean,
        PrimitiveKind::UnsignedInt,
        PrimitiveKind::PositiveInt,
        PrimitiveKind::Integer,
        PrimitiveKind::Integer64,
        PrimitiveKind::Decimal,
        PrimitiveKind::Date,
        PrimitiveKind::DateTime,
        PrimitiveKind::Time,
        PrimitiveKind::Instant,
        PrimitiveKind::Base64Binary,
    ];

    pub const fn tag(self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Code => "code",
            PrimitiveKind::Markdown => "markdown",
            PrimitiveKind::Id => "id",
            PrimitiveKind::Uri => "uri",
            PrimitiveKind::Url => "url",
            PrimitiveKind::Canonical => "canonical",
            PrimitiveKind::Oid => "oid",
            PrimitiveKind::Uuid => "uuid",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::UnsignedInt => "unsignedInt",
            PrimitiveKind::PositiveInt => "positiveInt",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Integer64 => "integer64",
            PrimitiveKind::Decimal => "decimal",
            PrimitiveKind::Date => "date",
            PrimitiveKind::DateTime => "dateTime",
            PrimitiveKind::Time => "time",
            PrimitiveKind::Instant => "instant",
            PrimitiveKind::Base64Binary => "base64Binary",
        }
    }

    /// `None` for composite, unknown and future tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

/// Whether values with this type tag can be compared against a blocked value.
pub fn is_primitive(type_tag: &str) -> bool {
    PrimitiveKind::from_tag(type_tag).is_some()
}

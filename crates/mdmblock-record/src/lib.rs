//! Record adapters: JSON resources and a member-navigation path evaluator.
//!
//! The evaluator understands plain dotted member access (`Patient.name.family`) over FHIR JSON.
//! It is not a FHIRPath engine: functions, operators and indexers are reported as unsupported
//! so that the blocking engine treats them as non-matching.

#![forbid(unsafe_code)]

mod path;
mod resource;

pub use path::{DottedPathEvaluator, PathSegments};
pub use resource::{JsonResource, parse_resource};

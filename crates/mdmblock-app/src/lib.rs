//! Use case orchestration for mdmblock.
//!
//! This crate provides the application layer: use cases that coordinate the settings, record and
//! domain layers. It is intentionally thin and delegates the decision itself to the domain.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod render;

pub use check::{CheckInput, CheckOutput, decision_exit_code, detect_format, run_check};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use render::{parse_report_json, render_markdown, serialize_report, write_report, write_text};

//! Fuzz target for blocklist parsing and validation.
//!
//! Goal: loading a blocklist should **never panic** on any input, in either format.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_blocklist_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use mdmblock_settings::{ConfigFormat, load_blocklist};

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }

    if let Ok(s) = std::str::from_utf8(data) {
        let _ = load_blocklist(s, ConfigFormat::Json);
        let _ = load_blocklist(s, ConfigFormat::Toml);
    }
});

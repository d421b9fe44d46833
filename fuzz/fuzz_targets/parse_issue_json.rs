//! Fuzz harness for issue payloads and ticket ids
//!
//! Target: `casewright_ingest_json::parse_issue_json` and `extract_ticket_id`

#![no_main]

use casewright_ingest_json::{extract_ticket_id, parse_issue_json};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(issue) = parse_issue_json(input) {
        let _ = issue.classification_text();
        let _ = issue.validation_text();
    }

    if let Some(key) = extract_ticket_id(input) {
        assert!(key.contains('-'));
        assert_eq!(key, key.to_uppercase());
    }
});

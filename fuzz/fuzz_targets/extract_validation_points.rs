//! Fuzz harness for free-text extraction and classification
//!
//! Target: `casewright_extract::extract_validation_points`, `casewright_classify::classify`

#![no_main]

use casewright_classify::classify;
use casewright_extract::extract_validation_points;
use casewright_schema::issue::IssueText;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let points = extract_validation_points(input);
    for (_, sentences) in points.iter() {
        for s in sentences {
            assert!(s.ends_with('.'));
        }
    }

    let _ = classify(&IssueText::new(input, input));
});

//! Fuzz harness for pattern store documents
//!
//! Target: `casewright_memory::PatternMemory::from_store_json`

#![no_main]

use casewright_memory::PatternMemory;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    // Anything accepted must survive a save/parse cycle.
    if let Ok(memory) = PatternMemory::from_store_json(input) {
        let _ = memory.analyze_patterns();
        if let Ok(text) = serde_json::to_string(&memory.to_store_file()) {
            assert!(PatternMemory::from_store_json(&text).is_ok());
        }
    }
});

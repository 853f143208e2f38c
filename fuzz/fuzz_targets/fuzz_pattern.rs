#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz pattern parsing and alignment planning with arbitrary input
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(pattern) = bitgrep::BitPattern::parse(s) {
        for shift in 0..8 {
            let plan = bitgrep::query::AlignmentPlan::build(&pattern, shift);
            assert_eq!(plan.window.len() % 8, 0);
            for run in &plan.runs {
                assert!(run.byte_offset < plan.window_bytes());
                assert!(!run.bytes.is_empty());
            }
        }
    }
});

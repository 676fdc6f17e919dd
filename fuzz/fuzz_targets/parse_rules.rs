#![no_main]

use libfuzzer_sys::fuzz_target;

// Generated stylesheet text must parse back to the same rules.
fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let rules = css::parse_rules(input);
    let emitted = css::stylesheet_css(&rules);
    let reparsed = css::parse_rules(&emitted);
    assert_eq!(css::stylesheet_css(&reparsed), emitted);
});

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let once = html::format_markup(input);
    if input.trim().is_empty() {
        assert_eq!(once, input);
        return;
    }
    let twice = html::format_markup(&once);
    assert_eq!(once, twice, "markup formatting is not idempotent");
    assert!(once.lines().all(|line| line == line.trim_end()));
});

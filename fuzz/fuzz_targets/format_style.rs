#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    match css::try_format_style(input) {
        Ok(once) => {
            let twice = css::try_format_style(&once).expect("formatted style reformats");
            assert_eq!(once, twice, "style formatting is not idempotent");
        }
        Err(_) => assert_eq!(css::format_style(input), input),
    }
});

use crate::diff_lines;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

pub const GOLDEN_FORMAT_V1: &str = "codepanel-golden-v1";

#[derive(Debug, Deserialize)]
struct GoldenManifest {
    format: String,
    cases: Vec<GoldenCase>,
}

/// One formatter fixture. `expected` defaults to `input` for cases that must be left alone.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct GoldenCase {
    pub id: String,
    pub input: String,
    #[serde(default)]
    pub expected: Option<String>,
    #[serde(default)]
    pub fails: bool,
}

impl GoldenCase {
    pub fn expected(&self) -> &str {
        self.expected.as_deref().unwrap_or(&self.input)
    }
}

pub fn load_golden_cases(path: &Path) -> Vec<GoldenCase> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read golden fixtures {path:?}: {err}"));
    let manifest: GoldenManifest = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse golden fixtures {path:?}: {err}"));
    assert_eq!(
        manifest.format, GOLDEN_FORMAT_V1,
        "unsupported golden fixture format in {path:?}"
    );
    let mut seen = BTreeSet::new();
    for case in &manifest.cases {
        assert!(
            seen.insert(case.id.as_str()),
            "duplicate golden case id in {path:?}: {}",
            case.id
        );
        assert!(
            !(case.fails && case.expected.is_some()),
            "golden case '{}' in {path:?} fails but also declares expected output",
            case.id
        );
    }
    assert!(!manifest.cases.is_empty(), "no golden cases in {path:?}");
    manifest.cases
}

pub fn assert_golden(case: &GoldenCase, actual: &str) {
    let expected = case.expected();
    if actual != expected {
        panic!(
            "golden mismatch for case '{}'\n{}",
            case.id,
            diff_lines(expected, actual)
        );
    }
}

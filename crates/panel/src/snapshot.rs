/// Last text successfully applied from one surface.
///
/// Applying text equal to the snapshot is a no-op. This is what stops a host
/// "component updated" notification, triggered by an apply, from looping back
/// into another apply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    last: Option<String>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// `trimmed` is empty or equals the last applied text.
    pub fn is_redundant(&self, trimmed: &str) -> bool {
        trimmed.is_empty() || self.last.as_deref() == Some(trimmed)
    }

    pub fn record(&mut self, trimmed: &str) {
        self.last = Some(trimmed.to_string());
    }

    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

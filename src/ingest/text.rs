//! Canonical text for embedding
//!
//! Salient natural-language fields joined one per line. Blank fields are
//! skipped so the same record always produces the same text.

#[derive(Debug, Default)]
pub struct CanonicalText {
    lines: Vec<String>,
}

impl CanonicalText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, value: &str) -> Self {
        let value = value.trim();
        if !value.is_empty() {
            self.lines.push(value.to_string());
        }
        self
    }

    pub fn optional(self, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.line(v),
            None => self,
        }
    }

    /// `"{label}: {value}"` when the value is present and non-blank
    pub fn labeled(mut self, label: &str, value: Option<&str>) -> Self {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.lines.push(format!("{}: {}", label, v));
        }
        self
    }

    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}

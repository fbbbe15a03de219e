use serde::{Deserialize, Serialize};

/// Lines of text produced by an OCR engine, in the engine's reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedText {
    lines: Vec<String>,
}

impl RecognizedText {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Split a single block of engine output on line breaks.
    pub fn from_block(block: &str) -> Self {
        Self::new(block.lines().map(str::to_string).collect())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True when there are no lines, or every line is blank.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    /// All lines joined with `\n`, the form every pattern is matched against.
    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }

    pub fn folded(&self) -> FoldedText {
        FoldedText::new(self)
    }
}

/// Case-folded joined text. Built once per run and shared by every
/// classification predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldedText(String);

impl FoldedText {
    pub fn new(text: &RecognizedText) -> Self {
        FoldedText(text.joined().to_lowercase())
    }

    /// `needle` must already be lowercase.
    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }

    pub fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.contains(n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_block_keeps_order() {
        let text = RecognizedText::from_block("Ornate Sword\nAttack: 85\n");
        assert_eq!(text.lines(), &["Ornate Sword".to_string(), "Attack: 85".to_string()]);
        assert_eq!(text.joined(), "Ornate Sword\nAttack: 85");
    }

    #[test]
    fn blank_lines_count_as_empty() {
        assert!(RecognizedText::default().is_empty());
        assert!(RecognizedText::new(vec!["  ".into(), "".into()]).is_empty());
        assert!(!RecognizedText::new(vec!["HP 3".into()]).is_empty());
    }

    #[test]
    fn folded_text_is_lowercase() {
        let folded = RecognizedText::from_block("LEGENDARY\nNo Boss Scaling").folded();
        assert!(folded.contains("legendary"));
        assert!(folded.contains("no boss"));
        assert!(folded.contains_any(&["shield", "boss"]));
        assert!(!folded.contains("LEGENDARY"));
    }
}
